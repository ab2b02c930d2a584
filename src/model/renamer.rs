//! In-place rename state

use crate::content::Node;
use crate::path::PathKey;

/// A pending rename of one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamer {
    target: PathKey,
    name: String,
}

impl Renamer {
    /// Start renaming `node`; the editable name starts as its current name
    #[must_use]
    pub fn new(node: &Node) -> Self {
        Self {
            target: node.path().clone(),
            name: node.name().to_string(),
        }
    }

    #[must_use]
    pub const fn target(&self) -> &PathKey {
        &self.target
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Path the target would have after the rename
    #[must_use]
    pub fn renamed_path(&self) -> PathKey {
        self.target
            .parent()
            .unwrap_or_default()
            .child(self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Row;

    #[test]
    fn test_rename_flow() {
        let node = Node::new(Row::new(["r", "old.txt"], "text"));
        let mut renamer = Renamer::new(&node);
        assert_eq!(renamer.name(), "old.txt");

        renamer.set_name("new.txt");
        assert_eq!(renamer.target(), &PathKey::from(["r", "old.txt"]));
        assert_eq!(renamer.renamed_path(), PathKey::from(["r", "new.txt"]));
    }
}
