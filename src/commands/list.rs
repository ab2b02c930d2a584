//! List command - open a root and print the visible tree

use crate::{
    TreefinderError,
    cli::ListArgs,
    config::TreefinderConfig,
    content::Row,
    model::TreeModel,
    output,
    source::{ContentSource, FsSource, JsonSource, MockSource, SourceKind},
};
use colored::Colorize;
use std::sync::Arc;
use tracing::debug;

type Result<T> = std::result::Result<T, TreefinderError>;

/// Execute the list command
///
/// # Errors
///
/// Returns `TreefinderError` if the source cannot be opened, a listing
/// fails, or an `--expand` path does not name a visible directory.
pub async fn execute(args: &ListArgs, config: &TreefinderConfig, quiet: bool) -> Result<()> {
    let (source, root) = open_source(args, config).await?;
    let mut model = TreeModel::new(source, config.model_options());

    build_view(&mut model, root, args).await?;
    print_view(&model, args, config, quiet)
}

/// Create the content source selected by `args` (or the config) and its root row
///
/// # Errors
///
/// Returns `TreefinderError` if the base directory or JSON document cannot be read.
pub async fn open_source(
    args: &ListArgs,
    config: &TreefinderConfig,
) -> Result<(Arc<dyn ContentSource>, Row)> {
    let kind = args.source.unwrap_or(config.default_source);
    debug!(?kind, path = ?args.path, "opening source");

    match kind {
        SourceKind::Fs => {
            let base = match &args.path {
                Some(path) => path.clone(),
                None => std::env::current_dir()?,
            };
            let base = tokio::fs::canonicalize(&base).await?;
            let source = FsSource::new(base).with_hidden(args.hidden || config.show_hidden);
            let root = source.root_row();
            Ok((Arc::new(source), root))
        }
        SourceKind::Json => {
            let path = args.path.as_ref().ok_or_else(|| {
                TreefinderError::InvalidInput("The json source needs a document path".into())
            })?;
            let source = JsonSource::load(path).await?;
            let root = source.root_row().clone();
            Ok((Arc::new(source), root))
        }
        SourceKind::Mock => {
            let name = args
                .path
                .as_ref()
                .map_or_else(|| "mock".to_string(), |p| p.display().to_string());
            let source = MockSource::new(config.mock);
            let root = source.root_row(&name);
            Ok((Arc::new(source), root))
        }
    }
}

/// Open `root` and apply the sorts, expands and filters from `args`
///
/// Sorts come first: the first `--sort` column replaces the default order and
/// each later one is added as a tie-breaker (a repeated column flips to
/// descending). Filters are applied last so `--expand` can reach rows the
/// filter hides.
///
/// # Errors
///
/// Returns `TreefinderError` if a listing fails or an expand path is not a
/// visible directory.
pub async fn build_view(model: &mut TreeModel, root: Row, args: &ListArgs) -> Result<()> {
    if !model.open(root.clone()).await? {
        return Err(TreefinderError::InvalidInput(format!(
            "'{}' is not a directory",
            root.path
        )));
    }

    for (ix, column) in args.sort.iter().enumerate() {
        model.sort(Some(column), ix > 0).await?;
    }

    if let Some(depth) = args.expand_depth {
        expand_to_depth(model, depth).await?;
    }

    for path in &args.expand {
        expand_path(model, path).await?;
    }

    for (column, pattern) in &args.filters {
        model.set_filter(column, pattern).await?;
    }

    Ok(())
}

/// Expand every directory whose depth below the root is at most `depth`
///
/// # Errors
///
/// Returns `TreefinderError` if a listing fails.
pub async fn expand_to_depth(model: &mut TreeModel, depth: usize) -> Result<()> {
    let base = model.path_depth();

    let mut ix = 0;
    while ix < model.len() {
        let wanted = model.row(ix).is_some_and(|node| {
            node.is_dir() && !node.is_expanded() && node.depth().saturating_sub(base) <= depth
        });
        if wanted {
            model.expand_row(ix).await?;
        }
        ix += 1;
    }
    Ok(())
}

/// Expand each directory along `path` (relative to the root, `/`-separated)
///
/// # Errors
///
/// Returns `TreefinderError::InvalidInput` if a segment is not visible or not
/// a directory.
pub async fn expand_path(model: &mut TreeModel, path: &str) -> Result<()> {
    let Some(mut key) = model.root().map(|root| root.path().clone()) else {
        return Ok(());
    };

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        key = key.child(segment);

        let Some(ix) = model.visible_keys().iter().position(|k| *k == key) else {
            return Err(TreefinderError::InvalidInput(format!(
                "'{path}': '{key}' is not visible below the root"
            )));
        };
        if model.row(ix).is_some_and(|node| !node.is_dir()) {
            return Err(TreefinderError::InvalidInput(format!(
                "'{path}': '{key}' is not a directory"
            )));
        }

        model.expand_row(ix).await?;
    }
    Ok(())
}

fn print_view(model: &TreeModel, args: &ListArgs, config: &TreefinderConfig, quiet: bool) -> Result<()> {
    let rows = model.visible_rows();

    if args.json {
        for node in &rows {
            println!("{}", serde_json::to_string(node.row())?);
        }
        return Ok(());
    }

    if !quiet {
        println!("{}", output::crumbs_line(&model.crumbs().names()).bold());
    }

    if rows.is_empty() {
        if !quiet {
            println!("No rows to show.");
        }
        return Ok(());
    }

    let columns = args.columns.then(|| model.columns());
    for line in output::tree_lines(&rows, model.path_depth(), columns, &config.date_format, quiet) {
        println!("{line}");
    }

    if !quiet {
        println!();
        println!("{} row(s), sorted by {}", rows.len(), model.sort_spec());
    }
    Ok(())
}
