//! Render command implementation.
//!
//! Renders an order to a single self-contained HTML page using the print
//! templates from the settings file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use orderdoc_export::{DocumentSettings, PrintDocument};
use tracing::{info, warn};

use crate::input::{load_catalog, load_order, write_output};

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    pub catalog: PathBuf,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Overrides `print.strict` when set
    pub strict: bool,
}

/// Execute the render command
pub fn execute(args: RenderArgs, mut settings: DocumentSettings) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let order = load_order(&args.input)?;
    settings.print.strict |= args.strict;

    let output = PrintDocument::new(settings)
        .render(&order, &catalog)
        .with_context(|| format!("Failed to render {}", args.input.display()))?;

    if !output.diagnostics.is_empty() {
        warn!(count = output.diagnostics.len(), "Templates rendered with diagnostics");
    }
    info!(items = order.items.len(), bytes = output.html.len(), "Rendered order");

    write_output(args.output.as_deref(), output.html.as_bytes())
}
