//! Reading catalog and order files, writing command output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use orderdoc_export::OrderDocument;
use orderdoc_types::SpecCatalog;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::is_json;

fn load<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file: {}", path.display()))?;
    if is_json(path) {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid {what} file: {}", path.display()))
    } else {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid {what} file: {}", path.display()))
    }
}

pub fn load_catalog(path: &Path) -> Result<SpecCatalog> {
    let catalog: SpecCatalog = load(path, "catalog")?;
    debug!(
        options = catalog.options.len(),
        option_specs = catalog.option_specs.len(),
        option_types = catalog.option_types.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

pub fn load_order(path: &Path) -> Result<OrderDocument> {
    let order: OrderDocument = load(path, "order")?;
    debug!(items = order.items.len(), "Loaded order");
    Ok(order)
}

/// Write `content` to `output`, or to stdout without a path.
pub fn write_output(output: Option<&Path>, content: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            debug!(path = %path.display(), bytes = content.len(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
