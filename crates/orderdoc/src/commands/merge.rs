//! Merge command implementation.
//!
//! Prints the merged specification set of one catalog option together with
//! the values a new order line would start from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use orderdoc_specs::{CatalogMerge, MergedSpecSet};
use orderdoc_types::SpecValue;
use serde::Serialize;
use tracing::info;

use crate::input::{load_catalog, write_output};

/// Arguments for the merge command
#[derive(Debug)]
pub struct MergeArgs {
    pub catalog: PathBuf,
    pub option: String,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MergeReport<'a> {
    option_id: &'a str,
    specifications: &'a MergedSpecSet,
    initial_values: IndexMap<String, SpecValue>,
}

/// Execute the merge command
pub fn execute(args: MergeArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let merged = catalog
        .merge_for(&args.option)
        .with_context(|| format!("Option '{}' is not in the catalog", args.option))?;

    info!(option = %args.option, specifications = merged.len(), "Merged option");

    let report = MergeReport {
        option_id: &args.option,
        specifications: &merged,
        initial_values: merged.initial_values(),
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize merge")?;
    write_output(args.output.as_deref(), format!("{json}\n").as_bytes())
}
