//! Totals command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use orderdoc_specs::aggregate_groups;
use orderdoc_types::group_by_type;
use serde::Serialize;
use tracing::info;

use crate::input::{load_catalog, load_order, write_output};

/// Arguments for the totals command
#[derive(Debug)]
pub struct TotalsArgs {
    pub catalog: PathBuf,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupReport {
    item_count: usize,
    keys: Vec<String>,
    totals: IndexMap<String, Option<f64>>,
}

/// Execute the totals command
pub fn execute(args: TotalsArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let order = load_order(&args.input)?;

    let groups = group_by_type(&order.items);
    let report: IndexMap<String, GroupReport> = aggregate_groups(&groups, &catalog)
        .into_iter()
        .map(|(type_id, aggregate)| {
            let item_count = groups.get(&type_id).map_or(0, Vec::len);
            (
                type_id,
                GroupReport {
                    item_count,
                    keys: aggregate.keys,
                    totals: aggregate.totals,
                },
            )
        })
        .collect();

    info!(groups = report.len(), items = order.items.len(), "Computed totals");

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize totals")?;
    write_output(args.output.as_deref(), format!("{json}\n").as_bytes())
}
