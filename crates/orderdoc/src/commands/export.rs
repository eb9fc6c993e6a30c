//! Export command implementation.
//!
//! Builds the export sheet for an order and writes it as CSV or as a JSON
//! array of rows.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use orderdoc_export::{
    DocumentSettings, GroupedOrder, OrderDocument, OrderSummary, Row, RowBuilder,
};
use orderdoc_types::SpecCatalog;
use tracing::info;

use crate::input::{load_catalog, load_order, write_output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Arguments for the export command
#[derive(Debug)]
pub struct ExportArgs {
    pub catalog: PathBuf,
    pub input: PathBuf,
    pub format: ExportFormat,
    pub output: Option<PathBuf>,
}

/// Execute the export command
pub fn execute(args: ExportArgs, settings: DocumentSettings) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let order = load_order(&args.input)?;

    let rows = order_rows(&order, &catalog, &settings, Local::now());
    info!(rows = rows.len(), format = ?args.format, "Exported order");

    let bytes = match args.format {
        ExportFormat::Csv => to_csv(&rows)?,
        ExportFormat::Json => {
            let mut json = serde_json::to_vec_pretty(&rows).context("Failed to serialize rows")?;
            json.push(b'\n');
            json
        }
    };
    write_output(args.output.as_deref(), &bytes)
}

/// The full sheet: title, order metadata, groups and summary.
pub fn order_rows(
    order: &OrderDocument,
    catalog: &SpecCatalog,
    settings: &DocumentSettings,
    generated_at: DateTime<Local>,
) -> Vec<Row> {
    let export = &settings.export;
    let grouped = GroupedOrder::new(&order.items, catalog, export);

    let mut builder = RowBuilder::new(export);
    if let Some(id) = order.meta_text("orderId") {
        builder = builder.metadata("Order", id);
    }
    if let Some(customer) = customer_name(order) {
        builder = builder.metadata("Customer", customer);
    }
    builder = builder.metadata("Generated", generated_at.format("%Y-%m-%d %H:%M").to_string());
    let builder = OrderSummary::from_items(&order.items, &export.quantity_key).add_rows(builder);

    grouped.rows(&builder)
}

fn customer_name(order: &OrderDocument) -> Option<String> {
    order.meta_text("customer").or_else(|| {
        order
            .meta
            .get("customer")
            .and_then(|c| c.get("name"))
            .and_then(|n| n.as_str())
            .map(str::to_string)
    })
}

/// Rows as CSV. Rows may differ in length.
pub fn to_csv(rows: &[Row]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        if row.is_empty() {
            // a record needs at least one field
            writer.write_record([""]).context("Failed to write CSV row")?;
        } else {
            writer
                .write_record(row.iter().map(ToString::to_string))
                .context("Failed to write CSV row")?;
        }
    }
    writer.into_inner().context("Failed to finish CSV output")
}
