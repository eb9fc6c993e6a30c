//! Order-wide summary figures.

use crate::cell::Cell;
use crate::rows::RowBuilder;
use orderdoc_types::OptionItem;
use serde::Serialize;

pub const ITEM_COUNT_LABEL: &str = "Total Items";
pub const QUANTITY_LABEL: &str = "Total Quantity";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub item_count: usize,
    /// Sum of the quantity key over all items; values that do not parse count
    /// as `0`.
    pub total_quantity: f64,
}

impl OrderSummary {
    pub fn from_items(items: &[OptionItem], quantity_key: &str) -> Self {
        let total_quantity = items
            .iter()
            .filter_map(|item| item.value(quantity_key))
            .filter_map(|value| value.as_number())
            .filter(|n| n.is_finite())
            .sum();
        Self {
            item_count: items.len(),
            total_quantity,
        }
    }

    /// Append the summary rows to a sheet.
    pub fn add_rows<'a>(&self, builder: RowBuilder<'a>) -> RowBuilder<'a> {
        builder
            .summary(ITEM_COUNT_LABEL, Cell::Number(self.item_count as f64))
            .summary(QUANTITY_LABEL, Cell::Number(self.total_quantity))
    }
}
