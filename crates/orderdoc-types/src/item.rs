//! Order lines.

use crate::value::SpecValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One committed line of an order.
///
/// `specification_values` is a snapshot taken when the selection was
/// committed; it is never re-merged against the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionItem {
    pub id: String,
    pub option_type_id: String,
    #[serde(default)]
    pub option_type_name: String,
    pub option_id: String,
    #[serde(default)]
    pub option_name: String,
    #[serde(default)]
    pub specification_values: IndexMap<String, SpecValue>,
}

impl OptionItem {
    /// The committed value for a specification key.
    pub fn value(&self, key: &str) -> Option<&SpecValue> {
        self.specification_values.get(key)
    }
}

/// Order lines grouped by option type id, in order of first appearance.
pub type ItemGroups = IndexMap<String, Vec<OptionItem>>;

/// Group order lines by `option_type_id`, keeping the order in which each type
/// first appears and the order of items within a type.
pub fn group_by_type(items: &[OptionItem]) -> ItemGroups {
    let mut groups = ItemGroups::new();
    for item in items {
        groups
            .entry(item.option_type_id.clone())
            .or_default()
            .push(item.clone());
    }
    groups
}
