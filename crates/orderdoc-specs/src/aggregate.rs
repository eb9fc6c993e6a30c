//! Per-field totals for a group of order lines.

use crate::merge::DefinitionMap;
use indexmap::IndexMap;
use orderdoc_types::{DataType, OptionItem, SpecificationDefinition};

/// Total per specification key; `None` when the key is not totaled.
pub type Totals = IndexMap<String, Option<f64>>;

/// Whether `key` holds numbers for this group.
///
/// A `number` data type decides it; any other explicit type rules it out.
/// Without a data type the first item's value must read as a finite number.
pub fn is_numeric_key(
    definition: Option<&SpecificationDefinition>,
    items: &[OptionItem],
    key: &str,
) -> bool {
    match definition.and_then(|d| d.data_type) {
        Some(DataType::Number) => true,
        Some(_) => false,
        None => items
            .first()
            .and_then(|item| item.value(key))
            .is_some_and(|value| value.is_finite_number()),
    }
}

/// Compute the total of every key in `keys` over `items`.
///
/// Numeric keys are summed unless their definition sets
/// `includeInTotal: false`. Values that do not parse count as `0`. Keys that
/// are not numeric or not included map to `None`. `totalFormula` is carried
/// on the definition but does not change the sum.
pub fn compute_totals(definitions: &DefinitionMap, items: &[OptionItem], keys: &[String]) -> Totals {
    keys.iter()
        .map(|key| {
            let definition = definitions.get(key);
            let numeric = is_numeric_key(definition, items, key);
            let included = definition.is_none_or(SpecificationDefinition::is_included_in_total);

            let total = (numeric && included).then(|| {
                items
                    .iter()
                    .map(|item| item.value(key).and_then(|v| v.as_number()).unwrap_or(0.0))
                    .sum::<f64>()
            });

            tracing::trace!(key = %key, numeric, included, ?total, "Computed total");
            (key.clone(), total)
        })
        .collect()
}

/// True when at least one key has a total.
pub fn has_totals(totals: &Totals) -> bool {
    totals.values().any(Option::is_some)
}
