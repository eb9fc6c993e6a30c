//! Definitions, keys and totals for groups of order lines.

use crate::aggregate::{Totals, compute_totals};
use crate::merge::{DefinitionMap, merge_with_catalog, overlay_definition};
use indexmap::{IndexMap, IndexSet};
use orderdoc_types::{ItemGroups, OptionItem, SpecCatalog};

/// Build the definition map for a group of items.
///
/// Each item's catalog option is merged on its own, then the results are
/// folded together with the OptionSpec overlay: a name keeps the definition
/// that introduced it, but a later member may still set `includeInTotal` or
/// `totalFormula`. Items whose option is no longer in the catalog contribute
/// nothing.
pub fn group_definitions(items: &[OptionItem], catalog: &SpecCatalog) -> DefinitionMap {
    let mut definitions = DefinitionMap::new();
    let mut seen_options = IndexSet::new();

    for item in items {
        if !seen_options.insert(item.option_id.as_str()) {
            continue;
        }
        let Some(option) = catalog.option(&item.option_id) else {
            tracing::debug!(item = %item.id, option = %item.option_id, "Option not in catalog");
            continue;
        };

        for spec in merge_with_catalog(option, catalog).into_definitions().into_values() {
            match definitions.get_mut(&spec.name) {
                Some(existing) => overlay_definition(existing, &spec),
                None => {
                    definitions.insert(spec.name.clone(), spec);
                }
            }
        }
    }

    definitions
}

/// Ordered union of the specification keys carried by `items`.
pub fn group_keys(items: &[OptionItem]) -> Vec<String> {
    let mut keys = IndexSet::new();
    for item in items {
        for key in item.specification_values.keys() {
            keys.insert(key.as_str());
        }
    }
    keys.into_iter().map(str::to_string).collect()
}

/// Totals for one group, with definitions and keys derived from its items.
pub fn compute_group_totals(items: &[OptionItem], catalog: &SpecCatalog) -> Totals {
    compute_totals(&group_definitions(items, catalog), items, &group_keys(items))
}

/// Everything the rendering surfaces need for one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupAggregate {
    pub keys: Vec<String>,
    pub definitions: DefinitionMap,
    pub totals: Totals,
}

/// Aggregate every group with the same inclusion rules.
pub fn aggregate_groups(groups: &ItemGroups, catalog: &SpecCatalog) -> IndexMap<String, GroupAggregate> {
    groups
        .iter()
        .map(|(type_id, items)| {
            let keys = group_keys(items);
            let definitions = group_definitions(items, catalog);
            let totals = compute_totals(&definitions, items, &keys);
            (
                type_id.clone(),
                GroupAggregate {
                    keys,
                    definitions,
                    totals,
                },
            )
        })
        .collect()
}
