//! Merging catalog sources into one specification set per option.

use crate::source::{MergeRule, SpecSource, precedence_chain};
use indexmap::IndexMap;
use orderdoc_types::{
    CatalogOption, IdGenerator, OptionItem, OptionSpec, SpecCatalog, SpecValue,
    SpecificationDefinition,
};
use serde::{Serialize, Serializer};

/// Definitions keyed by name, in merge order.
pub type DefinitionMap = IndexMap<String, SpecificationDefinition>;

/// Ordered, name-unique specification definitions for one option selection.
///
/// Computed on demand and never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSpecSet {
    definitions: DefinitionMap,
}

impl MergedSpecSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SpecificationDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecificationDefinition> {
        self.definitions.values()
    }

    pub fn definitions(&self) -> &DefinitionMap {
        &self.definitions
    }

    pub fn into_definitions(self) -> DefinitionMap {
        self.definitions
    }

    /// Starting values for a fresh selection, in merge order.
    pub fn initial_values(&self) -> IndexMap<String, SpecValue> {
        self.definitions
            .iter()
            .map(|(name, spec)| (name.clone(), spec.initial_value()))
            .collect()
    }

    /// Merge one source into the set according to its rule.
    pub fn apply(&mut self, source: SpecSource<'_>) {
        let specs = source.specifications();
        let (added, touched) = match source.rule() {
            MergeRule::Own => self.merge_owned(specs),
            MergeRule::Overlay => self.merge_overlay(specs),
            MergeRule::Fallback => self.merge_fallback(specs),
        };
        tracing::debug!(
            source = source.kind_name(),
            added,
            touched,
            total = self.len(),
            "Merged specification source"
        );
    }

    /// Step 1: the option's own definitions.
    fn merge_owned(&mut self, specs: &[SpecificationDefinition]) -> (usize, usize) {
        let mut added = 0;
        let mut touched = 0;
        for spec in specs {
            match self.definitions.get_mut(&spec.name) {
                Some(existing) => {
                    fill_undefined(existing, spec);
                    touched += 1;
                }
                None => {
                    self.definitions.insert(spec.name.clone(), spec.clone());
                    added += 1;
                }
            }
        }
        (added, touched)
    }

    /// Steps 2 and 3: OptionSpec bundles.
    fn merge_overlay(&mut self, specs: &[SpecificationDefinition]) -> (usize, usize) {
        let mut added = 0;
        let mut touched = 0;
        for spec in specs {
            match self.definitions.get_mut(&spec.name) {
                Some(existing) => {
                    overlay_definition(existing, spec);
                    touched += 1;
                }
                None => {
                    self.definitions.insert(spec.name.clone(), spec.clone());
                    added += 1;
                }
            }
        }
        (added, touched)
    }

    /// Step 4: the OptionType template.
    fn merge_fallback(&mut self, specs: &[SpecificationDefinition]) -> (usize, usize) {
        let mut added = 0;
        for spec in specs {
            if !self.definitions.contains_key(&spec.name) {
                self.definitions.insert(spec.name.clone(), spec.clone());
                added += 1;
            }
        }
        (added, 0)
    }
}

impl Serialize for MergedSpecSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.definitions.values())
    }
}

impl<'a> IntoIterator for &'a MergedSpecSet {
    type Item = &'a SpecificationDefinition;
    type IntoIter = indexmap::map::Values<'a, String, SpecificationDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.values()
    }
}

/// Apply the OptionSpec overlay to an already-merged definition.
///
/// Defined total settings from `incoming` replace the current ones; all other
/// fields are only filled in while still undefined.
pub(crate) fn overlay_definition(
    existing: &mut SpecificationDefinition,
    incoming: &SpecificationDefinition,
) {
    if incoming.include_in_total.is_some() {
        existing.include_in_total = incoming.include_in_total;
    }
    if incoming.total_formula.is_some() {
        existing.total_formula = incoming.total_formula.clone();
    }
    fill_undefined(existing, incoming);
}

fn fill_undefined(existing: &mut SpecificationDefinition, incoming: &SpecificationDefinition) {
    fn fill<T: Clone>(slot: &mut Option<T>, from: &Option<T>) {
        if slot.is_none() {
            slot.clone_from(from);
        }
    }

    fill(&mut existing.data_type, &incoming.data_type);
    fill(&mut existing.unit, &incoming.unit);
    fill(&mut existing.include_in_total, &incoming.include_in_total);
    fill(&mut existing.total_formula, &incoming.total_formula);
    fill(&mut existing.dropdown_options, &incoming.dropdown_options);
    fill(&mut existing.value, &incoming.value);
    fill(&mut existing.default_value, &incoming.default_value);
}

/// Merge the specification sources of a catalog option.
///
/// The OptionType template comes from the option's embedded type record. Use
/// [`merge_with_catalog`] to resolve the type by id instead.
pub fn merge_specs(option: &CatalogOption, option_specs: &[OptionSpec]) -> MergedSpecSet {
    merge_chain(precedence_chain(
        option,
        option_specs,
        option.option_type_ref.as_ref(),
    ))
}

/// Merge a catalog option, resolving its OptionType through the catalog when
/// the option does not embed it.
pub fn merge_with_catalog(option: &CatalogOption, catalog: &SpecCatalog) -> MergedSpecSet {
    merge_chain(precedence_chain(
        option,
        &catalog.option_specs,
        catalog.option_type_for(option),
    ))
}

/// Catalog lookups that end in a merge.
pub trait CatalogMerge {
    /// Merge the option with id `option_id`, or `None` if the catalog does
    /// not have it.
    fn merge_for(&self, option_id: &str) -> Option<MergedSpecSet>;
}

impl CatalogMerge for SpecCatalog {
    fn merge_for(&self, option_id: &str) -> Option<MergedSpecSet> {
        self.option(option_id)
            .map(|option| merge_with_catalog(option, self))
    }
}

fn merge_chain(chain: Vec<SpecSource<'_>>) -> MergedSpecSet {
    let mut merged = MergedSpecSet::new();
    for source in chain {
        merged.apply(source);
    }
    merged
}

/// Commit an operator's selection as a new order line.
///
/// Values start from [`MergedSpecSet::initial_values`] and are replaced by
/// `overrides`. Override keys outside the merged set are dropped, so an
/// item never carries a key its option does not define.
pub fn commit_selection<I>(
    option: &CatalogOption,
    merged: &MergedSpecSet,
    overrides: I,
    ids: &mut impl IdGenerator,
) -> OptionItem
where
    I: IntoIterator<Item = (String, SpecValue)>,
{
    let mut values = merged.initial_values();
    for (key, value) in overrides {
        match values.get_mut(&key) {
            Some(slot) => *slot = value,
            None => {
                tracing::warn!(option = %option.id, key = %key, "Dropping value for unknown specification");
            }
        }
    }

    OptionItem {
        id: ids.next_id(),
        option_type_id: option.option_type_id.clone(),
        option_type_name: option.option_type_name.clone(),
        option_id: option.id.clone(),
        option_name: option.name.clone(),
        specification_values: values,
    }
}
