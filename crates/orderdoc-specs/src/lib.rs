//! Specification merging and aggregation.
//!
//! This crate reconciles specification metadata scattered across the catalog
//! and computes per-field totals for groups of order lines.
//!
//! # Merging
//!
//! A [`MergedSpecSet`] for one catalog option is built from up to four
//! [`SpecSource`]s, highest priority first:
//!
//! 1. the option's own `dimensions` (live values)
//! 2. the OptionSpec linked to the option
//! 3. the first OptionSpec for the option's type (only without a link)
//! 4. the OptionType template (defaults only)
//!
//! Names are unique; the first source to introduce a name owns its values,
//! while later OptionSpecs may still adjust the total settings.
//!
//! # Aggregation
//!
//! [`compute_totals`] sums numeric fields across the items of one group,
//! honouring `includeInTotal`. [`group_definitions`] applies the merge overlay
//! across every item of a group so the total settings are right even when only
//! one item's option carries them.
//!
//! # Example
//!
//! ```rust,ignore
//! let merged = merge_specs(&option, &catalog.option_specs);
//! let item = commit_selection(&option, &merged, overrides, &mut SequentialIds::default());
//!
//! let defs = group_definitions(&items, &catalog);
//! let totals = compute_totals(&defs, &items, &group_keys(&items));
//! ```

mod aggregate;
mod group;
mod merge;
mod source;

pub use aggregate::{Totals, compute_totals, has_totals, is_numeric_key};
pub use group::{
    GroupAggregate, aggregate_groups, compute_group_totals, group_definitions, group_keys,
};
pub use merge::{
    CatalogMerge, DefinitionMap, MergedSpecSet, commit_selection, merge_specs, merge_with_catalog,
};
pub use source::{MergeRule, SpecSource, precedence_chain};
