//! Shared data types for the order document engine.
//!
//! This crate holds the plain data that flows between the merge, aggregation,
//! template and export crates:
//!
//! - [`SpecificationDefinition`]: one named specification field with its
//!   metadata (data type, unit, total settings) and optional value/default
//! - [`SpecValue`]: a committed specification value, either a [`PlainValue`]
//!   or a [`FileReference`], decided when the value is deserialized
//! - [`CatalogOption`], [`OptionSpec`], [`OptionType`]: the three catalog
//!   sources a merged specification set is built from
//! - [`OptionItem`]: one committed line of an order
//! - [`IdGenerator`]: injected source of order-line identifiers
//!
//! Nothing in here performs I/O. Catalog data arrives already fetched and
//! deserialized.

mod catalog;
mod ids;
mod item;
mod spec;
mod value;

pub use catalog::{CatalogOption, OptionSpec, OptionType, SpecCatalog};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use item::{ItemGroups, OptionItem, group_by_type};
pub use spec::{DataType, SpecificationDefinition};
pub use value::{FileReference, PlainValue, SpecValue, format_number, parse_float};
