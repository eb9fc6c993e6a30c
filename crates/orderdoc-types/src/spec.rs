//! Specification definitions.

use crate::value::SpecValue;
use serde::{Deserialize, Serialize};

/// Data type of a specification field.
///
/// Types the engine does not know deserialize as [`DataType::Other`] so that
/// an unexpected catalog entry degrades instead of failing the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Date,
    File,
    Link,
    Refer,
    Dropdown,
    #[serde(other)]
    Other,
}

/// One named specification field.
///
/// The same shape is used by all three catalog sources: an Option's
/// `dimensions` carry live `value`s, an OptionSpec may carry values or
/// defaults, and an OptionType template only carries `default_value`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// `None` means "included" for numeric fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_in_total: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_formula: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropdown_options: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<SpecValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<SpecValue>,
}

impl SpecificationDefinition {
    /// Create a definition with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_include_in_total(mut self, include: bool) -> Self {
        self.include_in_total = Some(include);
        self
    }

    pub fn with_total_formula(mut self, formula: impl Into<String>) -> Self {
        self.total_formula = Some(formula.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<SpecValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_default_value(mut self, value: impl Into<SpecValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Whether a numeric field takes part in totals. Only an explicit
    /// `false` excludes it.
    pub fn is_included_in_total(&self) -> bool {
        self.include_in_total != Some(false)
    }

    /// Starting value for a fresh selection: the live value, else the
    /// default, else the empty string.
    pub fn initial_value(&self) -> SpecValue {
        self.value
            .as_ref()
            .or(self.default_value.as_ref())
            .cloned()
            .unwrap_or_else(SpecValue::empty)
    }
}
