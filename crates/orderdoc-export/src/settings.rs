//! Document settings: print templates and export layout.
//!
//! Every field has a default, so an empty document is a valid settings file.
//!
//! ```yaml
//! print:
//!   title: Work order
//!   header: "<h1>{{orderId}}</h1>"
//!   escape_values: true
//! export:
//!   columns:
//!     - key: width
//!       label: Width (mm)
//!   total_label: TOTAL
//! ```

use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Label of the total row in exported sheets.
pub const DEFAULT_TOTAL_LABEL: &str = "TOTAL";
/// Label of the total row in printed tables.
pub const PRINT_TOTAL_LABEL: &str = "Total";
/// Cell text standing in for a file value.
pub const DEFAULT_FILE_MARKER: &str = "File";
/// Cell text for an absent value in item rows.
pub const DEFAULT_MISSING_MARKER: &str = "N/A";
/// Cell text for a key without a total.
pub const NO_TOTAL_MARKER: &str = "-";
/// Spec key summed into the order's aggregate quantity.
pub const DEFAULT_QUANTITY_KEY: &str = "quantity";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    pub print: PrintSettings,
    pub export: ExportSettings,
}

impl DocumentSettings {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        // An empty YAML document deserializes as null
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.export.validate()
    }
}

/// Templates and rendering switches for the printed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    pub title: Option<String>,
    pub header: Option<String>,
    /// Replaces the generated item tables when set.
    pub body: Option<String>,
    pub footer: Option<String>,
    /// Fail on malformed templates and unresolved placeholders.
    pub strict: bool,
    /// HTML-escape substituted values.
    pub escape_values: bool,
}

/// One exported column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

/// Layout and markers for exported rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub title: Option<String>,
    /// Columns in output order. Empty means every key of the group.
    pub columns: Vec<ColumnSpec>,
    pub total_label: String,
    pub file_marker: String,
    pub missing_marker: String,
    pub quantity_key: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            title: None,
            columns: Vec::new(),
            total_label: DEFAULT_TOTAL_LABEL.to_string(),
            file_marker: DEFAULT_FILE_MARKER.to_string(),
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
            quantity_key: DEFAULT_QUANTITY_KEY.to_string(),
        }
    }
}

impl ExportSettings {
    /// Conventions for printed tables: same markers, `Total` label.
    pub fn for_print(&self) -> Self {
        Self {
            total_label: PRINT_TOTAL_LABEL.to_string(),
            ..self.clone()
        }
    }

    /// Keys to show for a group with `group_keys`, in column order.
    pub fn select_keys(&self, group_keys: &[String]) -> Vec<String> {
        if self.columns.is_empty() {
            group_keys.to_vec()
        } else {
            self.columns.iter().map(|c| c.key.clone()).collect()
        }
    }

    /// Header label for `key`.
    pub fn label_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .map_or(key, ColumnSpec::label)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.key.trim().is_empty() {
                return Err(ExportError::settings("export column with an empty key"));
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ExportError::settings(format!(
                    "export column '{}' listed twice",
                    column.key
                )));
            }
        }
        Ok(())
    }
}
