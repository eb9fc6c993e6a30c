//! Catalog records.
//!
//! The catalog is reference data fetched and cached outside the engine. These
//! types only describe its shape and offer id lookups.

use crate::spec::SpecificationDefinition;
use serde::{Deserialize, Serialize};

/// A selectable catalog entry with its own live specification values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOption {
    pub id: String,

    #[serde(default)]
    pub name: String,

    pub option_type_id: String,

    #[serde(default)]
    pub option_type_name: String,

    /// Spec definitions with values populated. `None` when the record has no
    /// dimensions array at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Vec<SpecificationDefinition>>,

    /// Direct link to an [`OptionSpec`]; may dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_spec_id: Option<String>,

    /// The option's type, when the catalog embeds it in the record.
    #[serde(
        default,
        alias = "optionType",
        skip_serializing_if = "Option::is_none"
    )]
    pub option_type_ref: Option<OptionType>,
}

/// A named, reusable bundle of specification definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub option_type_id: String,

    /// Reverse link to a specific option, used when the option itself does
    /// not carry an `optionSpecId`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_id: Option<String>,

    #[serde(default)]
    pub specifications: Vec<SpecificationDefinition>,
}

/// A category of options and its specification template.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionType {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Template definitions: names and defaults, no live values.
    #[serde(default)]
    pub specifications: Vec<SpecificationDefinition>,
}

/// Already-fetched catalog data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecCatalog {
    #[serde(default)]
    pub options: Vec<CatalogOption>,

    #[serde(default)]
    pub option_specs: Vec<OptionSpec>,

    #[serde(default)]
    pub option_types: Vec<OptionType>,
}

impl SpecCatalog {
    pub fn new(
        options: Vec<CatalogOption>,
        option_specs: Vec<OptionSpec>,
        option_types: Vec<OptionType>,
    ) -> Self {
        Self {
            options,
            option_specs,
            option_types,
        }
    }

    pub fn option(&self, id: &str) -> Option<&CatalogOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn option_spec(&self, id: &str) -> Option<&OptionSpec> {
        self.option_specs.iter().find(|s| s.id == id)
    }

    pub fn option_type(&self, id: &str) -> Option<&OptionType> {
        self.option_types.iter().find(|t| t.id == id)
    }

    /// The option's type template: the embedded record if present, otherwise
    /// a lookup by `option_type_id`.
    pub fn option_type_for<'a>(&'a self, option: &'a CatalogOption) -> Option<&'a OptionType> {
        option
            .option_type_ref
            .as_ref()
            .or_else(|| self.option_type(&option.option_type_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SpecCatalog {
        SpecCatalog::new(
            vec![
                CatalogOption {
                    id: "opt-1".into(),
                    option_type_id: "type-1".into(),
                    ..CatalogOption::default()
                },
                CatalogOption {
                    id: "opt-2".into(),
                    option_type_id: "type-1".into(),
                    option_type_ref: Some(OptionType {
                        id: "embedded".into(),
                        ..OptionType::default()
                    }),
                    ..CatalogOption::default()
                },
            ],
            vec![],
            vec![OptionType {
                id: "type-1".into(),
                ..OptionType::default()
            }],
        )
    }

    #[test]
    fn test_lookups() {
        let catalog = catalog();
        assert!(catalog.option("opt-1").is_some());
        assert!(catalog.option("missing").is_none());
        assert!(catalog.option_spec("missing").is_none());
    }

    #[test]
    fn test_option_type_for_prefers_embedded_record() {
        let catalog = catalog();
        let plain = catalog.option("opt-1").unwrap();
        let embedded = catalog.option("opt-2").unwrap();

        assert_eq!(catalog.option_type_for(plain).unwrap().id, "type-1");
        assert_eq!(catalog.option_type_for(embedded).unwrap().id, "embedded");
    }

    #[test]
    fn test_missing_dimensions_deserialize_as_none() {
        let option: CatalogOption =
            serde_json::from_str(r#"{"id": "o", "optionTypeId": "t"}"#).unwrap();
        assert!(option.dimensions.is_none());
        assert!(option.option_spec_id.is_none());
    }
}
