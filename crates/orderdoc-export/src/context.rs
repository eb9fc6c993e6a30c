//! Conversion of an order into a template context.

use indexmap::IndexMap;
use orderdoc_template::{TemplateContext, TemplateValue};
use orderdoc_types::{OptionItem, PlainValue, SpecValue, format_number};
use serde::{Deserialize, Serialize};

/// An order as handed to the rendering surfaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDocument {
    /// Order-level metadata (order id, customer, notes, ...).
    pub meta: IndexMap<String, serde_json::Value>,
    pub items: Vec<OptionItem>,
}

impl OrderDocument {
    pub fn new(items: Vec<OptionItem>) -> Self {
        Self {
            meta: IndexMap::new(),
            items,
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// A metadata value as display text, if it is a scalar.
    pub fn meta_text(&self, key: &str) -> Option<String> {
        match self.meta.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Build the template context.
    ///
    /// Metadata is exposed at the top level. `items` is a list where each
    /// entry has `id`, `optionId`, `optionName`, `optionTypeId`,
    /// `optionTypeName` and its spec values under both `dim` and
    /// `specificationValues`. File values appear as `file_marker`.
    pub fn to_template_context(&self, file_marker: &str) -> TemplateContext {
        let mut ctx = TemplateContext::new();
        for (key, value) in &self.meta {
            ctx.insert(key.clone(), TemplateValue::from(value.clone()));
        }
        ctx.insert(
            "items",
            TemplateValue::List(
                self.items
                    .iter()
                    .map(|item| item_value(item, file_marker))
                    .collect(),
            ),
        );
        ctx.insert("itemCount", TemplateValue::String(self.items.len().to_string()));
        ctx
    }
}

fn item_value(item: &OptionItem, file_marker: &str) -> TemplateValue {
    let values = TemplateValue::map(
        item.specification_values
            .iter()
            .map(|(key, value)| (key.clone(), spec_value(value, file_marker))),
    );

    TemplateValue::map([
        ("id", TemplateValue::from(item.id.as_str())),
        ("optionId", TemplateValue::from(item.option_id.as_str())),
        ("optionName", TemplateValue::from(item.option_name.as_str())),
        ("optionTypeId", TemplateValue::from(item.option_type_id.as_str())),
        ("optionTypeName", TemplateValue::from(item.option_type_name.as_str())),
        ("dim", values.clone()),
        ("specificationValues", values),
    ])
}

fn spec_value(value: &SpecValue, file_marker: &str) -> TemplateValue {
    match value {
        SpecValue::File(_) => TemplateValue::from(file_marker),
        SpecValue::Plain(PlainValue::Null) => TemplateValue::Null,
        SpecValue::Plain(PlainValue::Bool(b)) => TemplateValue::Bool(*b),
        SpecValue::Plain(PlainValue::Number(n)) => TemplateValue::String(format_number(*n)),
        SpecValue::Plain(PlainValue::Text(s)) => TemplateValue::from(s.as_str()),
        SpecValue::Plain(PlainValue::List(values)) => TemplateValue::List(
            values
                .iter()
                .map(|value| spec_value(value, file_marker))
                .collect(),
        ),
        SpecValue::Plain(PlainValue::Other(value)) => TemplateValue::from(value.clone()),
    }
}
