//! Template value and context types.
//!
//! These types are independent of the catalog and order types. Conversion from
//! order lines to `TemplateValue` happens in the export layer.

use std::collections::HashMap;

/// A value that can be used in template evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TemplateValue {
    /// A string value. Numbers are carried as their printed form.
    String(String),

    /// A boolean value.
    Bool(bool),

    /// A list of values.
    List(Vec<TemplateValue>),

    /// A map of string keys to values.
    Map(HashMap<String, TemplateValue>),

    /// A null/missing value.
    #[default]
    Null,
}

impl TemplateValue {
    /// Build a map value from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TemplateValue)>,
    {
        TemplateValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Whether a conditional block on this value is kept.
    ///
    /// Only null and the empty string count as absent; `false`, `"0"` and
    /// empty lists are present.
    pub fn is_present(&self) -> bool {
        match self {
            TemplateValue::Null => false,
            TemplateValue::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Get a direct field of a map value.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        match self {
            TemplateValue::Map(m) => m.get(key),
            _ => None,
        }
    }

    /// Get a nested field by path.
    ///
    /// For example, `get_path(&["customer", "name"])` on a Map containing
    /// `{"customer": {"name": "ACME"}}` returns the name value.
    pub fn get_path(&self, path: &[&str]) -> Option<&TemplateValue> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.get(first).and_then(|v| v.get_path(rest)),
        }
    }

    /// Render this value as a string for output.
    ///
    /// - String: returned as-is
    /// - Bool: "true" or "false"
    /// - List: rendered elements joined with ","
    /// - Map, Null: ""
    pub fn render(&self) -> String {
        match self {
            TemplateValue::String(s) => s.clone(),
            TemplateValue::Bool(b) => b.to_string(),
            TemplateValue::List(items) => items
                .iter()
                .map(TemplateValue::render)
                .collect::<Vec<_>>()
                .join(","),
            TemplateValue::Map(_) | TemplateValue::Null => String::new(),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        TemplateValue::String(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        TemplateValue::String(s)
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        TemplateValue::Bool(b)
    }
}

impl From<serde_json::Value> for TemplateValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TemplateValue::Null,
            serde_json::Value::Bool(b) => TemplateValue::Bool(b),
            serde_json::Value::Number(n) => TemplateValue::String(n.to_string()),
            serde_json::Value::String(s) => TemplateValue::String(s),
            serde_json::Value::Array(items) => {
                TemplateValue::List(items.into_iter().map(TemplateValue::from).collect())
            }
            serde_json::Value::Object(entries) => TemplateValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, TemplateValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Order-level variables a template is rendered against.
///
/// The `items` variable, when it holds a list, is what `{{#items}}` iterates
/// and what flat placeholders outside the loop consult first.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, TemplateValue>,
}

impl TemplateContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: TemplateValue) {
        self.variables.insert(key.into(), value);
    }

    /// Get a variable from the context.
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.variables.get(key)
    }

    /// Get a variable by path (e.g. `["customer", "name"]`).
    pub fn get_path(&self, path: &[&str]) -> Option<&TemplateValue> {
        let (first, rest) = path.split_first()?;
        self.get(first).and_then(|v| v.get_path(rest))
    }

    /// The list bound to `key`, if it is a list.
    pub fn list(&self, key: &str) -> Option<&[TemplateValue]> {
        match self.get(key) {
            Some(TemplateValue::List(items)) => Some(items),
            _ => None,
        }
    }

    /// Build a context from the entries of a JSON object. Non-object values
    /// give an empty context.
    pub fn from_json(value: serde_json::Value) -> Self {
        let mut ctx = Self::new();
        if let serde_json::Value::Object(entries) = value {
            for (key, value) in entries {
                ctx.insert(key, TemplateValue::from(value));
            }
        }
        ctx
    }
}
