//! Specification values.
//!
//! A value is classified once, when it is deserialized. An object that looks
//! like an upload (a `url`, or a `name` with a `type` or `size`) becomes a
//! [`FileReference`]; everything else, lists and other objects included, is a
//! [`PlainValue`]. Classification never fails, so a malformed file entry
//! cannot abort loading an order. Later stages match on the variant instead
//! of sniffing shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A committed specification value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SpecValue {
    /// An uploaded file attached to the specification field.
    File(FileReference),

    /// Any other value entered by an operator or carried by the catalog.
    Plain(PlainValue),
}

/// A non-file specification value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlainValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Multi-select and other list values.
    List(Vec<SpecValue>),
    /// Objects that are not file references, e.g. `refer` or `link` payloads.
    Other(Value),
}

/// Metadata of an uploaded file.
///
/// The blob behind `url` is owned by the presentation layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileReference {
    /// Read a file reference out of a JSON object, if it looks like one.
    ///
    /// Missing or mistyped fields fall back to their defaults.
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
        let has_url = object.contains_key("url");
        let has_name = object.contains_key("name");
        let has_meta = object.contains_key("type") || object.contains_key("size");
        if !(has_url || (has_name && has_meta)) {
            return None;
        }

        Some(FileReference {
            name: text("name").unwrap_or_default(),
            url: text("url").unwrap_or_default(),
            mime_type: text("type"),
            size: object.get("size").and_then(Value::as_u64),
        })
    }
}

impl<'de> Deserialize<'de> for SpecValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(SpecValue::from)
    }
}

impl From<Value> for SpecValue {
    fn from(value: Value) -> Self {
        let plain = match value {
            Value::Null => PlainValue::Null,
            Value::Bool(b) => PlainValue::Bool(b),
            Value::Number(n) => match n.as_f64() {
                Some(n) => PlainValue::Number(n),
                None => PlainValue::Text(n.to_string()),
            },
            Value::String(s) => PlainValue::Text(s),
            Value::Array(items) => {
                PlainValue::List(items.into_iter().map(SpecValue::from).collect())
            }
            Value::Object(object) => match FileReference::from_object(&object) {
                Some(file) => return SpecValue::File(file),
                None => PlainValue::Other(Value::Object(object)),
            },
        };
        SpecValue::Plain(plain)
    }
}

impl SpecValue {
    /// The empty string, used as the starting value when nothing else applies.
    pub fn empty() -> Self {
        SpecValue::Plain(PlainValue::Text(String::new()))
    }

    pub fn text(s: impl Into<String>) -> Self {
        SpecValue::Plain(PlainValue::Text(s.into()))
    }

    pub fn number(n: f64) -> Self {
        SpecValue::Plain(PlainValue::Number(n))
    }

    pub fn null() -> Self {
        SpecValue::Plain(PlainValue::Null)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, SpecValue::File(_))
    }

    pub fn as_file(&self) -> Option<&FileReference> {
        match self {
            SpecValue::File(file) => Some(file),
            SpecValue::Plain(_) => None,
        }
    }

    /// True for null, the empty string and the empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            SpecValue::Plain(PlainValue::Null) => true,
            SpecValue::Plain(PlainValue::Text(s)) => s.is_empty(),
            SpecValue::Plain(PlainValue::List(items)) => items.is_empty(),
            _ => false,
        }
    }

    /// Numeric reading of the value, following `parseFloat` rules for text.
    ///
    /// Booleans, nulls and files never read as numbers. The result may be
    /// infinite (`"Infinity"`); callers that need a finite number check for it.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SpecValue::Plain(PlainValue::Number(n)) if !n.is_nan() => Some(*n),
            SpecValue::Plain(PlainValue::Text(s)) => parse_float(s),
            _ => None,
        }
    }

    /// True when the value reads as a finite number.
    pub fn is_finite_number(&self) -> bool {
        self.as_number().is_some_and(f64::is_finite)
    }
}

impl Default for SpecValue {
    fn default() -> Self {
        SpecValue::empty()
    }
}

impl fmt::Display for SpecValue {
    /// Plain text rendering. Files render as their file name; rendering
    /// surfaces that must not show file names substitute a marker themselves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecValue::File(file) => write!(f, "{}", file.name),
            SpecValue::Plain(PlainValue::Null) => Ok(()),
            SpecValue::Plain(PlainValue::Bool(b)) => write!(f, "{b}"),
            SpecValue::Plain(PlainValue::Number(n)) => write!(f, "{}", format_number(*n)),
            SpecValue::Plain(PlainValue::Text(s)) => write!(f, "{s}"),
            SpecValue::Plain(PlainValue::List(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            SpecValue::Plain(PlainValue::Other(value)) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for SpecValue {
    fn from(s: &str) -> Self {
        SpecValue::text(s)
    }
}

impl From<String> for SpecValue {
    fn from(s: String) -> Self {
        SpecValue::text(s)
    }
}

impl From<f64> for SpecValue {
    fn from(n: f64) -> Self {
        SpecValue::number(n)
    }
}

impl From<bool> for SpecValue {
    fn from(b: bool) -> Self {
        SpecValue::Plain(PlainValue::Bool(b))
    }
}

impl From<FileReference> for SpecValue {
    fn from(file: FileReference) -> Self {
        SpecValue::File(file)
    }
}

/// Parse the longest numeric prefix of `s`, like JavaScript's `parseFloat`.
///
/// Leading whitespace is skipped, trailing garbage is ignored (`"3.5kg"` is
/// `3.5`), and `"Infinity"` with an optional sign is accepted. Returns `None`
/// when no digits can be read.
pub fn parse_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    if s[pos..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &s[frac_start..end];
        if !int_digits.is_empty() || !frac_digits.is_empty() {
            pos = end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = "";
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &s[pos..end];
        }
    }

    let normalized = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        exponent
    );
    normalized.parse::<f64>().ok()
}

/// Format a number the way the order documents print it: integers without a
/// trailing `.0`, no negative zero, `Infinity`/`NaN` spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}
