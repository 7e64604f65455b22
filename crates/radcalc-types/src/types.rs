use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calculator argument after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputValue {
    /// Real-valued measurement (HU, cm, mg/dL, ...).
    Float(f64),
    /// Whole-number count or ordinal questionnaire response.
    Integer(i64),
    /// Flag parsed from a truthy/falsy token.
    Boolean(bool),
    /// Canonical tag of a category table entry.
    Tag(&'static str),
}

impl InputValue {
    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            InputValue::Float(_) => "float",
            InputValue::Integer(_) => "integer",
            InputValue::Boolean(_) => "boolean",
            InputValue::Tag(_) => "category",
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            InputValue::Float(f) => Some(*f),
            InputValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view of the value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            InputValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Boolean view of the value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InputValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Category tag view of the value.
    pub fn as_tag(&self) -> Option<&'static str> {
        match self {
            InputValue::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Float(v) => write!(f, "{v}"),
            InputValue::Integer(v) => write!(f, "{v}"),
            InputValue::Boolean(v) => write!(f, "{v}"),
            InputValue::Tag(v) => write!(f, "{v}"),
        }
    }
}

/// A single value in an evaluation result.
///
/// Serialized untagged so the result document carries plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Yes/no interpretation such as `suggests_adenoma`.
    Boolean(bool),
    /// Integral score or grade.
    Integer(i64),
    /// Rounded measurement.
    Float(f64),
    /// Categorical label.
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view of the value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Text view of the value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean view of the value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(fl) => write!(f, "{fl}"),
            FieldValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Ordered output of one successful calculator invocation.
///
/// Field order is the order the calculator emitted them in and is kept when
/// serializing, so the document reads the same way the calculator reports it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationResult {
    fields: Vec<(String, FieldValue)>,
}

impl EvaluationResult {
    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    /// Iterates over `(name, value)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Field names in emission order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(key, _)| key.as_str()).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the result has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for EvaluationResult {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

impl Serialize for EvaluationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Structured failure of one calculator invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    /// Human-readable message, copied verbatim from the underlying error.
    #[serde(rename = "error")]
    pub message: String,
    /// Stable snake_case error kind (`unknown_calculator`, `parse_error`, ...).
    pub kind: String,
    /// Every registered calculator identifier; only set for unknown calculators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<Vec<String>>,
}
