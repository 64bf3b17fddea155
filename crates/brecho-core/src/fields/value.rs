use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::FieldKind;

/// Scalar value held by a dynamic field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Converts a raw record value. `None` means the value carries nothing to show:
    /// null or an empty string. Structured values are kept as their JSON text.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Boolean(*flag)),
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Array(_) | Value::Object(_) => Some(Self::Text(value.to_string())),
        }
    }

    /// Interprets user input for a field of the given kind.
    #[must_use]
    pub fn parse_for(kind: FieldKind, raw: &str) -> Self {
        match kind {
            FieldKind::Boolean => match parse_bool(raw) {
                Some(flag) => Self::Boolean(flag),
                None => Self::Text(raw.to_string()),
            },
            FieldKind::Number => {
                parse_number(raw).map_or_else(|| Self::Text(raw.to_string()), Self::Number)
            }
            FieldKind::Text | FieldKind::Multiline | FieldKind::Select => {
                Self::Text(raw.to_string())
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Boolean(flag) => Value::Bool(*flag),
            Self::Number(number) => Value::Number(number.clone()),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(true) => f.write_str("sim"),
            Self::Boolean(false) => f.write_str("não"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "sim" | "s" => Some(true),
        "0" | "false" | "no" | "off" | "não" | "nao" | "n" => Some(false),
        _ => None,
    }
}

fn parse_number(value: &str) -> Option<serde_json::Number> {
    let value = value.trim();
    if let Ok(int) = value.parse::<i64>() {
        return Some(int.into());
    }
    // Decimal comma is the local convention for prices.
    let value = value.replace(',', ".");
    value
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
}
