use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Record;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Item {
    pub sku: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "tags_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub consignor_id: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub dynamic_fields: Record,
    #[serde(flatten)]
    pub extra: Record,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Consignor {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub commission_percent: Option<f64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Sale {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
    pub sku: String,
    #[serde(default, deserialize_with = "optional_id")]
    pub consignor_id: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub sold_at: Option<String>,
}

impl Item {
    #[must_use]
    pub fn is_archived(&self) -> bool {
        !self.active
    }
}

fn default_true() -> bool {
    true
}

fn id_from_value(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(value) if !value.trim().is_empty() => Some(value),
        serde_json::Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

// The backend hands out numeric ids on some resources and string ids on others.
fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(id_from_value(value))
}

fn required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    id_from_value(value).ok_or_else(|| serde::de::Error::custom("id must be a string or number"))
}

fn tags_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(values) => values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::String(tag) => Some(tag),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        serde_json::Value::String(value) => value
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    })
}
