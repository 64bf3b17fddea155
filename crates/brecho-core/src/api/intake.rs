use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::FieldKind;
use crate::Record;

/// Body of `POST /ai/intake`: base64 photos plus an optional voice note.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IntakeRequest {
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// Body of `POST /ai/confirm-intake`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConfirmIntakeRequest {
    pub sku: String,
    pub proposal: Record,
    pub images: Vec<String>,
}

/// Body of `POST /ai/dynamic-fields`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DynamicFieldsRequest {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DynamicFieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default = "default_kind", deserialize_with = "lenient_kind")]
    pub kind: FieldKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// The service answers either with a bare list or wrapped in `fields`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DynamicFieldsResponse {
    List(Vec<DynamicFieldDescriptor>),
    Wrapped { fields: Vec<DynamicFieldDescriptor> },
}

impl DynamicFieldsResponse {
    #[must_use]
    pub fn into_fields(self) -> Vec<DynamicFieldDescriptor> {
        match self {
            Self::List(fields) | Self::Wrapped { fields } => fields,
        }
    }
}

fn default_kind() -> FieldKind {
    FieldKind::Text
}

// Unknown widget types from the service degrade to plain text.
fn lenient_kind<'de, D>(deserializer: D) -> Result<FieldKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| value.parse().ok())
        .unwrap_or(FieldKind::Text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptors_accept_both_shapes() {
        let list: DynamicFieldsResponse = serde_json::from_value(json!([
            { "name": "voltagem", "label": "Voltagem", "type": "select", "options": ["110V", "220V"] }
        ]))
        .expect("list");
        let wrapped: DynamicFieldsResponse = serde_json::from_value(json!({
            "fields": [{ "name": "possui_manual", "type": "boolean", "required": true }]
        }))
        .expect("wrapped");
        let list = list.into_fields();
        let wrapped = wrapped.into_fields();
        assert_eq!(list[0].kind, FieldKind::Select);
        assert_eq!(list[0].options.len(), 2);
        assert_eq!(wrapped[0].kind, FieldKind::Boolean);
        assert!(wrapped[0].required);
    }

    #[test]
    fn unknown_descriptor_type_falls_back_to_text() {
        let descriptor: DynamicFieldDescriptor =
            serde_json::from_value(json!({ "name": "data_compra", "type": "date" }))
                .expect("descriptor");
        assert_eq!(descriptor.kind, FieldKind::Text);
    }
}
