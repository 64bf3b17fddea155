use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateConsignorRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConsignorQrRequest {
    pub consignor_id: String,
    pub size: u32,
}

/// Base64 PNG identifying a consignor; photographed next to intake items.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConsignorQrResponse {
    #[serde(alias = "qr", alias = "image")]
    pub qr_code: String,
}
