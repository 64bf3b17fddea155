use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SaleRequest {
    pub sku: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consignor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sold_at: Option<String>,
}
