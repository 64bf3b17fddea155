use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Record;

/// Body of `POST /items/bulk` sent by the mobile intake flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct BulkItemsRequest {
    pub items: Vec<Record>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArchiveItemRequest {
    pub active: bool,
}

impl ArchiveItemRequest {
    #[must_use]
    pub fn archive() -> Self {
        Self { active: false }
    }

    #[must_use]
    pub fn restore() -> Self {
        Self { active: true }
    }
}
