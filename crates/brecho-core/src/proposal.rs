use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Record;

/// Catalog entry suggested by the AI service for an item under intake.
///
/// `cadastro` is schema-free: its key set depends on the kind of item
/// (clothing, furniture, electronics, ...) and must be treated as opaque.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct IntakeProposal {
    pub sku: String,
    #[serde(default)]
    pub cadastro: Record,
    #[serde(default)]
    pub price: Option<PriceSuggestion>,
    #[serde(default)]
    pub similar_items: Vec<SimilarItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PriceSuggestion {
    #[serde(default, alias = "minimo", alias = "preco_minimo")]
    pub min: Option<f64>,
    #[serde(default, alias = "maximo", alias = "preco_maximo")]
    pub max: Option<f64>,
    #[serde(default, alias = "sugerido", alias = "preco_sugerido")]
    pub suggested: Option<f64>,
    #[serde(default, alias = "justificativa", alias = "reasoning")]
    pub rationale: Option<String>,
}

/// Previously catalogued item; lower `distance` means more similar.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SimilarItem {
    pub sku: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    pub distance: f64,
}

impl IntakeProposal {
    /// Similar items, most similar first.
    #[must_use]
    pub fn ranked_similar(&self) -> Vec<&SimilarItem> {
        let mut items: Vec<&SimilarItem> = self.similar_items.iter().collect();
        items.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        items
    }
}
