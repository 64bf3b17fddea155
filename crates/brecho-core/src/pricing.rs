use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::fields::{normalize_key, FieldValue};
use crate::proposal::PriceSuggestion;
use crate::Record;

pub const PRICE_MINIMUM: &str = "preco_minimo";
pub const PRICE_MAXIMUM: &str = "preco_maximo";
pub const PRICE_SUGGESTED: &str = "preco_sugerido";
pub const PRICE_RATIONALE: &str = "justificativa_preco";

/// Structured price keys and the legacy spellings older consumers still read.
/// Writes through either spelling land on the structured key; both are emitted.
pub const PRICE_ALIASES: &[(&str, &[&str])] = &[
    (PRICE_MINIMUM, &["precoMin"]),
    (PRICE_MAXIMUM, &["precoMax"]),
    (PRICE_SUGGESTED, &["precoSugerido"]),
    (PRICE_RATIONALE, &["justificativaPreco"]),
];

/// Structured key for any spelling of a pricing field.
#[must_use]
pub fn canonical_price_key(key: &str) -> Option<&'static str> {
    let key = normalize_key(key);
    PRICE_ALIASES
        .iter()
        .find(|(canonical, legacy)| {
            *canonical == key || legacy.iter().any(|alias| normalize_key(alias) == key)
        })
        .map(|(canonical, _)| *canonical)
}

#[must_use]
pub fn is_price_key(key: &str) -> bool {
    canonical_price_key(key).is_some()
}

/// Every pricing key spelling, for excluding them from generic extraction.
#[must_use]
pub fn price_keys() -> Vec<&'static str> {
    PRICE_ALIASES
        .iter()
        .flat_map(|(canonical, legacy)| {
            std::iter::once(*canonical).chain(legacy.iter().copied())
        })
        .collect()
}

/// Pricing sub-group, always present in an editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PricingGroup {
    pub minimum: FieldValue,
    pub maximum: FieldValue,
    pub suggested: FieldValue,
    pub rationale: FieldValue,
}

impl PricingGroup {
    /// Loads pricing from a record and the AI suggestion. Per field the
    /// structured key wins, then the legacy key, then the suggestion.
    #[must_use]
    pub fn load(record: &Record, suggestion: Option<&PriceSuggestion>) -> Self {
        let suggestion = suggestion.cloned().unwrap_or_default();
        let mut group = Self {
            minimum: number_value(suggestion.min),
            maximum: number_value(suggestion.max),
            suggested: number_value(suggestion.suggested),
            rationale: suggestion.rationale.map(FieldValue::Text).unwrap_or_default(),
        };
        for (canonical, legacy) in PRICE_ALIASES {
            let structured = lookup_structured(record, canonical, legacy);
            let fallback = legacy
                .iter()
                .find_map(|alias| record.get(*alias).and_then(FieldValue::from_json));
            if let Some(value) = structured.or(fallback) {
                group.set(canonical, value);
            }
        }
        group
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        match canonical_price_key(key)? {
            PRICE_MINIMUM => Some(&self.minimum),
            PRICE_MAXIMUM => Some(&self.maximum),
            PRICE_SUGGESTED => Some(&self.suggested),
            _ => Some(&self.rationale),
        }
    }

    /// Sets a pricing field through any of its spellings; false for other keys.
    pub fn set(&mut self, key: &str, value: FieldValue) -> bool {
        let slot = match canonical_price_key(key) {
            Some(PRICE_MINIMUM) => &mut self.minimum,
            Some(PRICE_MAXIMUM) => &mut self.maximum,
            Some(PRICE_SUGGESTED) => &mut self.suggested,
            Some(_) => &mut self.rationale,
            None => return false,
        };
        *slot = value;
        true
    }

    /// Non-empty pricing fields under both the structured and legacy keys.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        for (canonical, legacy) in PRICE_ALIASES {
            let Some(value) = self.get(canonical).filter(|value| !value.is_empty()) else {
                continue;
            };
            record.insert((*canonical).to_string(), value.to_json());
            for alias in *legacy {
                record.insert((*alias).to_string(), value.to_json());
            }
        }
        record
    }

    /// Keys (structured and legacy) whose value differs from `other`.
    #[must_use]
    pub fn diff(&self, other: &Self) -> Vec<&'static str> {
        PRICE_ALIASES
            .iter()
            .filter(|(canonical, _)| self.get(canonical) != other.get(canonical))
            .map(|(canonical, _)| *canonical)
            .collect()
    }
}

// Some legacy spellings normalize onto the structured key, so they are
// matched by their exact raw name and skipped here.
fn lookup_structured(record: &Record, canonical: &str, legacy: &[&str]) -> Option<FieldValue> {
    let wanted = normalize_key(canonical);
    record
        .iter()
        .filter(|(raw, _)| !legacy.contains(&raw.as_str()))
        .filter(|(raw, _)| normalize_key(raw) == wanted)
        .find_map(|(_, value)| FieldValue::from_json(value))
}

fn number_value(value: Option<f64>) -> FieldValue {
    value
        .and_then(serde_json::Number::from_f64)
        .map(FieldValue::Number)
        .unwrap_or_default()
}
