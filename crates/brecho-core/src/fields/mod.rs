pub mod classify;
pub mod extract;
pub mod value;

pub use classify::*;
pub use extract::*;
pub use value::*;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{FieldCategory, FieldKind};
use crate::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DynamicField {
    pub key: String,
    pub display_name: String,
    pub kind: FieldKind,
    pub category: FieldCategory,
    pub value: FieldValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl DynamicField {
    /// Derives kind, category, label and options from the key and value alone.
    #[must_use]
    pub fn classify(key: &str, value: FieldValue) -> Self {
        let key = normalize_key(key);
        let kind = infer_kind(&key, &value);
        let options = match kind {
            FieldKind::Select => select_options(&key)
                .unwrap_or_default()
                .iter()
                .map(|option| (*option).to_string())
                .collect(),
            _ => Vec::new(),
        };
        Self {
            display_name: display_name(&key),
            category: infer_category(&key),
            key,
            kind,
            value,
            options,
        }
    }

    /// A user-declared field: the kind is chosen, the category is still inferred.
    #[must_use]
    pub fn custom(key: &str, kind: FieldKind, options: Vec<String>) -> Self {
        let key = normalize_key(key);
        let value = match kind {
            FieldKind::Boolean => FieldValue::Boolean(false),
            _ => FieldValue::empty(),
        };
        let options = match (kind, options.is_empty()) {
            (FieldKind::Select, true) => select_options(&key)
                .unwrap_or_default()
                .iter()
                .map(|option| (*option).to_string())
                .collect(),
            (FieldKind::Select, false) => options,
            _ => Vec::new(),
        };
        Self {
            display_name: display_name(&key),
            category: infer_category(&key),
            key,
            kind,
            value,
            options,
        }
    }
}

/// Ordered, key-unique set of dynamic fields. Fields stay grouped by
/// category in display order; insertion order holds within a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FieldSet {
    fields: Vec<DynamicField>,
}

impl FieldSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DynamicField> {
        self.fields.iter()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DynamicField> {
        let key = normalize_key(key);
        self.fields.iter().find(|field| field.key == key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.key.as_str()).collect()
    }

    /// Inserts a new field or replaces the value of an existing one. An
    /// existing field keeps its position, kind and category.
    pub fn upsert(&mut self, field: DynamicField) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.key == field.key) {
            existing.value = field.value;
            return;
        }
        self.fields.push(field);
        self.fields.sort_by_key(|field| field.category.rank());
    }

    /// Swaps out the whole field stored under the same key, keeping its
    /// position. Returns false when the key is absent.
    pub fn replace(&mut self, field: DynamicField) -> bool {
        match self.fields.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => {
                *existing = field;
                true
            }
            None => false,
        }
    }

    /// Overwrites the value of an existing field, returning false when absent.
    pub fn set_value(&mut self, key: &str, value: FieldValue) -> bool {
        let key = normalize_key(key);
        match self.fields.iter_mut().find(|field| field.key == key) {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<DynamicField> {
        let key = normalize_key(key);
        let index = self.fields.iter().position(|field| field.key == key)?;
        Some(self.fields.remove(index))
    }

    /// Fields bucketed by category, empty categories omitted.
    #[must_use]
    pub fn grouped(&self) -> Vec<(FieldCategory, Vec<&DynamicField>)> {
        FieldCategory::ORDER
            .iter()
            .filter_map(|category| {
                let fields: Vec<&DynamicField> = self
                    .fields
                    .iter()
                    .filter(|field| field.category == *category)
                    .collect();
                (!fields.is_empty()).then_some((*category, fields))
            })
            .collect()
    }

    /// Key/value record of every field that holds a value.
    #[must_use]
    pub fn to_record(&self) -> Record {
        self.fields
            .iter()
            .filter(|field| !field.value.is_empty())
            .map(|field| (field.key.clone(), field.value.to_json()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a DynamicField;
    type IntoIter = std::slice::Iter<'a, DynamicField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_idempotent() {
        let field = DynamicField::classify("Condição", FieldValue::from("A"));
        assert_eq!(field.key, "condicao");
        assert_eq!(field.kind, FieldKind::Select);
        assert_eq!(field.category, FieldCategory::Basic);
        assert_eq!(field.options, vec!["A", "B", "C", "D"]);
        let again = DynamicField::classify(&field.key, field.value.clone());
        assert_eq!(again, field);
    }

    #[test]
    fn upsert_keeps_category_grouping() {
        let mut set = FieldSet::new();
        set.upsert(DynamicField::classify("estilo", FieldValue::from("boho")));
        set.upsert(DynamicField::classify("cor", FieldValue::from("Azul")));
        set.upsert(DynamicField::classify("marca", FieldValue::from("Farm")));
        set.upsert(DynamicField::classify("tecido", FieldValue::from("linho")));
        assert_eq!(set.keys(), vec!["marca", "cor", "tecido", "estilo"]);
    }

    #[test]
    fn upsert_existing_key_overwrites_value_in_place() {
        let mut set = FieldSet::new();
        set.upsert(DynamicField::classify("cor", FieldValue::from("Azul")));
        set.upsert(DynamicField::classify("tecido", FieldValue::from("linho")));
        set.upsert(DynamicField::classify("Cor", FieldValue::from("Verde")));
        assert_eq!(set.len(), 2);
        assert_eq!(set.keys(), vec!["cor", "tecido"]);
        assert_eq!(set.get("cor").map(|f| &f.value), Some(&FieldValue::from("Verde")));
    }

    #[test]
    fn custom_select_uses_given_options() {
        let field = DynamicField::custom(
            "Ocasião",
            FieldKind::Select,
            vec!["festa".to_string(), "praia".to_string()],
        );
        assert_eq!(field.key, "ocasiao");
        assert_eq!(field.options, vec!["festa", "praia"]);
        assert!(field.value.is_empty());
    }

    #[test]
    fn to_record_skips_empty_values() {
        let mut set = FieldSet::new();
        set.upsert(DynamicField::custom("estilo", FieldKind::Text, Vec::new()));
        set.upsert(DynamicField::classify("cor", FieldValue::from("Azul")));
        let record = set.to_record();
        assert_eq!(record.len(), 1);
        assert!(record.contains_key("cor"));
    }
}
