use tracing::{debug, instrument};

use crate::fields::{normalize_key, DynamicField, FieldSet, FieldValue};
use crate::Record;

/// Attributes with dedicated editors; never surfaced as dynamic fields.
pub const STATIC_FIELDS: &[&str] = &[
    "id",
    "sku",
    "name",
    "brand",
    "category",
    "subcategory",
    "condition",
    "size",
    "color",
    "price",
    "cost_price",
    "status",
    "location",
    "description",
    "tags",
    "photos",
    "consignor_id",
    "active",
    "created_at",
    "updated_at",
    DYNAMIC_FIELDS_KEY,
];

/// Nested bag holding the dynamic attributes of a stored item.
pub const DYNAMIC_FIELDS_KEY: &str = "dynamic_fields";

#[must_use]
pub fn is_static_field(key: &str) -> bool {
    let key = normalize_key(key);
    STATIC_FIELDS.contains(&key.as_str())
}

/// Builds the dynamic field set of a flat record, skipping excluded keys and
/// empty values. Excluded keys are compared in normalized form.
#[instrument(level = "debug", skip_all, fields(keys = record.len()))]
pub fn extract_fields(record: &Record, excluded: &[&str]) -> FieldSet {
    let excluded: Vec<String> = excluded.iter().map(|key| normalize_key(key)).collect();
    let mut set = FieldSet::new();
    for (raw_key, raw_value) in record {
        let key = normalize_key(raw_key);
        if key.is_empty() || excluded.contains(&key) {
            continue;
        }
        let Some(value) = FieldValue::from_json(raw_value) else {
            continue;
        };
        // Colliding spellings: the last value wins and is classified afresh.
        let field = DynamicField::classify(&key, value);
        if !set.replace(field.clone()) {
            set.upsert(field);
        }
    }
    debug!(fields = set.len(), "dynamic fields extracted");
    set
}

/// Extraction for stored items: flat attributes first, then any entry of the
/// nested `dynamic_fields` bag the flat shape did not carry.
pub fn extract_item_fields(record: &Record, excluded: &[&str]) -> FieldSet {
    let mut set = extract_fields(record, excluded);
    if let Some(serde_json::Value::Object(bag)) = record.get(DYNAMIC_FIELDS_KEY) {
        for field in &extract_fields(bag, excluded) {
            if !set.contains(&field.key) {
                set.upsert(field.clone());
            }
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldCategory, FieldKind};
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => Record::new(),
        }
    }

    #[test]
    fn static_fields_are_excluded() {
        let source = record(json!({
            "sku": "BR-1",
            "name": "Vestido",
            "price": 80,
            "tecido": "linho",
        }));
        let set = extract_fields(&source, STATIC_FIELDS);
        assert_eq!(set.keys(), vec!["tecido"]);
    }

    #[test]
    fn groups_by_category_and_keeps_source_order() {
        let source = record(json!({
            "estilo": "boho",
            "tecido": "linho",
            "marca_original": "Farm",
            "cor": "Azul",
            "ocasiao": "praia",
            "nome_peca": "Vestido",
        }));
        let set = extract_fields(&source, STATIC_FIELDS);
        assert_eq!(
            set.keys(),
            vec!["marca_original", "nome_peca", "tecido", "cor", "estilo", "ocasiao"]
        );
    }

    #[test]
    fn skips_null_and_empty_values() {
        let source = record(json!({ "cor": null, "tecido": "", "estampa": "floral" }));
        let set = extract_fields(&source, &[]);
        assert_eq!(set.keys(), vec!["estampa"]);
    }

    #[test]
    fn colliding_keys_keep_first_position_and_last_value() {
        let source = record(json!({ "Cor": "Azul", "tecido": "linho", "cor": "Verde" }));
        let set = extract_fields(&source, &[]);
        assert_eq!(set.keys(), vec!["cor", "tecido"]);
        assert_eq!(set.get("cor").map(|f| f.value.clone()), Some(FieldValue::from("Verde")));
    }

    #[test]
    fn colliding_keys_are_reclassified_from_the_winning_value() {
        let source = record(json!({ "Peso": "leve", "cor": "Azul", "peso": 450 }));
        let first = extract_fields(&source, &[]);
        let peso = first.get("peso").expect("peso");
        assert_eq!(peso.kind, FieldKind::Number);
        assert_eq!(peso.value, FieldValue::from(450));
        assert_eq!(first.keys(), vec!["peso", "cor"]);
        let second = extract_fields(&first.to_record(), &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn item_extraction_folds_nested_bag() {
        let source = record(json!({
            "sku": "BR-9",
            "cor": "Azul",
            "dynamic_fields": { "cor": "Azul", "possui_forro": true },
        }));
        let set = extract_item_fields(&source, STATIC_FIELDS);
        assert_eq!(set.keys(), vec!["cor", "possui_forro"]);
        let forro = set.get("possui_forro").expect("forro");
        assert_eq!(forro.kind, FieldKind::Boolean);
        assert_eq!(forro.category, FieldCategory::Dynamic);
    }
}
