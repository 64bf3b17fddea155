use super::*;
use serde_json::json;

#[test]
fn enum_roundtrips() {
    for kind in FieldKind::ALL {
        assert_eq!(kind.as_str().parse::<FieldKind>().expect("kind"), kind);
    }
    for category in FieldCategory::ORDER {
        assert_eq!(
            category.as_str().parse::<FieldCategory>().expect("category"),
            category
        );
    }
    assert_eq!("textarea".parse::<FieldKind>().expect("alias"), FieldKind::Multiline);
}

#[test]
fn enum_parse_invalid() {
    assert!("date".parse::<FieldKind>().is_err());
    assert!("misc".parse::<FieldCategory>().is_err());
}

#[test]
fn category_rank_follows_display_order() {
    let ranks: Vec<usize> = FieldCategory::ORDER.iter().map(|c| c.rank()).collect();
    assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
}

#[test]
fn item_accepts_numeric_ids_and_comma_tags() {
    let item: Item = serde_json::from_value(json!({
        "sku": "BR-001",
        "name": "Blusa de seda",
        "consignor_id": 42,
        "tags": "verao, seda ,",
        "tecido": "seda",
    }))
    .expect("item");
    assert_eq!(item.consignor_id.as_deref(), Some("42"));
    assert_eq!(item.tags, vec!["verao".to_string(), "seda".to_string()]);
    assert!(item.active);
    assert_eq!(item.extra.get("tecido"), Some(&json!("seda")));
}

#[test]
fn archived_item_is_detected() {
    let item: Item = serde_json::from_value(json!({ "sku": "BR-002", "active": false }))
        .expect("item");
    assert!(item.is_archived());
}

#[test]
fn consignor_rejects_missing_id() {
    let result = serde_json::from_value::<Consignor>(json!({ "id": null, "name": "Ana" }));
    assert!(result.is_err());
}
