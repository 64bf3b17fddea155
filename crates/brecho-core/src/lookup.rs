use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::fields::fold_diacritics;
use crate::models::{Consignor, Item, Sale};

/// Shown in place of a cross-resource reference that does not resolve.
pub const MISSING_REFERENCE: &str = "N/A";

/// In-memory filter over a fetched item list.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub consignor_id: Option<String>,
    pub include_archived: bool,
}

impl ItemFilter {
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        if item.is_archived() && !self.include_archived {
            return false;
        }
        if let Some(status) = self.status.as_deref() {
            let matches = item
                .status
                .as_deref()
                .is_some_and(|value| value.eq_ignore_ascii_case(status));
            if !matches {
                return false;
            }
        }
        if let Some(consignor_id) = self.consignor_id.as_deref() {
            if item.consignor_id.as_deref() != Some(consignor_id) {
                return false;
            }
        }
        match self.search.as_deref().map(searchable) {
            Some(needle) if !needle.is_empty() => [
                Some(item.sku.as_str()),
                item.name.as_deref(),
                item.brand.as_deref(),
                item.category.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|haystack| searchable(haystack).contains(&needle)),
            _ => true,
        }
    }

    #[must_use]
    pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

fn searchable(value: &str) -> String {
    fold_diacritics(value).to_lowercase()
}

/// Lookup tables over fetched resources, tolerant to dangling references.
#[derive(Debug, Default)]
pub struct Directory<'a> {
    consignors: HashMap<&'a str, &'a Consignor>,
    items: HashMap<&'a str, &'a Item>,
}

impl<'a> Directory<'a> {
    #[must_use]
    pub fn new(consignors: &'a [Consignor], items: &'a [Item]) -> Self {
        Self {
            consignors: consignors.iter().map(|c| (c.id.as_str(), c)).collect(),
            items: items.iter().map(|i| (i.sku.as_str(), i)).collect(),
        }
    }

    #[must_use]
    pub fn consignor_name(&self, consignor_id: Option<&str>) -> &'a str {
        consignor_id
            .and_then(|id| self.consignors.get(id))
            .map_or(MISSING_REFERENCE, |consignor| consignor.name.as_str())
    }

    #[must_use]
    pub fn item_name(&self, sku: &str) -> &'a str {
        self.items
            .get(sku)
            .and_then(|item| item.name.as_deref())
            .unwrap_or(MISSING_REFERENCE)
    }

    /// Consignor of a sale, falling back to the consignor of the sold item.
    #[must_use]
    pub fn sale_consignor(&self, sale: &Sale) -> Option<&'a str> {
        if let Some(id) = sale.consignor_id.as_deref() {
            return self.consignors.get(id).map(|c| c.id.as_str());
        }
        self.items
            .get(sale.sku.as_str())
            .and_then(|item| item.consignor_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SalesSummary {
    pub count: usize,
    pub revenue: f64,
    pub by_consignor: BTreeMap<String, f64>,
}

impl SalesSummary {
    /// Totals sales, optionally only those sold at or after `since`. Sales
    /// with an unreadable date are counted only when no cutoff is given.
    #[must_use]
    pub fn compute(sales: &[Sale], directory: &Directory<'_>, since: Option<DateTime<Utc>>) -> Self {
        let mut summary = Self::default();
        for sale in sales {
            if let Some(since) = since {
                let sold_at = sale.sold_at.as_deref().and_then(parse_rfc3339);
                if !sold_at.is_some_and(|sold_at| sold_at >= since) {
                    continue;
                }
            }
            summary.count += 1;
            summary.revenue += sale.price;
            let consignor = directory
                .sale_consignor(sale)
                .map_or(MISSING_REFERENCE, |id| directory.consignor_name(Some(id)));
            *summary
                .by_consignor
                .entry(consignor.to_string())
                .or_insert(0.0) += sale.price;
        }
        summary
    }
}

#[must_use]
pub fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<Item> {
        serde_json::from_value(json!([
            { "sku": "BR-1", "name": "Blusa de Seda", "brand": "Farm", "status": "available", "consignor_id": "c1" },
            { "sku": "BR-2", "name": "Calça jeans", "brand": "Levi's", "status": "sold", "consignor_id": "c2" },
            { "sku": "BR-3", "name": "Casaco", "status": "available", "active": false, "consignor_id": "c1" },
            { "sku": "BR-4", "name": "Saia", "consignor_id": "ghost" },
        ]))
        .expect("items")
    }

    fn consignors() -> Vec<Consignor> {
        serde_json::from_value(json!([
            { "id": "c1", "name": "Ana" },
            { "id": 2, "name": "Bia" },
        ]))
        .expect("consignors")
    }

    #[test]
    fn archived_items_hidden_by_default() {
        let items = items();
        let visible = ItemFilter::default().apply(&items);
        assert_eq!(visible.len(), 3);
        let all = ItemFilter {
            include_archived: true,
            ..ItemFilter::default()
        }
        .apply(&items);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn search_ignores_case_and_accents() {
        let items = items();
        let filter = ItemFilter {
            search: Some("CALCA".to_string()),
            ..ItemFilter::default()
        };
        let found = filter.apply(&items);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sku, "BR-2");
    }

    #[test]
    fn status_and_consignor_filters_combine() {
        let items = items();
        let filter = ItemFilter {
            status: Some("AVAILABLE".to_string()),
            consignor_id: Some("c1".to_string()),
            include_archived: true,
            ..ItemFilter::default()
        };
        let skus: Vec<&str> = filter.apply(&items).iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, vec!["BR-1", "BR-3"]);
    }

    #[test]
    fn dangling_references_fall_back_to_placeholder() {
        let items = items();
        let consignors = consignors();
        let directory = Directory::new(&consignors, &items);
        assert_eq!(directory.consignor_name(Some("c1")), "Ana");
        assert_eq!(directory.consignor_name(Some("2")), "Bia");
        assert_eq!(directory.consignor_name(Some("ghost")), MISSING_REFERENCE);
        assert_eq!(directory.consignor_name(None), MISSING_REFERENCE);
        assert_eq!(directory.item_name("BR-404"), MISSING_REFERENCE);
    }

    #[test]
    fn sales_summary_groups_by_consignor_and_honors_cutoff() {
        let items = items();
        let consignors = consignors();
        let directory = Directory::new(&consignors, &items);
        let sales: Vec<Sale> = serde_json::from_value(json!([
            { "id": 1, "sku": "BR-1", "price": 50.0, "sold_at": "2026-03-01T10:00:00Z" },
            { "id": 2, "sku": "BR-2", "price": 80.0, "consignor_id": 2, "sold_at": "2026-01-10T10:00:00Z" },
            { "id": 3, "sku": "BR-4", "price": 20.0, "sold_at": "ontem" },
        ]))
        .expect("sales");

        let summary = SalesSummary::compute(&sales, &directory, None);
        assert_eq!(summary.count, 3);
        assert!((summary.revenue - 150.0).abs() < f64::EPSILON);
        assert_eq!(summary.by_consignor.get("Ana"), Some(&50.0));
        assert_eq!(summary.by_consignor.get("Bia"), Some(&80.0));
        assert_eq!(summary.by_consignor.get(MISSING_REFERENCE), Some(&20.0));

        let since = parse_rfc3339("2026-02-01T00:00:00Z");
        let recent = SalesSummary::compute(&sales, &directory, since);
        assert_eq!(recent.count, 1);
        assert!((recent.revenue - 50.0).abs() < f64::EPSILON);
    }
}
