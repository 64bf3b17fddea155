use tracing::{debug, info};

use crate::api::DynamicFieldDescriptor;
use crate::fields::{
    extract_item_fields, is_static_field, normalize_key, DynamicField, FieldSet, FieldValue,
    DYNAMIC_FIELDS_KEY, STATIC_FIELDS,
};
use crate::models::FieldKind;
use crate::pricing::{
    canonical_price_key, is_price_key, price_keys, PricingGroup, PRICE_ALIASES, PRICE_RATIONALE,
};
use crate::proposal::IntakeProposal;
use crate::submission::Photo;
use crate::Record;

pub const CONSIGNOR_KEY: &str = "consignor_id";
const SKU_KEY: &str = "sku";
const ID_KEY: &str = "id";

/// Keys kept out of the generic dynamic field list in the editors: the
/// static attributes plus every pricing spelling.
#[must_use]
pub fn editor_exclusions() -> Vec<&'static str> {
    STATIC_FIELDS.iter().copied().chain(price_keys()).collect()
}

/// Where a `set_field` write landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    Static,
    Pricing,
    Dynamic,
    Ignored,
}

#[derive(Debug, Clone)]
enum SessionSource {
    Proposal(IntakeProposal),
    Item(Record),
}

#[derive(Debug, Clone)]
struct Snapshot {
    statics: Record,
    fields: FieldSet,
    pricing: PricingGroup,
}

impl SessionSource {
    fn snapshot(&self) -> Snapshot {
        let exclusions = editor_exclusions();
        match self {
            Self::Proposal(proposal) => Snapshot {
                statics: static_attributes(&proposal.cadastro),
                fields: extract_item_fields(&proposal.cadastro, &exclusions),
                pricing: PricingGroup::load(&proposal.cadastro, proposal.price.as_ref()),
            },
            Self::Item(record) => Snapshot {
                statics: static_attributes(record),
                fields: extract_item_fields(record, &exclusions),
                pricing: PricingGroup::load(record, None),
            },
        }
    }
}

/// Single-user editing session over one item: the intake review form (seeded
/// from an AI proposal) or the item editor (seeded from a stored record).
///
/// Writes are last-write-wins per key. The source is kept so the session can
/// be reset and so edits can be diffed against it.
#[derive(Debug, Clone)]
pub struct EditSession {
    source: SessionSource,
    sku: String,
    pub(crate) statics: Record,
    pub(crate) fields: FieldSet,
    pub(crate) pricing: PricingGroup,
    pub(crate) required: Vec<String>,
    pub(crate) photos: Vec<Photo>,
}

impl EditSession {
    #[must_use]
    pub fn from_proposal(proposal: IntakeProposal) -> Self {
        let sku = proposal.sku.trim().to_string();
        Self::from_source(SessionSource::Proposal(proposal), sku)
    }

    #[must_use]
    pub fn from_item(record: Record) -> Self {
        let sku = record
            .get(SKU_KEY)
            .and_then(value_as_string)
            .unwrap_or_default();
        Self::from_source(SessionSource::Item(record), sku)
    }

    fn from_source(source: SessionSource, sku: String) -> Self {
        let snapshot = source.snapshot();
        debug!(
            sku = %sku,
            fields = snapshot.fields.len(),
            "edit session opened"
        );
        Self {
            source,
            sku,
            statics: snapshot.statics,
            fields: snapshot.fields,
            pricing: snapshot.pricing,
            required: Vec::new(),
            photos: Vec::new(),
        }
    }

    #[must_use]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    #[must_use]
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    #[must_use]
    pub fn pricing(&self) -> &PricingGroup {
        &self.pricing
    }

    #[must_use]
    pub fn statics(&self) -> &Record {
        &self.statics
    }

    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    #[must_use]
    pub fn required_fields(&self) -> &[String] {
        &self.required
    }

    #[must_use]
    pub fn proposal(&self) -> Option<&IntakeProposal> {
        match &self.source {
            SessionSource::Proposal(proposal) => Some(proposal),
            SessionSource::Item(_) => None,
        }
    }

    /// Reads a value through any spelling of its key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        let normalized = normalize_key(key);
        if normalized == SKU_KEY {
            return Some(FieldValue::Text(self.sku.clone()));
        }
        if is_static_field(&normalized) {
            return self.statics.get(&normalized).and_then(FieldValue::from_json);
        }
        if let Some(value) = self.pricing.get(key) {
            return Some(value.clone());
        }
        self.fields.get(&normalized).map(|field| field.value.clone())
    }

    /// Upserts a value. Static attributes and pricing fields are routed to
    /// their groups; anything else is a dynamic field. The sku is immutable.
    pub fn set_field(&mut self, key: &str, value: FieldValue) -> FieldTarget {
        let normalized = normalize_key(key);
        if normalized.is_empty() || normalized == SKU_KEY || normalized == ID_KEY {
            return FieldTarget::Ignored;
        }
        if normalized == DYNAMIC_FIELDS_KEY {
            return FieldTarget::Ignored;
        }
        if is_static_field(&normalized) {
            self.statics.insert(normalized, value.to_json());
            return FieldTarget::Static;
        }
        if self.pricing.set(key, value.clone()) {
            return FieldTarget::Pricing;
        }
        if !self.fields.set_value(&normalized, value.clone()) {
            self.fields.upsert(DynamicField::classify(&normalized, value));
        }
        FieldTarget::Dynamic
    }

    /// Parses raw user input according to the target field before writing it.
    pub fn set_field_input(&mut self, key: &str, raw: &str) -> FieldTarget {
        let value = match self.input_kind(key) {
            Some(kind) => FieldValue::parse_for(kind, raw),
            None => FieldValue::Text(raw.to_string()),
        };
        self.set_field(key, value)
    }

    fn input_kind(&self, key: &str) -> Option<FieldKind> {
        let normalized = normalize_key(key);
        match normalized.as_str() {
            "price" | "cost_price" => return Some(FieldKind::Number),
            "active" => return Some(FieldKind::Boolean),
            _ => {}
        }
        match canonical_price_key(key) {
            Some(PRICE_RATIONALE) => return Some(FieldKind::Multiline),
            Some(_) => return Some(FieldKind::Number),
            None => {}
        }
        self.fields.get(&normalized).map(|field| field.kind)
    }

    /// Adds an empty user-declared field. Returns the derived key, or `None`
    /// when the name is blank or collides with a static or pricing key. An
    /// existing dynamic field is left as is.
    pub fn add_custom_field(
        &mut self,
        name: &str,
        kind: FieldKind,
        options: Vec<String>,
    ) -> Option<String> {
        let key = normalize_key(name);
        if key.is_empty() || is_static_field(&key) || is_price_key(&key) {
            return None;
        }
        if !self.fields.contains(&key) {
            self.fields.upsert(DynamicField::custom(&key, kind, options));
            debug!(key = %key, kind = %kind, "custom field added");
        }
        Some(key)
    }

    pub fn remove_field(&mut self, key: &str) -> bool {
        let normalized = normalize_key(key);
        self.required.retain(|required| *required != normalized);
        self.fields.remove(&normalized).is_some()
    }

    /// Adds the fields the AI service asks for on this category. Required
    /// descriptors must hold a value before submission.
    pub fn apply_descriptors(&mut self, descriptors: &[DynamicFieldDescriptor]) {
        for descriptor in descriptors {
            let Some(key) =
                self.add_custom_field(&descriptor.name, descriptor.kind, descriptor.options.clone())
            else {
                continue;
            };
            if descriptor.required && !self.required.contains(&key) {
                self.required.push(key);
            }
        }
    }

    /// Drops every edit and custom field and re-derives the field set from the
    /// last fetched proposal or record. The consignor selection and attached
    /// photos are kept.
    pub fn reset_to_original(&mut self) {
        let consignor = self.statics.get(CONSIGNOR_KEY).cloned();
        let snapshot = self.source.snapshot();
        self.statics = snapshot.statics;
        self.fields = snapshot.fields;
        self.pricing = snapshot.pricing;
        self.required.clear();
        if let Some(consignor) = consignor {
            self.statics.insert(CONSIGNOR_KEY.to_string(), consignor);
        }
        info!(sku = %self.sku, "edit session reset");
    }

    pub fn select_consignor(&mut self, consignor_id: &str) {
        let consignor_id = consignor_id.trim();
        if consignor_id.is_empty() {
            self.statics.remove(CONSIGNOR_KEY);
        } else {
            self.statics.insert(
                CONSIGNOR_KEY.to_string(),
                serde_json::Value::String(consignor_id.to_string()),
            );
        }
    }

    #[must_use]
    pub fn consignor(&self) -> Option<String> {
        self.statics.get(CONSIGNOR_KEY).and_then(value_as_string)
    }

    pub fn attach_photo(&mut self, photo: Photo) {
        self.photos.push(photo);
    }

    /// Patch of everything modified since the session was opened, with both
    /// price spellings and the dynamic fields in the flat and nested shapes.
    #[must_use]
    pub fn changes(&self) -> Record {
        let original = self.source.snapshot();
        let mut patch = Record::new();

        for (key, value) in &self.statics {
            if original.statics.get(key) != Some(value) {
                patch.insert(key.clone(), value.clone());
            }
        }

        for canonical in self.pricing.diff(&original.pricing) {
            let value = self
                .pricing
                .get(canonical)
                .map(FieldValue::to_json)
                .unwrap_or_default();
            if let Some((_, legacy)) = PRICE_ALIASES.iter().find(|(key, _)| *key == canonical) {
                for alias in *legacy {
                    patch.insert((*alias).to_string(), value.clone());
                }
            }
            patch.insert(canonical.to_string(), value);
        }

        let mut dynamic_changed = false;
        for field in &self.fields {
            let before = original.fields.get(&field.key).map(|f| &f.value);
            if before != Some(&field.value) {
                patch.insert(field.key.clone(), field.value.to_json());
                dynamic_changed = true;
            }
        }
        for field in &original.fields {
            if !self.fields.contains(&field.key) {
                patch.insert(field.key.clone(), serde_json::Value::Null);
                dynamic_changed = true;
            }
        }
        if dynamic_changed {
            patch.insert(
                DYNAMIC_FIELDS_KEY.to_string(),
                serde_json::Value::Object(self.fields.to_record()),
            );
        }
        patch
    }
}

fn static_attributes(record: &Record) -> Record {
    record
        .iter()
        .filter_map(|(key, value)| {
            let key = normalize_key(key);
            let keep = is_static_field(&key)
                && !matches!(
                    key.as_str(),
                    SKU_KEY | ID_KEY | DYNAMIC_FIELDS_KEY | "photos"
                )
                && !value.is_null();
            keep.then(|| (key, value.clone()))
        })
        .collect()
}

fn value_as_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) if !text.trim().is_empty() => {
            Some(text.trim().to_string())
        }
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
