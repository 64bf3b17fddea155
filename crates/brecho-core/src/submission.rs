use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::api::{BulkItemsRequest, ConfirmIntakeRequest};
use crate::errors::SubmissionError;
use crate::fields::DYNAMIC_FIELDS_KEY;
use crate::session::{EditSession, CONSIGNOR_KEY};
use crate::Record;

/// Photo attached to an item, in capture/upload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub mime_type: Option<String>,
}

impl Photo {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            filename: None,
            mime_type: None,
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        self.mime_type = mime_for_filename(&filename).map(str::to_string);
        self.filename = Some(filename);
        self
    }

    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

fn mime_for_filename(filename: &str) -> Option<&'static str> {
    let extension = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "m4a" => Some("audio/mp4"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "webm" => Some("audio/webm"),
        _ => None,
    }
}

/// Item-creation payload.
///
/// Dynamic fields are emitted twice: nested under `dynamic_fields` and merged
/// into the flat top level for consumers that still read the flat shape.
/// Both copies are written from the same source and always match.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ItemSubmission {
    pub sku: String,
    #[serde(flatten)]
    pub attributes: Record,
    pub dynamic_fields: Record,
    pub photos: Vec<String>,
}

impl ItemSubmission {
    /// Flat record without photos: the `proposal` of a confirm-intake call.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("sku".to_string(), serde_json::Value::String(self.sku.clone()));
        for (key, value) in &self.attributes {
            record.insert(key.clone(), value.clone());
        }
        record.insert(
            DYNAMIC_FIELDS_KEY.to_string(),
            serde_json::Value::Object(self.dynamic_fields.clone()),
        );
        record
    }

    #[must_use]
    pub fn into_confirm_request(self) -> ConfirmIntakeRequest {
        ConfirmIntakeRequest {
            proposal: self.to_record(),
            sku: self.sku,
            images: self.photos,
        }
    }

    /// Full flat record with photos, as one entry of a bulk upload.
    #[must_use]
    pub fn to_bulk_entry(&self) -> Record {
        let mut record = self.to_record();
        record.insert(
            "photos".to_string(),
            serde_json::Value::Array(
                self.photos
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect(),
            ),
        );
        record
    }
}

#[must_use]
pub fn bulk_request(submissions: &[ItemSubmission]) -> BulkItemsRequest {
    BulkItemsRequest {
        items: submissions.iter().map(ItemSubmission::to_bulk_entry).collect(),
    }
}

impl EditSession {
    /// Validates the session and flattens it into the submission payload.
    /// Fails before anything is sent when no consignor is selected.
    #[instrument(level = "debug", skip(self), fields(sku = %self.sku()))]
    pub fn build_submission(&self) -> Result<ItemSubmission, SubmissionError> {
        if self.consignor().is_none() {
            return Err(SubmissionError::MissingConsignor);
        }
        if self.sku().is_empty() {
            return Err(SubmissionError::MissingSku);
        }
        for key in &self.required {
            let filled = self
                .fields
                .get(key)
                .is_some_and(|field| !field.value.is_empty());
            if !filled {
                return Err(SubmissionError::MissingRequiredField(key.clone()));
            }
        }

        let mut attributes = Record::new();
        for (key, value) in &self.statics {
            attributes.insert(key.clone(), value.clone());
        }
        if let Some(consignor) = self.consignor() {
            attributes.insert(CONSIGNOR_KEY.to_string(), serde_json::Value::String(consignor));
        }
        attributes.extend(self.pricing.to_record());

        let dynamic_fields = self.fields.to_record();
        for (key, value) in &dynamic_fields {
            attributes.insert(key.clone(), value.clone());
        }

        let photos: Vec<String> = self.photos.iter().map(Photo::to_base64).collect();
        debug!(
            attributes = attributes.len(),
            dynamic_fields = dynamic_fields.len(),
            photos = photos.len(),
            "submission built"
        );
        Ok(ItemSubmission {
            sku: self.sku().to_string(),
            attributes,
            dynamic_fields,
            photos,
        })
    }
}
