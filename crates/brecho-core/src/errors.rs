use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {enum_name} value: {value}")]
pub struct EnumParseError {
    enum_name: &'static str,
    value: String,
}

impl EnumParseError {
    pub(crate) fn new(enum_name: &'static str, value: impl Into<String>) -> Self {
        Self {
            enum_name,
            value: value.into(),
        }
    }
}

/// Client-side validation failures raised before any submission is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("consignor is required")]
    MissingConsignor,
    #[error("sku is required")]
    MissingSku,
    #[error("field is required: {0}")]
    MissingRequiredField(String),
}
