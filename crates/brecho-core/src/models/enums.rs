use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::EnumParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Multiline,
    Select,
}

/// Display groups, declared in rendering order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Basic,
    Physical,
    Commercial,
    Content,
    Dynamic,
}

impl FieldKind {
    pub const ALL: [Self; 5] = [
        Self::Text,
        Self::Number,
        Self::Boolean,
        Self::Multiline,
        Self::Select,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Multiline => "multiline",
            Self::Select => "select",
        }
    }
}

impl std::str::FromStr for FieldKind {
    type Err = EnumParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "string" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "boolean" | "bool" => Ok(Self::Boolean),
            "multiline" | "textarea" => Ok(Self::Multiline),
            "select" => Ok(Self::Select),
            _ => Err(EnumParseError::new("field_kind", value)),
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldCategory {
    pub const ORDER: [Self; 5] = [
        Self::Basic,
        Self::Physical,
        Self::Commercial,
        Self::Content,
        Self::Dynamic,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Physical => "physical",
            Self::Commercial => "commercial",
            Self::Content => "content",
            Self::Dynamic => "dynamic",
        }
    }

    #[must_use]
    pub const fn rank(self) -> usize {
        self as usize
    }
}

impl std::str::FromStr for FieldCategory {
    type Err = EnumParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "physical" => Ok(Self::Physical),
            "commercial" => Ok(Self::Commercial),
            "content" => Ok(Self::Content),
            "dynamic" => Ok(Self::Dynamic),
            _ => Err(EnumParseError::new("field_category", value)),
        }
    }
}

impl std::fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
