use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub current_context: Option<String>,
    #[serde(default)]
    pub contexts: HashMap<String, CliContext>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct CliContext {
    pub addr: String,
    #[serde(default)]
    pub operator: Option<String>,
}

pub struct CommandContext<'a> {
    pub client: &'a reqwest::Client,
    pub addr: &'a str,
    pub access_token: Option<String>,
    pub operator: Option<String>,
}

/// List endpoints answer with a bare array or an object wrapping it.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "items", alias = "consignors", alias = "sales")]
        data: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(values) | Self::Wrapped { data: values } => values,
        }
    }
}
