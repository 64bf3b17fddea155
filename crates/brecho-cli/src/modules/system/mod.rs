mod actions;
pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod http;
pub(crate) mod types;

pub(crate) use actions::{handle_field_types_command, handle_schema_command};
pub(crate) use config::{
    ensure_secure_addr, handle_config_command, load_config, resolve_addr, save_config,
};
pub(crate) use types::{CommandContext, ListResponse};
