mod actions;
pub(crate) mod args;
mod files;
mod http;

pub(crate) use actions::{handle_intake, open_session};
pub(crate) use files::read_photo;
