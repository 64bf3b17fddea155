mod actions;
pub(crate) mod args;
mod http;
mod render;

pub(crate) use actions::handle_item;
pub(crate) use http::fetch_items;
pub(crate) use render::print_session;
