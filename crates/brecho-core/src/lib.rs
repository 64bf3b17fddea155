#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod errors;
pub mod fields;
pub mod lookup;
pub mod models;
pub mod pricing;
pub mod proposal;
pub mod session;
pub mod submission;

pub use crate::errors::*;
pub use crate::fields::*;
pub use crate::lookup::*;
pub use crate::models::*;
pub use crate::pricing::*;
pub use crate::proposal::*;
pub use crate::session::*;
pub use crate::submission::*;

/// Insertion-ordered flat key/value record as exchanged with the backend.
pub type Record = serde_json::Map<String, serde_json::Value>;
