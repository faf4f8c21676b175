//! Data models for the league admin backend.
//!
//! Field names follow the stored documents (camelCase). Every field a stored
//! record may lack is an `Option`.

mod dashboard;
mod game;
pub(crate) mod lenient;
mod schedule;
mod score;
mod status;
mod user;

pub use dashboard::*;
pub use game::*;
pub use schedule::*;
pub use score::*;
pub use status::*;
pub use user::*;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Current time in the stored timestamp format (RFC 3339, millisecond precision, `Z`).
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Entry of a select list in the admin forms.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FormOption {
    pub id: String,
    pub label: String,
}
