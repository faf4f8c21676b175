//! Identity gateway capability.
//!
//! Credentials are verified upstream (see `auth`); this module only answers
//! "who is calling" and keeps the last known signed-in identity on disk.

mod session_cache;

pub use session_cache::*;

use serde::{Deserialize, Serialize};

/// Audit value used when no signed-in user is known.
pub const UNKNOWN_ACTOR: &str = "unknown";

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Capability interface over the identity provider.
pub trait IdentityGateway: Send + Sync {
    fn current_user(&self) -> Option<CurrentUser>;

    /// Actor id stamped into audit fields.
    fn actor_id(&self) -> String {
        self.current_user()
            .map(|user| user.id)
            .unwrap_or_else(|| UNKNOWN_ACTOR.to_string())
    }
}

/// Identity resolved for a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity {
    user: Option<CurrentUser>,
}

impl RequestIdentity {
    pub fn new(user: Option<CurrentUser>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl IdentityGateway for RequestIdentity {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user.clone()
    }
}
