//! User model for console accounts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const UNKNOWN_LABEL: &str = "未知";
const ACTIVE_LABEL: &str = "啟用";
const INACTIVE_LABEL: &str = "停用";
const NOT_SET_LABEL: &str = "未設置";

/// Role of a user in the league. Roles outside the known set keep their
/// stored spelling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    Referee,
    #[default]
    Viewer,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Referee => "referee",
            Role::Viewer => "viewer",
            Role::Other(raw) => raw,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "管理員",
            Role::Referee => "裁判",
            Role::Viewer => "觀眾",
            Role::Other(_) => UNKNOWN_LABEL,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "admin" => Role::Admin,
            "referee" => Role::Referee,
            "viewer" => Role::Viewer,
            _ => Role::Other(raw),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Role::from)
    }
}

/// Whether an account may be used.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

/// A user record. For accounts set up through the identity provider the
/// record id equals the provider's user id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Row of the user list, with role, status and email rendered for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserListing {
    #[serde(flatten)]
    pub user: User,
    pub role_label: &'static str,
    pub status_label: &'static str,
    pub email_label: String,
}

impl From<User> for UserListing {
    fn from(user: User) -> Self {
        let role_label = user
            .role
            .as_ref()
            .map_or(UNKNOWN_LABEL, Role::display_name);
        let status_label = match user.status {
            Some(UserStatus::Active) => ACTIVE_LABEL,
            _ => INACTIVE_LABEL,
        };
        let email_label = user
            .email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or(NOT_SET_LABEL)
            .to_string();
        Self {
            user,
            role_label,
            status_label,
            email_label,
        }
    }
}

/// Request body for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
}

/// Request body for updating a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}
