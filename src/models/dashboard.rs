//! Dashboard and settings models.

use serde::{Deserialize, Serialize};

/// User counts shown on the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub admin_count: usize,
    pub referee_count: usize,
}

/// App version published to the mobile clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for publishing a new app version.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVersionRequest {
    pub version: String,
}
