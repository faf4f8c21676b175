//! Score model: one point event inside a match.

use serde::{Deserialize, Serialize};

/// Lowest and highest points a single score event may carry.
pub const MIN_POINTS: i64 = 1;
pub const MAX_POINTS: i64 = 5;

/// Side that scored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Blue,
    Red,
}

fn default_points() -> i64 {
    MIN_POINTS
}

/// A score entry in the `scores` collection of a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: String,
    #[serde(default)]
    pub player: Side,
    #[serde(default = "default_points")]
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for adding a score.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddScoreRequest {
    #[serde(default)]
    pub player: Side,
    #[serde(default)]
    pub points: Option<i64>,
}

/// Request body for changing a score.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    #[serde(default)]
    pub player: Option<Side>,
    #[serde(default)]
    pub points: Option<i64>,
}
