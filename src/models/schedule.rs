//! Schedule model: one round/session of a tournament that groups matches.

use serde::{Deserialize, Serialize};

use super::{lenient, PlayStatus};

/// A schedule record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    /// Display label of the parent tournament, copied from the linked match
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub match_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub round: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<PlayStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Linked match. Not used when grouping matches under schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Schedule {
    /// Option label used by the match form: `matchName - round`.
    pub fn option_label(&self) -> String {
        format!(
            "{} - {}",
            self.match_name.as_deref().unwrap_or_default(),
            self.round.as_deref().unwrap_or_default()
        )
    }
}

/// Row of the schedule list, with the status badge resolved.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleListing {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub status_label: &'static str,
    pub status_tone: &'static str,
}

impl From<Schedule> for ScheduleListing {
    fn from(schedule: Schedule) -> Self {
        let status = schedule.status.unwrap_or_default();
        Self {
            status_label: status.schedule_label(),
            status_tone: status.schedule_tone(),
            schedule,
        }
    }
}

/// Request body for creating or editing a schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveScheduleRequest {
    #[serde(default)]
    pub match_id: String,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: PlayStatus,
    #[serde(default)]
    pub time: Option<String>,
}
