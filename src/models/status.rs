//! Lifecycle status shared by schedules and matches.

use serde::{Deserialize, Serialize};

/// Status of a schedule or a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    #[serde(other)]
    Unknown,
}

impl PlayStatus {
    /// Label shown in the schedule list.
    pub fn schedule_label(&self) -> &'static str {
        match self {
            PlayStatus::Upcoming => "即將開始",
            PlayStatus::Ongoing => "進行中",
            PlayStatus::Completed => "已完成",
            PlayStatus::Unknown => "未知",
        }
    }

    /// Badge tone shown next to a schedule.
    pub fn schedule_tone(&self) -> &'static str {
        match self {
            PlayStatus::Upcoming => "warning",
            PlayStatus::Ongoing => "success",
            PlayStatus::Completed => "secondary",
            PlayStatus::Unknown => "info",
        }
    }
}
