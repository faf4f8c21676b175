//! Render-ready view model of the match board.

use serde::Serialize;

use super::ScheduleGroup;
use crate::models::{Match, PlayStatus};

/// Shown instead of any group when there are no schedules.
pub const EMPTY_SCHEDULES: &str = "暫無賽程數據";
/// Title row above the groups.
pub const BOARD_TITLE: &str = "比賽列表";
/// Prefix of every group header.
pub const GROUP_HEADER_PREFIX: &str = "賽程名稱：";
/// Row shown for a schedule without matches.
pub const NO_MATCHES: &str = "此賽程下暫無比賽數據";
/// Stand-in for any missing value.
pub const PLACEHOLDER: &str = "-";

const ONGOING_LABEL: &str = "進行中";
const ENDED_LABEL: &str = "已結束";

/// The whole board.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BoardView {
    Empty {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Groups {
        title: String,
        groups: Vec<GroupView>,
    },
}

impl BoardView {
    pub fn empty() -> Self {
        BoardView::Empty {
            message: EMPTY_SCHEDULES.to_string(),
        }
    }

    pub fn groups(&self) -> &[GroupView] {
        match self {
            BoardView::Empty { .. } => &[],
            BoardView::Groups { groups, .. } => groups,
        }
    }
}

/// One schedule with its rows.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub schedule_id: String,
    /// Schedule `matchName`, or the placeholder
    pub title: String,
    /// `賽程名稱：` + title
    pub header: String,
    pub rows: GroupRows,
}

/// Body of a group.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GroupRows {
    Matches { matches: Vec<MatchRow> },
    Placeholder { message: String },
    /// Matches could not be fetched.
    Unavailable,
}

/// One match line.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchRow {
    pub match_id: String,
    /// The group's round; every row in a group shows the same value
    pub round: String,
    pub blue_player: String,
    pub red_player: String,
    pub badge: StatusBadge,
}

/// Status badge of a match row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: String,
    pub tone: String,
}

impl StatusBadge {
    /// Ongoing matches are highlighted; every other status reads as ended.
    pub fn for_status(status: Option<PlayStatus>) -> Self {
        let (label, tone) = match status {
            Some(PlayStatus::Ongoing) => (ONGOING_LABEL, "success"),
            _ => (ENDED_LABEL, "secondary"),
        };
        Self {
            label: label.to_string(),
            tone: tone.to_string(),
        }
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn match_row(m: &Match, round: &str) -> MatchRow {
    MatchRow {
        match_id: m.id.clone(),
        round: round.to_string(),
        blue_player: or_placeholder(m.blue_player.as_deref()),
        red_player: or_placeholder(m.red_player.as_deref()),
        badge: StatusBadge::for_status(m.status),
    }
}

fn group_shell(group: &ScheduleGroup, rows: GroupRows) -> GroupView {
    let title = or_placeholder(group.schedule.match_name.as_deref());
    GroupView {
        schedule_id: group.schedule.id.clone(),
        header: format!("{}{}", GROUP_HEADER_PREFIX, title),
        title,
        rows,
    }
}

fn board(groups: Vec<GroupView>) -> BoardView {
    if groups.is_empty() {
        return BoardView::empty();
    }
    BoardView::Groups {
        title: BOARD_TITLE.to_string(),
        groups,
    }
}

/// Build the board from joined groups. No groups yields the empty marker.
pub fn build_view(groups: &[ScheduleGroup]) -> BoardView {
    board(
        groups
            .iter()
            .map(|group| {
                let rows = if group.matches.is_empty() {
                    GroupRows::Placeholder {
                        message: NO_MATCHES.to_string(),
                    }
                } else {
                    let round = or_placeholder(group.schedule.round.as_deref());
                    GroupRows::Matches {
                        matches: group.matches.iter().map(|m| match_row(m, &round)).collect(),
                    }
                };
                group_shell(group, rows)
            })
            .collect(),
    )
}

/// Board with schedule headers only, for when matches could not be fetched.
pub fn partial_view(groups: &[ScheduleGroup]) -> BoardView {
    board(
        groups
            .iter()
            .map(|group| group_shell(group, GroupRows::Unavailable))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::group_matches;
    use crate::models::Schedule;
    use serde_json::json;

    fn schedule(value: serde_json::Value) -> Schedule {
        serde_json::from_value(value).unwrap()
    }

    fn game(value: serde_json::Value) -> Match {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_match_scenario() {
        let groups = group_matches(
            vec![schedule(json!({ "id": "s1", "matchName": "Spring Open", "round": "Final" }))],
            vec![game(json!({
                "id": "m1",
                "tournamentId": "s1",
                "bluePlayer": "Alice",
                "redPlayer": "Bob",
                "status": "ongoing"
            }))],
        );
        let view = build_view(&groups);

        let BoardView::Groups { title, groups } = &view else {
            panic!("expected groups, got {:?}", view);
        };
        assert_eq!(title, BOARD_TITLE);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].header, "賽程名稱：Spring Open");

        let GroupRows::Matches { matches } = &groups[0].rows else {
            panic!("expected match rows");
        };
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].round, "Final");
        assert_eq!(matches[0].blue_player, "Alice");
        assert_eq!(matches[0].red_player, "Bob");
        assert_eq!(matches[0].badge.label, "進行中");
        assert_eq!(matches[0].badge.tone, "success");
    }

    #[test]
    fn test_schedule_without_matches_gets_placeholder_row() {
        let groups = group_matches(vec![schedule(json!({ "id": "s1", "matchName": "Cup" }))], vec![]);
        let view = build_view(&groups);

        assert_eq!(view.groups().len(), 1);
        assert_eq!(view.groups()[0].title, "Cup");
        assert_eq!(
            view.groups()[0].rows,
            GroupRows::Placeholder {
                message: "此賽程下暫無比賽數據".to_string()
            }
        );
    }

    #[test]
    fn test_no_schedules_is_empty_marker_whatever_the_matches() {
        let groups = group_matches(
            vec![],
            vec![game(json!({ "id": "m1", "tournamentId": "s1" }))],
        );
        assert_eq!(
            build_view(&groups),
            BoardView::Empty {
                message: "暫無賽程數據".to_string()
            }
        );
    }

    #[test]
    fn test_round_is_shared_and_missing_values_use_placeholder() {
        let groups = group_matches(
            vec![schedule(json!({ "id": "s1", "round": "Semifinal" }))],
            vec![
                game(json!({ "id": "m1", "tournamentId": "s1", "status": "completed" })),
                game(json!({ "id": "m2", "tournamentId": "s1", "bluePlayer": "", "status": "upcoming" })),
            ],
        );
        let view = build_view(&groups);
        let group = &view.groups()[0];
        assert_eq!(group.header, "賽程名稱：-");

        let GroupRows::Matches { matches } = &group.rows else {
            panic!("expected match rows");
        };
        assert!(matches.iter().all(|row| row.round == "Semifinal"));
        assert!(matches.iter().all(|row| row.blue_player == PLACEHOLDER));
        assert!(matches.iter().all(|row| row.badge.label == "已結束"));
    }

    #[test]
    fn test_missing_round_uses_placeholder() {
        let groups = group_matches(
            vec![schedule(json!({ "id": "s1", "matchName": "Cup" }))],
            vec![game(json!({ "id": "m1", "tournamentId": "s1" }))],
        );
        let view = build_view(&groups);
        let GroupRows::Matches { matches } = &view.groups()[0].rows else {
            panic!("expected match rows");
        };
        assert_eq!(matches[0].round, PLACEHOLDER);
    }

    #[test]
    fn test_partial_view_keeps_headers() {
        let groups = group_matches(
            vec![
                schedule(json!({ "id": "s1", "matchName": "Cup" })),
                schedule(json!({ "id": "s2", "matchName": "League" })),
            ],
            vec![],
        );
        let view = partial_view(&groups);
        assert_eq!(view.groups().len(), 2);
        assert!(view.groups().iter().all(|g| g.rows == GroupRows::Unavailable));
    }

    #[test]
    fn test_view_serializes_with_kind_tags() {
        let view = build_view(&group_matches(
            vec![schedule(json!({ "id": "s1", "matchName": "Cup" }))],
            vec![],
        ));
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["kind"], "groups");
        assert_eq!(value["groups"][0]["scheduleId"], "s1");
        assert_eq!(value["groups"][0]["rows"]["kind"], "placeholder");
    }
}
