//! Client-side join of matches onto their schedules.

use std::collections::HashMap;

use crate::models::{Match, Schedule};

/// One schedule and the matches that reference it, in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleGroup {
    pub schedule: Schedule,
    pub matches: Vec<Match>,
}

/// Schedules in delivery order plus an id index into them.
#[derive(Debug, Default)]
pub struct GroupIndex {
    groups: Vec<ScheduleGroup>,
    positions: HashMap<String, usize>,
}

impl GroupIndex {
    /// Seed one empty group per schedule. A repeated id replaces the earlier
    /// record but keeps its position.
    pub fn seed(schedules: Vec<Schedule>) -> Self {
        let mut index = GroupIndex::default();
        for schedule in schedules {
            match index.positions.get(&schedule.id) {
                Some(&pos) => index.groups[pos].schedule = schedule,
                None => {
                    index
                        .positions
                        .insert(schedule.id.clone(), index.groups.len());
                    index.groups.push(ScheduleGroup {
                        schedule,
                        matches: Vec::new(),
                    });
                }
            }
        }
        index
    }

    /// Append each match to the group its `tournamentId` names. Matches with
    /// no reference or an unknown one are dropped; the count is returned.
    pub fn assign(&mut self, matches: Vec<Match>) -> usize {
        let mut dropped = 0;
        for m in matches {
            let pos = m.schedule_ref().and_then(|id| self.positions.get(id)).copied();
            match pos {
                Some(pos) => self.groups[pos].matches.push(m),
                None => dropped += 1,
            }
        }
        dropped
    }

    pub fn into_groups(self) -> Vec<ScheduleGroup> {
        self.groups
    }
}

/// Group `matches` under `schedules`, keeping schedule delivery order.
pub fn group_matches(schedules: Vec<Schedule>, matches: Vec<Match>) -> Vec<ScheduleGroup> {
    let mut index = GroupIndex::seed(schedules);
    let total = matches.len();
    let dropped = index.assign(matches);
    tracing::debug!(
        "Grouped {} matches, {} not linked to a schedule",
        total,
        dropped
    );
    index.into_groups()
}
