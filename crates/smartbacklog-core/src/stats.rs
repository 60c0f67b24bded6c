//! Backlog summary figures.

use serde::{Deserialize, Serialize};

use crate::scoring::RankedTask;

/// Headline numbers for a list of ranked tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacklogSummary {
    pub total_tasks: usize,
    pub open_tasks: usize,
    pub total_units: u64,
    pub open_units: u64,
    /// Highest-ranked open task, if any
    pub most_urgent: Option<RankedTask>,
}

impl BacklogSummary {
    /// Summarize tasks already sorted by [`crate::scoring::rank`].
    pub fn from_ranked(ranked: &[RankedTask]) -> Self {
        let mut summary = Self {
            total_tasks: ranked.len(),
            ..Self::default()
        };
        for entry in ranked {
            let units = u64::from(entry.task.size);
            summary.total_units += units;
            if entry.task.is_open() {
                summary.open_tasks += 1;
                summary.open_units += units;
            }
        }
        summary.most_urgent = ranked.iter().find(|r| r.task.is_open()).cloned();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rank;
    use crate::task::{Difficulty, Task};
    use chrono::{Duration, NaiveDate};

    #[test]
    fn counts_units_and_picks_most_urgent_open_task() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let make = |id, size, difficulty, due_in, completed| Task {
            id,
            owner: "a".to_string(),
            subject: format!("s{id}"),
            size,
            difficulty: Difficulty::new(difficulty).unwrap(),
            due_date: today + Duration::days(due_in),
            completed,
        };
        let ranked = rank(
            vec![
                make(1, 5, 10, 1, true),
                make(2, 3, 4, 2, false),
                make(3, 2, 9, 1, false),
            ],
            today,
        );
        let summary = BacklogSummary::from_ranked(&ranked);
        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.open_tasks, 2);
        assert_eq!(summary.total_units, 10);
        assert_eq!(summary.open_units, 5);
        assert_eq!(summary.most_urgent.unwrap().task.id, 3);
    }

    #[test]
    fn empty_backlog_has_no_most_urgent() {
        let summary = BacklogSummary::from_ranked(&[]);
        assert_eq!(summary, BacklogSummary::default());
    }
}
