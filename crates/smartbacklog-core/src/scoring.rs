//! Urgency scoring and ranking.
//!
//! The urgency of a task grows with its weight (difficulty times size) and
//! shrinks with the time left before it is due:
//!
//! ```text
//! score = difficulty * size * URGENCY_SCALE / max(due_date - today, 1)
//! ```
//!
//! Remaining days are floored at one, so a task due today and an overdue task
//! both score as if due tomorrow: the maximum urgency for their weight.
//! Scores depend on `today` and are recomputed on every read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::Result;
use crate::task::{Difficulty, Task};

/// Fixed multiplier applied to every score.
pub const URGENCY_SCALE: f64 = 10.0;

/// Days left before `due_date`, floored at 1.
pub fn remaining_days(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (due_date - today).num_days().max(1)
}

/// Score raw inputs.
///
/// # Errors
/// Returns `CoreError::InvalidInput` when `difficulty` is outside `1..=10`.
pub fn score(difficulty: i64, size: u32, due_date: NaiveDate, today: NaiveDate) -> Result<f64> {
    let difficulty = Difficulty::new(difficulty)?;
    Ok(score_checked(difficulty, size, due_date, today))
}

/// Score already-validated inputs.
pub fn score_checked(difficulty: Difficulty, size: u32, due_date: NaiveDate, today: NaiveDate) -> f64 {
    let weight = f64::from(difficulty.get()) * f64::from(size);
    weight * URGENCY_SCALE / remaining_days(due_date, today) as f64
}

pub fn score_task(task: &Task, today: NaiveDate) -> f64 {
    score_checked(task.difficulty, task.size, task.due_date, today)
}

/// A task together with its urgency as of one evaluation date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTask {
    #[serde(flatten)]
    pub task: Task,
    pub score: f64,
    /// Signed days until due; negative when overdue
    pub days_left: i64,
}

impl RankedTask {
    pub fn evaluate(task: Task, today: NaiveDate) -> Self {
        let score = score_task(&task, today);
        let days_left = task.days_until_due(today);
        Self { task, score, days_left }
    }
}

/// Ranking order: open tasks first, then score descending, earlier due date,
/// and finally lower id (insertion order).
pub fn compare(a: &RankedTask, b: &RankedTask) -> Ordering {
    a.task
        .completed
        .cmp(&b.task.completed)
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| a.task.due_date.cmp(&b.task.due_date))
        .then_with(|| a.task.id.cmp(&b.task.id))
}

/// Score and sort tasks for display.
pub fn rank(tasks: Vec<Task>, today: NaiveDate) -> Vec<RankedTask> {
    let mut ranked: Vec<RankedTask> = tasks
        .into_iter()
        .map(|task| RankedTask::evaluate(task, today))
        .collect();
    ranked.sort_by(compare);
    tracing::debug!(count = ranked.len(), %today, "ranked tasks");
    ranked
}
