//! Backlog service: the operations callers invoke.
//!
//! [`Backlog`] wraps a [`TaskStore`] and applies owner scoping, validation,
//! scoring and distribution. It never retries a failed store call and never
//! leaves part of a batch behind.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::demo;
use crate::error::{CoreError, Result, StoreError, ValidationError};
use crate::scoring::{self, RankedTask};
use crate::session::Session;
use crate::stats::BacklogSummary;
use crate::storage::{legacy, TaskStore};
use crate::task::distribution::{self, DistributionOptions, DistributionPlan, DistributionRequest};
use crate::task::{Difficulty, NewTask, Task, TaskId};

/// Longest "days until the exam" accepted for a manual entry.
pub const MAX_DAYS_AHEAD: u32 = 365;

/// When a manually entered task is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Due {
    /// Absolute exam date; may already be past
    On(NaiveDate),
    /// Days from the session's today, `1..=365`
    InDays(u32),
}

/// Input for a single manual entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskRequest {
    pub subject: String,
    pub size: u32,
    /// Unchecked; validated against `1..=10`
    pub difficulty: i64,
    pub due: Due,
}

/// Input for a distribution. The owner comes from the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributeRequest {
    pub subject: String,
    pub total_units: u32,
    /// Unchecked; validated against `1..=10`
    pub difficulty: i64,
    pub deadline: NaiveDate,
}

/// Study backlog operations over a task store.
pub struct Backlog<S: TaskStore> {
    store: S,
    options: DistributionOptions,
}

impl<S: TaskStore> Backlog<S> {
    pub fn new(store: S, options: DistributionOptions) -> Self {
        Self { store, options }
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, DistributionOptions::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &DistributionOptions {
        &self.options
    }

    /// Create one task by hand.
    ///
    /// # Errors
    /// `InvalidInput` for a blank subject, zero size, difficulty outside
    /// `1..=10` or a day count outside `1..=365`; `Store` if the insert fails.
    pub fn create_task(&self, session: &Session, request: NewTaskRequest) -> Result<Task> {
        let due_date = match request.due {
            Due::On(date) => date,
            Due::InDays(days) => {
                if !(1..=MAX_DAYS_AHEAD).contains(&days) {
                    return Err(ValidationError::invalid(
                        "days",
                        format!("must be between 1 and {MAX_DAYS_AHEAD}, got {days}"),
                    )
                    .into());
                }
                session.today + Duration::days(i64::from(days))
            }
        };
        let new = NewTask {
            owner: session.owner.clone(),
            subject: request.subject.trim().to_string(),
            size: request.size,
            difficulty: Difficulty::new(request.difficulty)?,
            due_date,
        };

        let mut created = self.insert_batch(vec![new])?;
        let task = created.remove(0);
        tracing::info!(id = task.id, owner = %task.owner, subject = %task.subject, "task created");
        Ok(task)
    }

    /// Tasks visible to the caller, ranked by urgency as of `session.today`.
    ///
    /// Students see their own tasks; admins see everyone's. Completed tasks
    /// are left out unless `include_completed` is set, in which case they
    /// follow the open ones.
    pub fn list_tasks(&self, session: &Session, include_completed: bool) -> Result<Vec<RankedTask>> {
        let mut tasks = self.visible_tasks(session)?;
        if !include_completed {
            tasks.retain(Task::is_open);
        }
        Ok(scoring::rank(tasks, session.today))
    }

    /// Mark a task done (`true`) or undo that (`false`).
    ///
    /// # Errors
    /// `TaskNotFound` when the id does not exist, belongs to someone else
    /// and the caller is not an admin, or is gone by the time of the update.
    pub fn set_completed(&self, session: &Session, id: TaskId, completed: bool) -> Result<Task> {
        let mut task = self.visible_task(session, id)?;
        if !self.store.update_completion(id, completed).map_err(store_failure)? {
            return Err(CoreError::TaskNotFound(id));
        }
        task.completed = completed;
        tracing::info!(id, completed, "task completion changed");
        Ok(task)
    }

    /// Delete one task and return it.
    pub fn delete_task(&self, session: &Session, id: TaskId) -> Result<Task> {
        let task = self.visible_task(session, id)?;
        if !self.store.delete(id).map_err(store_failure)? {
            return Err(CoreError::TaskNotFound(id));
        }
        tracing::info!(id, owner = %task.owner, "task deleted");
        Ok(task)
    }

    /// Compute a distribution without storing anything.
    pub fn plan_distribution(&self, session: &Session, request: &DistributeRequest) -> Result<DistributionPlan> {
        let request = DistributionRequest {
            owner: session.owner.clone(),
            subject: request.subject.clone(),
            total_units: request.total_units,
            difficulty: Difficulty::new(request.difficulty)?,
            deadline: request.deadline,
        };
        distribution::plan(&request, session.today, &self.options).inspect_err(|err| {
            tracing::warn!(error = %err, owner = %session.owner, "distribution rejected");
        })
    }

    /// Split a backlog into dated unit tasks and store them as one batch.
    ///
    /// # Errors
    /// `InvalidAmount`, `InvalidDeadline` or `InvalidInput` before anything
    /// is written; `Store` if the batch could not be written in full.
    pub fn distribute(&self, session: &Session, request: &DistributeRequest) -> Result<Vec<Task>> {
        let plan = self.plan_distribution(session, request)?;
        let tasks = self.insert_batch(plan.tasks)?;
        tracing::info!(
            owner = %session.owner,
            subject = %request.subject,
            units = tasks.len(),
            days = plan.days.len(),
            quota = plan.daily_quota,
            "backlog distributed"
        );
        Ok(tasks)
    }

    /// Headline numbers over the caller's visible tasks.
    pub fn summary(&self, session: &Session) -> Result<BacklogSummary> {
        let ranked = scoring::rank(self.visible_tasks(session)?, session.today);
        Ok(BacklogSummary::from_ranked(&ranked))
    }

    /// Delete every task of every owner. Admin only.
    pub fn clear_all(&self, session: &Session) -> Result<usize> {
        require_admin(session)?;
        let removed = self.store.delete_all().map_err(store_failure)?;
        tracing::info!(removed, admin = %session.owner, "all tasks cleared");
        Ok(removed)
    }

    /// Insert `count` seeded demo tasks. Admin only.
    pub fn seed_demo(&self, session: &Session, seed: u64, count: usize) -> Result<Vec<Task>> {
        require_admin(session)?;
        let tasks = self.insert_batch(demo::generate(seed, count, session.today))?;
        tracing::info!(count = tasks.len(), seed, "demo tasks seeded");
        Ok(tasks)
    }

    /// Import a legacy CSV export as one batch.
    ///
    /// An admin keeps each row's student as owner (the session owner when
    /// blank); a student imports every row as their own.
    pub fn import_legacy<R: Read>(&self, session: &Session, reader: R) -> Result<Vec<Task>> {
        let rows = legacy::parse(reader)?;
        let batch: Vec<NewTask> = rows
            .into_iter()
            .map(|row| {
                let owner = if session.is_admin() && !row.student.is_empty() {
                    row.student.clone()
                } else {
                    session.owner.clone()
                };
                row.into_new_task(owner, session.today)
            })
            .collect();
        let tasks = self.insert_batch(batch)?;
        tracing::info!(count = tasks.len(), owner = %session.owner, "legacy tasks imported");
        Ok(tasks)
    }

    /// Import a legacy CSV export from a file.
    ///
    /// # Errors
    /// `Io` when the file cannot be opened; otherwise as [`Self::import_legacy`].
    pub fn import_legacy_file(&self, session: &Session, path: &Path) -> Result<Vec<Task>> {
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "importing legacy file");
        self.import_legacy(session, BufReader::new(file))
    }

    fn visible_tasks(&self, session: &Session) -> Result<Vec<Task>> {
        let tasks = if session.is_admin() {
            self.store.list_all()
        } else {
            self.store.list_by_owner(&session.owner)
        };
        tasks.map_err(store_failure)
    }

    fn visible_task(&self, session: &Session, id: TaskId) -> Result<Task> {
        match self.store.get(id).map_err(store_failure)? {
            Some(task) if session.can_access(&task) => Ok(task),
            _ => Err(CoreError::TaskNotFound(id)),
        }
    }

    /// Write a batch and pair the new ids with their records.
    fn insert_batch(&self, batch: Vec<NewTask>) -> Result<Vec<Task>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        for new in &batch {
            new.validate()?;
        }
        let ids = self.store.insert_many(&batch).map_err(store_failure)?;
        if ids.len() != batch.len() {
            return Err(store_failure(StoreError::PartialWrite {
                written: ids.len(),
                expected: batch.len(),
            }));
        }
        Ok(ids
            .into_iter()
            .zip(batch)
            .map(|(id, new)| Task::from_new(id, new))
            .collect())
    }
}

fn require_admin(session: &Session) -> Result<()> {
    if session.is_admin() {
        Ok(())
    } else {
        tracing::warn!(owner = %session.owner, "admin operation refused");
        Err(CoreError::Forbidden)
    }
}

fn store_failure(err: StoreError) -> CoreError {
    tracing::warn!(error = %err, retryable = err.is_retryable(), "task store failure");
    CoreError::Store(err)
}
