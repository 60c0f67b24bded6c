//! Study task records.
//!
//! A [`Task`] is one entry of a student's backlog: a number of learning units
//! (lessons, lectures) for a subject, weighted by a subjective difficulty and
//! due on a calendar date. Tasks are created either by hand or in batches by
//! the [`distribution`] module.

pub mod distribution;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Store-assigned task identifier. Ascending ids follow insertion order.
pub type TaskId = i64;

/// Subjective task weight in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Validate a raw difficulty.
    ///
    /// Takes a wide integer so callers can pass unchecked user input.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::DifficultyOutOfRange(value))
        }
    }

    /// Clamp any value into range.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub owner: String,
    pub subject: String,
    /// Learning units this task represents (>= 1)
    pub size: u32,
    pub difficulty: Difficulty,
    pub due_date: NaiveDate,
}

impl NewTask {
    /// Check the record invariants that the type system does not cover.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.owner.trim().is_empty() {
            return Err(ValidationError::invalid("owner", "must not be empty"));
        }
        if self.subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject);
        }
        if self.size == 0 {
            return Err(ValidationError::ZeroSize);
        }
        Ok(())
    }
}

/// A persisted study task.
///
/// Urgency is not stored here; it depends on the evaluation date and is
/// computed by [`crate::scoring`] on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub owner: String,
    pub subject: String,
    pub size: u32,
    pub difficulty: Difficulty,
    pub due_date: NaiveDate,
    pub completed: bool,
}

impl Task {
    /// Materialize a new task under a store-assigned id.
    pub fn from_new(id: TaskId, new: NewTask) -> Self {
        Self {
            id,
            owner: new.owner,
            subject: new.subject,
            size: new.size,
            difficulty: new.difficulty,
            due_date: new.due_date,
            completed: false,
        }
    }

    /// Signed days until the due date; negative when overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    pub fn is_open(&self) -> bool {
        !self.completed
    }
}
