//! Request-scoped caller context.
//!
//! Every backlog operation takes a [`Session`] instead of reading a logged-in
//! user or the system clock from ambient state. That keeps rankings
//! reproducible: the same tasks and the same `today` always give the same
//! order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Sees and changes only their own tasks
    #[default]
    Student,
    /// Sees and changes every owner's tasks
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Who is calling, with which rights, and on what day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub owner: String,
    pub role: Role,
    pub today: NaiveDate,
}

impl Session {
    pub fn student(owner: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            owner: owner.into(),
            role: Role::Student,
            today,
        }
    }

    pub fn admin(owner: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            owner: owner.into(),
            role: Role::Admin,
            today,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this caller may read or change `task`.
    pub fn can_access(&self, task: &Task) -> bool {
        self.is_admin() || task.owner == self.owner
    }
}
