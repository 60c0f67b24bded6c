//! # SmartBacklog Core Library
//!
//! This library provides the core logic for SmartBacklog, a study backlog
//! tracker for students. The `smartbacklog` CLI binary is a thin layer over
//! the same library.
//!
//! ## Architecture
//!
//! - **Scoring**: urgency of a task is `difficulty × size × K / max(days left, 1)`,
//!   recomputed for the evaluation date on every read
//! - **Distribution**: splits a backlog of lesson units into one-unit tasks
//!   spread over the days before a deadline
//! - **Storage**: SQLite-backed task store and TOML-based configuration
//! - **Backlog**: owner-scoped service operations over any [`TaskStore`]
//!
//! ## Key Components
//!
//! - [`Backlog`]: create, list, complete, delete and distribute tasks
//! - [`SqliteStore`]: persistent task store with atomic batches
//! - [`Config`]: application configuration management
//! - [`Session`]: caller identity, role and evaluation date

pub mod backlog;
pub mod demo;
pub mod error;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod storage;
pub mod task;

pub use backlog::{Backlog, DistributeRequest, Due, NewTaskRequest};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use scoring::{rank, score, RankedTask, URGENCY_SCALE};
pub use session::{Role, Session};
pub use stats::BacklogSummary;
pub use storage::{Config, MemoryStore, SqliteStore, TaskStore};
pub use task::distribution::{DistributionOptions, DistributionPlan, DistributionPolicy};
pub use task::{Difficulty, NewTask, Task, TaskId};
