mod config;
pub mod database;
pub mod legacy;
pub mod memory;
pub mod migrations;

pub use config::{Config, DistributionConfig, SessionConfig, StorageConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, StoreError};
use crate::task::{NewTask, Task, TaskId};

/// Persistence contract the backlog service relies on.
///
/// Implementations must make `insert_many` all-or-nothing: readers never see
/// part of a batch. All calls are synchronous.
pub trait TaskStore {
    /// Insert a batch and return the assigned ids in input order.
    fn insert_many(&self, tasks: &[NewTask]) -> Result<Vec<TaskId>, StoreError>;

    /// Tasks of one owner in insertion order.
    fn list_by_owner(&self, owner: &str) -> Result<Vec<Task>, StoreError>;

    /// Every task in insertion order.
    fn list_all(&self) -> Result<Vec<Task>, StoreError>;

    fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError>;

    /// Set the completion flag of one task. Returns `false` when no task
    /// has this id.
    fn update_completion(&self, id: TaskId, completed: bool) -> Result<bool, StoreError>;

    /// Remove one task. Returns `false` when no task has this id.
    fn delete(&self, id: TaskId) -> Result<bool, StoreError>;

    /// Remove every task and return how many were removed.
    fn delete_all(&self) -> Result<usize, StoreError>;
}

/// Returns the SmartBacklog data directory, creating it if needed.
///
/// `SMARTBACKLOG_HOME` wins when set. Otherwise `~/.config/smartbacklog/`, or
/// `~/.config/smartbacklog-dev/` with `SMARTBACKLOG_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SMARTBACKLOG_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join(".config");
            let env = std::env::var("SMARTBACKLOG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("smartbacklog-dev")
            } else {
                base_dir.join("smartbacklog")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
