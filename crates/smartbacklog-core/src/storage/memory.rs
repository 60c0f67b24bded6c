//! In-process task store.
//!
//! Holds tasks in a `BTreeMap` behind a mutex; a batch is inserted while the
//! lock is held, so other readers observe all of it or none of it.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::TaskStore;
use crate::error::StoreError;
use crate::task::{NewTask, Task, TaskId};

#[derive(Debug, Default)]
struct MemoryState {
    next_id: TaskId,
    tasks: BTreeMap<TaskId, Task>,
}

/// Task store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.state.lock()?.tasks.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl TaskStore for MemoryStore {
    fn insert_many(&self, tasks: &[NewTask]) -> Result<Vec<TaskId>, StoreError> {
        let mut state = self.state.lock()?;
        let mut ids = Vec::with_capacity(tasks.len());
        for new in tasks {
            state.next_id += 1;
            let id = state.next_id;
            state.tasks.insert(id, Task::from_new(id, new.clone()));
            ids.push(id);
        }
        Ok(ids)
    }

    fn list_by_owner(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        let state = self.state.lock()?;
        Ok(state
            .tasks
            .values()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.state.lock()?.tasks.values().cloned().collect())
    }

    fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.state.lock()?.tasks.get(&id).cloned())
    }

    fn update_completion(&self, id: TaskId, completed: bool) -> Result<bool, StoreError> {
        match self.state.lock()?.tasks.get_mut(&id) {
            Some(task) => {
                task.completed = completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: TaskId) -> Result<bool, StoreError> {
        Ok(self.state.lock()?.tasks.remove(&id).is_some())
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        let mut state = self.state.lock()?;
        let removed = state.tasks.len();
        state.tasks.clear();
        Ok(removed)
    }
}
