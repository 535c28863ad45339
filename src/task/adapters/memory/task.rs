//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::event::domain::EventId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    event_index: HashMap<EventId, Vec<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryTaskState {
    fn insert(&mut self, task: &Task) {
        self.event_index
            .entry(task.event_id())
            .or_default()
            .push(task.id());
        self.tasks.insert(task.id(), task.clone());
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task);
        Ok(())
    }

    async fn store_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let mut seen = std::collections::HashSet::new();
        for task in tasks {
            if state.tasks.contains_key(&task.id()) || !seen.insert(task.id()) {
                return Err(TaskRepositoryError::DuplicateTask(task.id()));
            }
        }
        for task in tasks {
            state.insert(task);
        }
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn update_details(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        slot.adopt_details(task);
        Ok(())
    }

    async fn claim(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if slot.is_claimed() {
            return Err(TaskRepositoryError::ClaimConflict(task.id()));
        }
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if let Some(ids) = state.event_index.get_mut(&removed.event_id()) {
            ids.retain(|task_id| *task_id != id);
            if ids.is_empty() {
                state.event_index.remove(&removed.event_id());
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_event(&self, event_id: EventId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let tasks = state
            .event_index
            .get(&event_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(tasks)
    }
}
