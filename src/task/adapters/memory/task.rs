//! In-memory repository for tasks and their history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::domain::ColumnId;
use crate::task::{
    domain::{Task, TaskHistoryEntry, TaskId},
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
    history: Vec<TaskHistoryEntry>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskRepositoryError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskRepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn is_due(task: &Task, column_ids: &[ColumnId], now: DateTime<Utc>) -> bool {
    column_ids.contains(&task.column_id())
        && task.reminder().is_enabled()
        && task.next_reminder_at().is_some_and(|next| next <= now)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn update_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if let Some(missing) = tasks.iter().find(|task| !state.tasks.contains_key(&task.id())) {
            return Err(TaskRepositoryError::NotFound(missing.id()));
        }
        for task in tasks {
            state.tasks.insert(task.id(), task.clone());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn tasks_in_column(&self, column_id: ColumnId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.column_id() == column_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.sort_order(), task.created_at()));
        Ok(tasks)
    }

    async fn claim_due_reminders(
        &self,
        column_ids: &[ColumnId],
        now: DateTime<Utc>,
        lease_until: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let mut state = self.write()?;
        let mut claimed = Vec::new();
        for task in state.tasks.values_mut() {
            if is_due(task, column_ids, now) {
                task.lease_reminder(lease_until);
                claimed.push(task.clone());
            }
        }
        claimed.sort_by_key(Task::created_at);
        Ok(claimed)
    }

    async fn set_next_reminder(
        &self,
        id: TaskId,
        next_reminder_at: Option<DateTime<Utc>>,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        stored.set_next_reminder(next_reminder_at);
        Ok(())
    }

    async fn append_history(&self, entry: &TaskHistoryEntry) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&entry.task_id()) {
            return Err(TaskRepositoryError::NotFound(entry.task_id()));
        }
        state.history.push(entry.clone());
        Ok(())
    }

    async fn history_for_task(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        let state = self.read()?;
        let mut entries: Vec<TaskHistoryEntry> = state
            .history
            .iter()
            .filter(|entry| entry.task_id() == id)
            .cloned()
            .collect();
        entries.reverse();
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.changed_at()));
        Ok(entries)
    }
}
