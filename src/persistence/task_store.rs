use super::kv::KeyValueStore;
use super::store::{DatedRecordStore, Record};
use crate::domain::Task;
use anyhow::Result;
use chrono::NaiveDate;
use uuid::Uuid;

/// Storage key for the task list
pub const TASKS_KEY: &str = "savedTasks";

pub type TaskStore<S> = DatedRecordStore<Task, S>;

impl Record for Task {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id
    }
}

impl<S: KeyValueStore> DatedRecordStore<Task, S> {
    pub fn open(storage: S) -> Self {
        Self::load(storage, TASKS_KEY)
    }

    /// Flip the completion flag of a task. False if the id is unknown.
    pub fn toggle_completion(&mut self, id: Uuid) -> Result<bool> {
        self.toggle_field(|task| task.id == id, |task| &mut task.is_completed)
    }

    pub fn remove_task(&mut self, id: Uuid) -> Result<Option<Task>> {
        self.remove(|task| task.id == id)
    }

    /// Look up a task by the start of its id. None when no task or more than one matches.
    pub fn find_by_prefix(&self, prefix: &str) -> Option<&Task> {
        let prefix = prefix.trim().to_lowercase().replace('-', "");
        if prefix.is_empty() {
            return None;
        }
        let mut matches = self
            .records()
            .iter()
            .filter(|task| task.id.simple().to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Some(task),
            _ => None,
        }
    }

    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.records().iter().filter(|task| !task.is_completed)
    }

    pub fn overdue(&self, today: NaiveDate) -> impl Iterator<Item = &Task> {
        self.records().iter().filter(move |task| task.is_overdue(today))
    }
}
