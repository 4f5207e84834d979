use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identity assigned at creation, never changes
    pub id: Uuid,
    pub title: String,
    /// Subject or area the task belongs to (e.g. "Maths")
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Task {
    pub fn new(title: String, subject: String, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            subject,
            due_date,
            is_completed: false,
        }
    }

    /// Short id used by the CLI (first 8 hex chars)
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    /// Pending and due before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed && self.due_date.map_or(false, |due| due < today)
    }
}
