use super::enums::Feeling;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prompts offered above the journal editor
pub const PROMPTS: &[&str] = &[
    "What's on your mind today?",
    "Was today a good day?",
    "What did you learn today?",
    "Write it here before you tell the group chat",
    "Don't worry, this journal has read worse",
    "Tell your journal. It doesn't interrupt, doesn't judge and doesn't send ten-minute voice notes",
    "Your journal actually listens, unlike your friends in the group chat",
    "If today was a disaster, at least you'll have something funny to read later",
];

/// A single journal entry. One entry is kept per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: Uuid,
    /// When the entry was written, with the writer's UTC offset
    pub date: DateTime<FixedOffset>,
    pub text: String,
    pub feeling: Feeling,
}

impl DiaryEntry {
    pub fn new(date: DateTime<FixedOffset>, text: String, feeling: Feeling) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            text,
            feeling,
        }
    }

    /// Calendar day this entry belongs to
    pub fn day(&self) -> NaiveDate {
        day_key(&self.date)
    }
}

/// Truncate a timestamp to its calendar day.
///
/// Uses the offset carried by the timestamp, not the machine's zone, so the
/// result is the same wherever it runs.
pub fn day_key(timestamp: &DateTime<FixedOffset>) -> NaiveDate {
    timestamp.date_naive()
}

/// Prompt for a given day. Stable for the whole day.
pub fn prompt_for(date: NaiveDate) -> &'static str {
    let index = date.num_days_from_ce().rem_euclid(PROMPTS.len() as i32) as usize;
    PROMPTS[index]
}
