use super::kv::KeyValueStore;
use super::store::{DatedRecordStore, Record};
use crate::domain::{day_key, DiaryEntry};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};

/// Storage key for journal entries
pub const DIARY_KEY: &str = "diaryEntries";

pub type DiaryStore<S> = DatedRecordStore<DiaryEntry, S>;

impl Record for DiaryEntry {
    type Key = NaiveDate;

    fn key(&self) -> NaiveDate {
        day_key(&self.date)
    }
}

impl<S: KeyValueStore> DatedRecordStore<DiaryEntry, S> {
    pub fn open(storage: S) -> Self {
        Self::load(storage, DIARY_KEY)
    }

    /// Store an entry, replacing whatever was written earlier the same day
    pub fn save_entry(&mut self, entry: DiaryEntry) -> Result<()> {
        self.upsert(entry)
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&DiaryEntry> {
        self.find_by_key(&date)
    }

    /// Entries written in a month, ordered by day
    pub fn entries_in_month(&self, year: i32, month: u32) -> Vec<&DiaryEntry> {
        let mut entries: Vec<&DiaryEntry> = self
            .records()
            .iter()
            .filter(|entry| {
                let day = entry.day();
                day.year() == year && day.month() == month
            })
            .collect();
        entries.sort_by_key(|entry| entry.day());
        entries
    }
}
