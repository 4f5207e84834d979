use crate::domain::{BreathingPreset, BreathingSession, DiaryEntry, Feeling, PhaseDurations, Task};
use crate::persistence::{DiaryStore, KeyValueStore, Settings, TaskStore};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use uuid::Uuid;

/// Everything the host needs: both record stores and the breathing session
pub struct AppState<S> {
    pub tasks: TaskStore<S>,
    pub diary: DiaryStore<S>,
    pub session: BreathingSession,
    /// Preset the session is configured with
    pub preset: BreathingPreset,
}

impl<S: KeyValueStore + Clone> AppState<S> {
    pub fn open(storage: S, settings: &Settings) -> Self {
        let mut session = BreathingSession::default();
        let preset = match session.configure(settings.preset) {
            Ok(_) => settings.preset,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring saved breathing preset");
                BreathingPreset::default()
            }
        };

        Self {
            tasks: TaskStore::open(storage.clone()),
            diary: DiaryStore::open(storage),
            session,
            preset,
        }
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Create a task. Title and subject are required.
    pub fn add_task(&mut self, title: &str, subject: &str, due_date: Option<NaiveDate>) -> Result<Uuid> {
        let title = title.trim();
        let subject = subject.trim();
        if title.is_empty() || subject.is_empty() {
            anyhow::bail!("A task needs both a title and a subject");
        }

        let task = Task::new(title.to_string(), subject.to_string(), due_date);
        let id = task.id;
        self.tasks.add(task)?;
        Ok(id)
    }

    /// Flip completion of the task whose id starts with `prefix`
    pub fn toggle_task(&mut self, prefix: &str) -> Result<&Task> {
        let id = self.resolve_task(prefix)?;
        self.tasks.toggle_completion(id)?;
        self.tasks
            .find_by_key(&id)
            .with_context(|| format!("Task {} disappeared", id))
    }

    pub fn remove_task(&mut self, prefix: &str) -> Result<Task> {
        let id = self.resolve_task(prefix)?;
        self.tasks
            .remove_task(id)?
            .with_context(|| format!("Task {} disappeared", id))
    }

    fn resolve_task(&self, prefix: &str) -> Result<Uuid> {
        self.tasks
            .find_by_prefix(prefix)
            .map(|task| task.id)
            .with_context(|| format!("No single task matches '{}'", prefix))
    }

    /// Write today's journal entry. A second entry on the same day replaces the first.
    pub fn write_entry(&mut self, now: DateTime<FixedOffset>, text: &str, feeling: Feeling) -> Result<&DiaryEntry> {
        let text = text.trim();
        if text.is_empty() {
            anyhow::bail!("A journal entry can't be empty");
        }

        let entry = DiaryEntry::new(now, text.to_string(), feeling);
        let day = entry.day();
        self.diary.save_entry(entry)?;
        self.diary
            .entry_for(day)
            .with_context(|| format!("Entry for {} disappeared", day))
    }

    pub fn configure_breathing(&mut self, preset: BreathingPreset) -> Result<PhaseDurations> {
        let durations = self.session.configure(preset)?;
        self.preset = preset;
        Ok(durations)
    }

    /// Pick the preset for the next session: the requested one, or whatever the
    /// session already holds (the saved preset, or the default if that was invalid)
    pub fn prepare_breathing(&mut self, requested: Option<BreathingPreset>) -> Result<BreathingPreset> {
        if let Some(preset) = requested {
            self.configure_breathing(preset)?;
        }
        Ok(self.preset)
    }
}
