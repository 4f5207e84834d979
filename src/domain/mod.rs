pub mod breathing;
pub mod diary;
pub mod enums;
pub mod task;
pub mod views;

pub use breathing::{BreathingPreset, BreathingSession, PhaseDurations, SessionState};
pub use diary::{day_key, prompt_for, DiaryEntry};
pub use enums::Feeling;
pub use task::Task;
pub use views::{calendar_grid, session_line, task_row};
