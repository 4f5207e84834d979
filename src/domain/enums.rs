use serde::{Deserialize, Serialize};

/// One timed segment of a breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// The phase that follows this one, or None after Exhale (end of session)
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Inhale => Some(Self::Hold),
            Self::Hold => Some(Self::Exhale),
            Self::Exhale => None,
        }
    }

    /// Label shown while the phase is active
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inhale => "INHALE",
            Self::Hold => "HOLD",
            Self::Exhale => "EXHALE",
        }
    }
}

/// Discrete position of the breathing marker around the triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualPosition {
    /// Top vertex, shown while idle
    Start,
    Right,
    Bottom,
    Left,
}

impl VisualPosition {
    /// Position for a phase; idle sessions always sit at Start
    pub fn for_phase(phase: Phase, is_running: bool) -> Self {
        if !is_running {
            return Self::Start;
        }
        match phase {
            Phase::Inhale => Self::Right,
            Phase::Hold => Self::Bottom,
            Phase::Exhale => Self::Left,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Start => "🧘",
            Self::Right => "😤",
            Self::Bottom => "😬",
            Self::Left => "😮‍💨",
        }
    }
}

/// Background tint hint for the breathing view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Blue,
    Purple,
    Pink,
}

impl Backdrop {
    pub fn for_phase(phase: Phase, is_running: bool) -> Self {
        match (is_running, phase) {
            (true, Phase::Hold) => Self::Purple,
            (true, Phase::Exhale) => Self::Pink,
            _ => Self::Blue,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }
}

/// Predominant feeling tagged on a diary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feeling {
    Happy,
    Worried,
    Sad,
    Angry,
    Anxious,
    Relaxed,
}

impl Feeling {
    /// Parse from a name like "happy" (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "happy" => Some(Self::Happy),
            "worried" => Some(Self::Worried),
            "sad" => Some(Self::Sad),
            "angry" => Some(Self::Angry),
            "anxious" => Some(Self::Anxious),
            "relaxed" => Some(Self::Relaxed),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Worried => "Worried",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Anxious => "Anxious",
            Self::Relaxed => "Relaxed",
        }
    }

    /// Color hint used to mark the feeling in lists and calendars
    pub fn color(&self) -> &'static str {
        match self {
            Self::Happy => "yellow",
            Self::Worried => "purple",
            Self::Sad => "blue",
            Self::Angry => "red",
            Self::Anxious => "green",
            Self::Relaxed => "cyan",
        }
    }

    /// Single-character marker for calendar cells.
    /// Anxious uses 'X' so it does not collide with Angry.
    pub fn marker(&self) -> char {
        match self {
            Self::Happy => 'H',
            Self::Worried => 'W',
            Self::Sad => 'S',
            Self::Angry => 'A',
            Self::Anxious => 'X',
            Self::Relaxed => 'R',
        }
    }

    pub fn all() -> &'static [Feeling] {
        &[
            Feeling::Happy,
            Feeling::Worried,
            Feeling::Sad,
            Feeling::Angry,
            Feeling::Anxious,
            Feeling::Relaxed,
        ]
    }
}
