use super::enums::{Backdrop, Phase, VisualPosition};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// Allowed seconds for a custom inhale
pub const INHALE_RANGE: RangeInclusive<u32> = 1..=10;
/// Allowed seconds for a custom hold
pub const HOLD_RANGE: RangeInclusive<u32> = 1..=15;
/// Allowed seconds for a custom exhale
pub const EXHALE_RANGE: RangeInclusive<u32> = 1..=15;

/// Errors raised when configuring a breathing session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreathingError {
    #[error("cannot change durations while a session is running")]
    SessionRunning,
    #[error("{} duration {value}s is outside {min}..={max}s", phase_name(.phase))]
    OutOfRange {
        phase: Phase,
        value: u32,
        min: u32,
        max: u32,
    },
}

fn phase_name(phase: &Phase) -> String {
    phase.label().to_lowercase()
}

/// Seconds spent in each phase of one cycle.
///
/// Only built from a preset or through [`PhaseDurations::custom`], so every
/// value is inside its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    inhale: u32,
    hold: u32,
    exhale: u32,
}

impl PhaseDurations {
    /// Build a validated custom triple. Out-of-range values are rejected, never clamped.
    pub fn custom(inhale: u32, hold: u32, exhale: u32) -> Result<Self, BreathingError> {
        check_range(Phase::Inhale, inhale, INHALE_RANGE)?;
        check_range(Phase::Hold, hold, HOLD_RANGE)?;
        check_range(Phase::Exhale, exhale, EXHALE_RANGE)?;
        Ok(Self { inhale, hold, exhale })
    }

    pub fn inhale(&self) -> u32 {
        self.inhale
    }

    pub fn hold(&self) -> u32 {
        self.hold
    }

    pub fn exhale(&self) -> u32 {
        self.exhale
    }

    pub fn duration(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Inhale => self.inhale,
            Phase::Hold => self.hold,
            Phase::Exhale => self.exhale,
        }
    }

    /// Total seconds for a full inhale/hold/exhale cycle
    pub fn cycle_length(&self) -> u32 {
        self.inhale + self.hold + self.exhale
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        BreathingPreset::Classic.durations_unchecked()
    }
}

fn check_range(phase: Phase, value: u32, range: RangeInclusive<u32>) -> Result<(), BreathingError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(BreathingError::OutOfRange {
            phase,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

/// Breathing pattern chosen by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BreathingPreset {
    /// 4-7-8
    #[default]
    Classic,
    /// 3-4-5
    Fast,
    /// 5-10-10
    Deep,
    Custom { inhale: u32, hold: u32, exhale: u32 },
}

impl BreathingPreset {
    /// Parse a named preset ("classic", "fast", "deep"). Custom needs explicit values.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "fast" => Some(Self::Fast),
            "deep" => Some(Self::Deep),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic (4-7-8)",
            Self::Fast => "Fast (3-4-5)",
            Self::Deep => "Deep (5-10-10)",
            Self::Custom { .. } => "Custom",
        }
    }

    /// Resolve into a concrete duration triple
    pub fn resolve(&self) -> Result<PhaseDurations, BreathingError> {
        match *self {
            Self::Custom { inhale, hold, exhale } => PhaseDurations::custom(inhale, hold, exhale),
            _ => Ok(self.durations_unchecked()),
        }
    }

    fn durations_unchecked(&self) -> PhaseDurations {
        let (inhale, hold, exhale) = match *self {
            Self::Classic => (4, 7, 8),
            Self::Fast => (3, 4, 5),
            Self::Deep => (5, 10, 10),
            Self::Custom { inhale, hold, exhale } => (inhale, hold, exhale),
        };
        PhaseDurations { inhale, hold, exhale }
    }
}

/// Renderable snapshot of a breathing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub is_running: bool,
    pub current_phase: Phase,
    pub seconds_remaining: u32,
    pub visual_position: VisualPosition,
}

impl SessionState {
    /// Background tint for this snapshot
    pub fn backdrop(&self) -> Backdrop {
        Backdrop::for_phase(self.current_phase, self.is_running)
    }

    fn idle(durations: &PhaseDurations) -> Self {
        Self {
            is_running: false,
            current_phase: Phase::Inhale,
            seconds_remaining: durations.inhale,
            visual_position: VisualPosition::Start,
        }
    }
}

/// Inhale/hold/exhale state machine.
///
/// The session never measures time itself: the host calls [`tick`](Self::tick)
/// once per second while a session runs.
#[derive(Debug, Clone)]
pub struct BreathingSession {
    durations: PhaseDurations,
    state: SessionState,
}

impl Default for BreathingSession {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}

impl BreathingSession {
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            durations,
            state: SessionState::idle(&durations),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn durations(&self) -> PhaseDurations {
        self.durations
    }

    /// Switch to a new preset. Durations are frozen while a session runs.
    pub fn configure(&mut self, preset: BreathingPreset) -> Result<PhaseDurations, BreathingError> {
        if self.state.is_running {
            return Err(BreathingError::SessionRunning);
        }
        let durations = preset.resolve()?;
        self.durations = durations;
        self.state = SessionState::idle(&durations);
        Ok(durations)
    }

    /// Begin a session at Inhale. No-op while already running.
    pub fn start(&mut self) -> SessionState {
        if !self.state.is_running {
            self.enter_phase(Phase::Inhale);
        }
        self.state
    }

    /// Return to idle from any state
    pub fn stop(&mut self) -> SessionState {
        self.state = SessionState::idle(&self.durations);
        self.state
    }

    /// Advance one second
    pub fn tick(&mut self) -> SessionState {
        if !self.state.is_running {
            return self.state;
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        if self.state.seconds_remaining == 0 {
            match self.state.current_phase.next() {
                Some(next) => self.enter_phase(next),
                None => {
                    self.stop();
                }
            }
        }
        self.state
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.state = SessionState {
            is_running: true,
            current_phase: phase,
            seconds_remaining: self.durations.duration(phase),
            visual_position: VisualPosition::for_phase(phase, true),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_position_matches(state: &SessionState) {
        assert_eq!(
            state.visual_position,
            VisualPosition::for_phase(state.current_phase, state.is_running)
        );
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = BreathingSession::default();
        let state = session.state();
        assert!(!state.is_running);
        assert_eq!(state.current_phase, Phase::Inhale);
        assert_eq!(state.seconds_remaining, 4);
        assert_eq!(state.visual_position, VisualPosition::Start);
    }

    #[test]
    fn test_classic_session_walkthrough() {
        let mut session = BreathingSession::default();
        let state = session.start();
        assert_eq!(state.visual_position, VisualPosition::Right);
        assert_eq!(state.seconds_remaining, 4);

        for _ in 0..4 {
            session.tick();
        }
        let state = session.state();
        assert_eq!(state.current_phase, Phase::Hold);
        assert_eq!(state.seconds_remaining, 7);
        assert_eq!(state.visual_position, VisualPosition::Bottom);

        for _ in 0..7 {
            session.tick();
        }
        let state = session.state();
        assert_eq!(state.current_phase, Phase::Exhale);
        assert_eq!(state.seconds_remaining, 8);
        assert_eq!(state.visual_position, VisualPosition::Left);

        for _ in 0..8 {
            session.tick();
        }
        let state = session.state();
        assert!(!state.is_running);
        assert_eq!(state.current_phase, Phase::Inhale);
        assert_eq!(state.seconds_remaining, 4);
        assert_eq!(state.visual_position, VisualPosition::Start);
    }

    #[test]
    fn test_every_valid_triple_completes_in_cycle_length_ticks() {
        for inhale in INHALE_RANGE {
            for hold in [1, 7, 15] {
                for exhale in [1, 8, 15] {
                    let durations = PhaseDurations::custom(inhale, hold, exhale).unwrap();
                    let mut session = BreathingSession::new(durations);
                    session.start();

                    let mut seen = vec![Phase::Inhale];
                    for i in 0..durations.cycle_length() {
                        let state = session.tick();
                        assert_position_matches(&state);
                        assert!(state.seconds_remaining <= durations.duration(state.current_phase));
                        if i + 1 < durations.cycle_length() {
                            assert!(state.is_running);
                            if seen.last() != Some(&state.current_phase) {
                                seen.push(state.current_phase);
                            }
                        }
                    }

                    assert_eq!(seen, vec![Phase::Inhale, Phase::Hold, Phase::Exhale]);
                    let state = session.state();
                    assert!(!state.is_running);
                    assert_eq!(state.seconds_remaining, inhale);
                }
            }
        }
    }

    #[test]
    fn test_tick_when_idle_is_noop() {
        let mut session = BreathingSession::default();
        let before = session.state();
        assert_eq!(session.tick(), before);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut session = BreathingSession::default();
        session.start();
        session.tick();
        let before = session.state();
        assert_eq!(session.start(), before);
        assert_eq!(before.seconds_remaining, 3);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut session = BreathingSession::default();
        session.start();
        for _ in 0..6 {
            session.tick();
        }
        let once = session.stop();
        let twice = session.stop();
        assert_eq!(once, twice);
        assert!(!twice.is_running);
        assert_eq!(twice.current_phase, Phase::Inhale);
        assert_eq!(twice.seconds_remaining, 4);
        assert_eq!(twice.visual_position, VisualPosition::Start);
    }

    #[test]
    fn test_configure_while_running_is_rejected() {
        let mut session = BreathingSession::default();
        session.start();
        let result = session.configure(BreathingPreset::Deep);
        assert_eq!(result, Err(BreathingError::SessionRunning));
        assert_eq!(session.durations(), BreathingPreset::Classic.resolve().unwrap());
        assert!(session.state().is_running);
    }

    #[test]
    fn test_configure_when_idle_refreshes_countdown() {
        let mut session = BreathingSession::default();
        let durations = session.configure(BreathingPreset::Deep).unwrap();
        assert_eq!((durations.inhale(), durations.hold(), durations.exhale()), (5, 10, 10));
        assert_eq!(session.state().seconds_remaining, 5);
    }

    #[test]
    fn test_custom_out_of_range_is_rejected() {
        let mut session = BreathingSession::default();
        let result = session.configure(BreathingPreset::Custom { inhale: 11, hold: 3, exhale: 3 });
        assert_eq!(
            result,
            Err(BreathingError::OutOfRange { phase: Phase::Inhale, value: 11, min: 1, max: 10 })
        );
        assert_eq!(session.durations(), PhaseDurations::default());

        assert!(PhaseDurations::custom(3, 0, 3).is_err());
        assert!(PhaseDurations::custom(3, 3, 16).is_err());
        assert!(PhaseDurations::custom(10, 15, 15).is_ok());
    }

    #[test]
    fn test_preset_durations_pass_range_check() {
        assert_eq!(BreathingPreset::default(), BreathingPreset::Classic);
        for preset in [BreathingPreset::Classic, BreathingPreset::Fast, BreathingPreset::Deep] {
            let durations = preset.resolve().unwrap();
            let checked = PhaseDurations::custom(durations.inhale(), durations.hold(), durations.exhale());
            assert_eq!(checked, Ok(durations));
        }
        assert_eq!(PhaseDurations::default(), BreathingPreset::Classic.resolve().unwrap());
    }

    #[test]
    fn test_out_of_range_message() {
        let err = PhaseDurations::custom(4, 20, 8).unwrap_err();
        assert_eq!(err.to_string(), "hold duration 20s is outside 1..=15s");
    }

    #[test]
    fn test_backdrop_follows_phase() {
        let mut session = BreathingSession::new(PhaseDurations::custom(1, 1, 1).unwrap());
        assert_eq!(session.state().backdrop(), Backdrop::Blue);
        session.start();
        assert_eq!(session.state().backdrop(), Backdrop::Blue);
        session.tick();
        assert_eq!(session.state().backdrop(), Backdrop::Purple);
        session.tick();
        assert_eq!(session.state().backdrop(), Backdrop::Pink);
        session.tick();
        assert_eq!(session.state().backdrop(), Backdrop::Blue);
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(BreathingPreset::from_name("Fast"), Some(BreathingPreset::Fast));
        assert_eq!(BreathingPreset::from_name("custom"), None);
        assert_eq!(BreathingPreset::Fast.resolve().unwrap().cycle_length(), 12);
    }

    #[test]
    fn test_preset_serde_shape() {
        let json = serde_json::to_string(&BreathingPreset::Custom { inhale: 2, hold: 3, exhale: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"custom","inhale":2,"hold":3,"exhale":4}"#);
        let back: BreathingPreset = serde_json::from_str(r#"{"kind":"deep"}"#).unwrap();
        assert_eq!(back, BreathingPreset::Deep);
    }
}
