use crate::domain::{BreathingSession, SessionState};
use std::thread;
use std::time::Duration;

/// Tick interval for breathing sessions in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Start a session and tick it every `interval` until it returns to idle.
/// `on_state` sees the state after the start and after every tick.
pub fn run_session<F>(session: &mut BreathingSession, interval: Duration, mut on_state: F) -> SessionState
where
    F: FnMut(&SessionState),
{
    let mut state = session.start();
    on_state(&state);

    while state.is_running {
        thread::sleep(interval);
        state = session.tick();
        on_state(&state);
    }

    state
}
