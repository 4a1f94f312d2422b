//! Pomodoro clock state machine

use serde::{Deserialize, Serialize};

/// Minimum configurable length for either interval, in minutes
pub const MIN_LENGTH_MINUTES: u64 = 1;
/// Maximum configurable length for either interval, in minutes
pub const MAX_LENGTH_MINUTES: u64 = 60;
/// Default break length in minutes
pub const DEFAULT_BREAK_MINUTES: u64 = 5;
/// Default session length in minutes
pub const DEFAULT_SESSION_MINUTES: u64 = 25;

/// Which interval the clock is currently counting down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Session,
    Break,
}

impl Phase {
    /// Label shown on the timer display
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Session => "Session",
            Phase::Break => "Break",
        }
    }

    /// The phase that follows this one
    pub fn next(&self) -> Phase {
        match self {
            Phase::Session => Phase::Break,
            Phase::Break => Phase::Session,
        }
    }
}

/// Which configured length an adjustment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthTarget {
    Break,
    Session,
}

impl LengthTarget {
    pub fn label(&self) -> &'static str {
        match self {
            LengthTarget::Break => "Break",
            LengthTarget::Session => "Session",
        }
    }
}

/// Direction of a one-minute length adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increment,
    Decrement,
}

/// Result of a single one-second tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown decremented and has time remaining
    Counted,
    /// The decrement landed on zero; the alert fires now
    Expired,
    /// The tick observed an exhausted countdown and flipped to the new phase
    PhaseFlipped(Phase),
}

/// Core clock state - both configured lengths, the remaining time, and the
/// current phase. All mutation goes through the methods below; `time_left`
/// is always re-derived through `phase_seconds` whenever an input changes,
/// so there is a single source of truth for what a phase is worth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    /// Break length in minutes, always within [1,60]
    pub break_length: u64,
    /// Session length in minutes, always within [1,60]
    pub session_length: u64,
    /// Remaining time in the current phase, in seconds
    pub time_left: u64,
    /// Current phase
    pub phase: Phase,
}

impl ClockState {
    /// Create a clock at the defaults: 25 minute session, 5 minute break,
    /// session phase, full session remaining
    pub fn new() -> Self {
        Self {
            break_length: DEFAULT_BREAK_MINUTES,
            session_length: DEFAULT_SESSION_MINUTES,
            time_left: DEFAULT_SESSION_MINUTES * 60,
            phase: Phase::Session,
        }
    }

    /// Full length of the current phase in seconds
    pub fn phase_seconds(&self) -> u64 {
        match self.phase {
            Phase::Break => self.break_length * 60,
            Phase::Session => self.session_length * 60,
        }
    }

    /// Adjust one of the configured lengths by one minute. Proposals outside
    /// [1,60] are rejected silently and the prior value is kept. On any
    /// accepted adjustment the remaining time snaps to the current phase's
    /// full length, including mid-countdown; elapsed progress is discarded.
    ///
    /// Returns whether the value actually changed.
    pub fn adjust(&mut self, target: LengthTarget, direction: Direction) -> bool {
        let current = match target {
            LengthTarget::Break => self.break_length,
            LengthTarget::Session => self.session_length,
        };
        let proposed = match direction {
            Direction::Increment => current + 1,
            Direction::Decrement => current.saturating_sub(1),
        };
        if !(MIN_LENGTH_MINUTES..=MAX_LENGTH_MINUTES).contains(&proposed) {
            return false;
        }
        match target {
            LengthTarget::Break => self.break_length = proposed,
            LengthTarget::Session => self.session_length = proposed,
        }
        self.time_left = self.phase_seconds();
        true
    }

    /// Advance the countdown by one second. A tick that observes an already
    /// exhausted countdown flips the phase instead of decrementing, so zero
    /// stays on the display for one full tick before the jump to the new
    /// phase's full length.
    pub fn tick(&mut self) -> TickOutcome {
        if self.time_left == 0 {
            self.phase = self.phase.next();
            self.time_left = self.phase_seconds();
            TickOutcome::PhaseFlipped(self.phase)
        } else {
            self.time_left -= 1;
            if self.time_left == 0 {
                TickOutcome::Expired
            } else {
                TickOutcome::Counted
            }
        }
    }

    /// Restore all defaults
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Remaining time formatted for the display
    pub fn display(&self) -> String {
        format_time(self.time_left)
    }

    /// Build a serializable snapshot of the clock for API responses and the
    /// update channel
    pub fn snapshot(&self, running: bool) -> ClockSnapshot {
        ClockSnapshot {
            phase: self.phase,
            phase_label: self.phase.label().to_string(),
            display: self.display(),
            time_left_seconds: self.time_left,
            break_length_minutes: self.break_length,
            session_length_minutes: self.session_length,
            running,
            start_stop_label: if running { "Pause" } else { "Start" }.to_string(),
        }
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the clock, as rendered to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub phase: Phase,
    pub phase_label: String,
    /// Remaining time as zero-padded `MM:SS`
    pub display: String,
    pub time_left_seconds: u64,
    pub break_length_minutes: u64,
    pub session_length_minutes: u64,
    pub running: bool,
    /// What the start/pause affordance should read right now
    pub start_stop_label: String,
}

/// Format seconds as zero-padded `MM:SS`. Minutes are not wrapped at 60, so
/// a full 60-minute session renders as "60:00".
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let clock = ClockState::new();
        assert_eq!(clock.break_length, 5);
        assert_eq!(clock.session_length, 25);
        assert_eq!(clock.time_left, 1500);
        assert_eq!(clock.phase, Phase::Session);
        assert_eq!(clock.display(), "25:00");
    }

    #[test]
    fn test_adjust_moves_by_one_minute() {
        let mut clock = ClockState::new();
        assert!(clock.adjust(LengthTarget::Break, Direction::Increment));
        assert_eq!(clock.break_length, 6);
        assert!(clock.adjust(LengthTarget::Session, Direction::Decrement));
        assert_eq!(clock.session_length, 24);
    }

    #[test]
    fn test_adjust_clamps_at_bounds() {
        let mut clock = ClockState::new();
        for _ in 0..10 {
            clock.adjust(LengthTarget::Break, Direction::Decrement);
        }
        assert_eq!(clock.break_length, 1);
        assert!(!clock.adjust(LengthTarget::Break, Direction::Decrement));
        assert_eq!(clock.break_length, 1);

        for _ in 0..50 {
            clock.adjust(LengthTarget::Session, Direction::Increment);
        }
        assert_eq!(clock.session_length, 60);
        assert!(!clock.adjust(LengthTarget::Session, Direction::Increment));
        assert_eq!(clock.session_length, 60);
    }

    #[test]
    fn test_lengths_stay_in_range_under_any_sequence() {
        let mut clock = ClockState::new();
        let moves = [
            (LengthTarget::Break, Direction::Decrement),
            (LengthTarget::Break, Direction::Decrement),
            (LengthTarget::Session, Direction::Increment),
            (LengthTarget::Break, Direction::Increment),
            (LengthTarget::Session, Direction::Decrement),
        ];
        for _ in 0..100 {
            for (target, direction) in moves {
                clock.adjust(target, direction);
                assert!((1..=60).contains(&clock.break_length));
                assert!((1..=60).contains(&clock.session_length));
            }
        }
    }

    #[test]
    fn test_session_adjust_recomputes_time_left() {
        let mut clock = ClockState::new();
        clock.adjust(LengthTarget::Session, Direction::Increment);
        assert_eq!(clock.time_left, 26 * 60);
        assert_eq!(clock.display(), "26:00");
    }

    #[test]
    fn test_break_adjust_leaves_session_display_alone() {
        let mut clock = ClockState::new();
        clock.adjust(LengthTarget::Break, Direction::Increment);
        assert_eq!(clock.break_length, 6);
        // Still in the session phase, still showing the full session
        assert_eq!(clock.time_left, 1500);
    }

    #[test]
    fn test_session_adjust_mid_countdown_discards_progress() {
        let mut clock = ClockState::new();
        for _ in 0..700 {
            clock.tick();
        }
        assert_eq!(clock.time_left, 800);
        clock.adjust(LengthTarget::Session, Direction::Decrement);
        assert_eq!(clock.time_left, 24 * 60);
    }

    #[test]
    fn test_full_session_countdown_alerts_once() {
        let mut clock = ClockState::new();
        let mut alerts = 0;
        for _ in 0..1500 {
            if clock.tick() == TickOutcome::Expired {
                alerts += 1;
            }
        }
        assert_eq!(clock.time_left, 0);
        assert_eq!(clock.phase, Phase::Session);
        assert_eq!(clock.display(), "00:00");
        assert_eq!(alerts, 1);
    }

    #[test]
    fn test_zero_holds_for_one_tick_then_flips() {
        let mut clock = ClockState::new();
        for _ in 0..1500 {
            clock.tick();
        }
        // Exhausted but still in the session phase for one tick
        assert_eq!(clock.time_left, 0);
        assert_eq!(clock.phase, Phase::Session);

        let outcome = clock.tick();
        assert_eq!(outcome, TickOutcome::PhaseFlipped(Phase::Break));
        assert_eq!(clock.phase, Phase::Break);
        assert_eq!(clock.time_left, 5 * 60);
    }

    #[test]
    fn test_break_flips_back_to_session() {
        let mut clock = ClockState::new();
        for _ in 0..1501 {
            clock.tick();
        }
        assert_eq!(clock.phase, Phase::Break);
        // Run the break down and through the flip
        for _ in 0..300 {
            clock.tick();
        }
        assert_eq!(clock.time_left, 0);
        assert_eq!(clock.tick(), TickOutcome::PhaseFlipped(Phase::Session));
        assert_eq!(clock.phase, Phase::Session);
        assert_eq!(clock.time_left, 25 * 60);
    }

    #[test]
    fn test_flip_uses_current_lengths() {
        let mut clock = ClockState::new();
        clock.adjust(LengthTarget::Break, Direction::Increment);
        clock.adjust(LengthTarget::Session, Direction::Decrement);
        for _ in 0..(24 * 60) {
            clock.tick();
        }
        assert_eq!(clock.time_left, 0);
        clock.tick();
        assert_eq!(clock.phase, Phase::Break);
        assert_eq!(clock.time_left, 6 * 60);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut clock = ClockState::new();
        clock.adjust(LengthTarget::Break, Direction::Increment);
        clock.adjust(LengthTarget::Session, Direction::Decrement);
        for _ in 0..2000 {
            clock.tick();
        }
        clock.reset();
        assert_eq!(clock, ClockState::new());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(1500), "25:00");
    }

    #[test]
    fn test_snapshot_labels() {
        let clock = ClockState::new();
        let idle = clock.snapshot(false);
        assert_eq!(idle.phase_label, "Session");
        assert_eq!(idle.start_stop_label, "Start");
        assert!(!idle.running);

        let running = clock.snapshot(true);
        assert_eq!(running.start_stop_label, "Pause");
        assert!(running.running);
    }
}
