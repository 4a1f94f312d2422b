//! State management module
//!
//! This module contains the clock state machine and the shared application
//! state that wraps it.

pub mod app_state;
pub mod clock_state;

// Re-export main types
pub use app_state::AppState;
pub use clock_state::{
    format_time, ClockSnapshot, ClockState, Direction, LengthTarget, Phase, TickOutcome,
};
