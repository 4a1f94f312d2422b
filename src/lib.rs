//! Pomo Clock - A state-managed HTTP server for a Pomodoro countdown clock
//!
//! This library owns a session/break countdown state machine, a single
//! once-per-second ticker task, and an alert sound collaborator, exposed
//! through a small HTTP control surface.

pub mod api;
pub mod config;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use services::Beeper;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
