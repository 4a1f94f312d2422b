//! Background tasks module
//!
//! This module contains the countdown ticker that runs alongside the HTTP
//! server while the clock is started.

pub mod ticker;

// Re-export main functions
pub use ticker::{apply_tick, stop_ticker, toggle_ticker};
