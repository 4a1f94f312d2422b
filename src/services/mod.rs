//! External collaborator module
//!
//! This module contains the alert sound collaborator. The clock core never
//! touches audio directly; it only triggers this service.

pub mod beep;

// Re-export main types
pub use beep::{check_player_available, Beeper};
