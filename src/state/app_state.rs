//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{sync::watch, task::JoinHandle};
use tracing::warn;

use crate::services::Beeper;

use super::{ClockSnapshot, ClockState};

/// Main application state that owns the clock, the ticker handle, and the
/// alert collaborator
#[derive(Debug)]
pub struct AppState {
    /// The Pomodoro clock state machine
    pub clock: Arc<Mutex<ClockState>>,
    /// The single active ticker task, if any. Occupancy of this slot IS the
    /// running flag; there is no separate boolean to keep in sync.
    pub(crate) ticker: Mutex<Option<JoinHandle<()>>>,
    /// Alert sound collaborator
    pub beep: Beeper,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel publishing a snapshot after every clock mutation
    pub clock_update_tx: watch::Sender<ClockSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _clock_update_rx: watch::Receiver<ClockSnapshot>,
}

impl AppState {
    /// Create a new AppState with the clock at its defaults
    pub fn new(port: u16, host: String, beep: Beeper) -> Self {
        let clock = ClockState::new();
        let (clock_update_tx, clock_update_rx) = watch::channel(clock.snapshot(false));

        Self {
            clock: Arc::new(Mutex::new(clock)),
            ticker: Mutex::new(None),
            beep,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            clock_update_tx,
            _clock_update_rx: clock_update_rx,
        }
    }

    /// Whether a ticker task is currently registered
    pub fn is_running(&self) -> Result<bool, String> {
        self.ticker.lock()
            .map(|slot| slot.is_some())
            .map_err(|e| format!("Failed to lock ticker slot: {}", e))
    }

    /// Apply a mutation to the clock and publish the resulting snapshot
    pub fn update_clock<T, F>(&self, action: &str, updater: F) -> Result<(T, ClockSnapshot), String>
    where
        F: FnOnce(&mut ClockState) -> T,
    {
        let running = self.is_running()?;

        let mut clock = self.clock.lock()
            .map_err(|e| format!("Failed to lock clock state: {}", e))?;
        let result = updater(&mut clock);
        let snapshot = clock.snapshot(running);
        drop(clock); // Release the lock early

        self.record_action(action, snapshot.clone());
        Ok((result, snapshot))
    }

    /// Snapshot the clock as it stands right now
    pub fn current_snapshot(&self) -> Result<ClockSnapshot, String> {
        let running = self.is_running()?;
        self.clock.lock()
            .map(|clock| clock.snapshot(running))
            .map_err(|e| format!("Failed to lock clock state: {}", e))
    }

    /// Update last action tracking and notify snapshot watchers
    pub fn record_action(&self, action: &str, snapshot: ClockSnapshot) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        if let Err(e) = self.clock_update_tx.send(snapshot) {
            warn!("Failed to send clock update: {}", e);
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
