//! Countdown ticker background task
//!
//! The ticker is the only source of clock ticks. Ownership is a single
//! optional `JoinHandle` slot on the shared state: occupied means running,
//! empty means paused. Toggling never races a second ticker into existence
//! because the slot is checked and filled under its mutex.

use std::{sync::Arc, time::Duration};
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::state::{AppState, TickOutcome};

/// Start the ticker if it is stopped, stop it if it is running. Returns the
/// new running state. Pausing aborts the task immediately; no tick fires
/// after cancellation and none is queued across the pause.
pub fn toggle_ticker(state: &Arc<AppState>) -> Result<bool, String> {
    let mut slot = state.ticker.lock()
        .map_err(|e| format!("Failed to lock ticker slot: {}", e))?;

    let running = if let Some(handle) = slot.take() {
        handle.abort();
        info!("Countdown paused");
        false
    } else {
        let task_state = Arc::clone(state);
        *slot = Some(tokio::spawn(ticker_task(task_state)));
        info!("Countdown started");
        true
    };
    drop(slot);

    let snapshot = state.current_snapshot()?;
    state.record_action(if running { "start" } else { "pause" }, snapshot);
    Ok(running)
}

/// Stop the ticker unconditionally. Returns whether one was running.
pub fn stop_ticker(state: &AppState) -> Result<bool, String> {
    let mut slot = state.ticker.lock()
        .map_err(|e| format!("Failed to lock ticker slot: {}", e))?;

    if let Some(handle) = slot.take() {
        handle.abort();
        debug!("Ticker stopped");
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Apply one tick to the clock and react to the outcome: publish the new
/// snapshot, and sound the alert when the decrement reaches zero.
pub async fn apply_tick(state: &AppState) -> Result<TickOutcome, String> {
    let running = state.is_running()?;

    // The clock guard must end before the alert await below; the tick loop
    // runs on a spawned worker and holds no lock across an await
    let (outcome, snapshot) = {
        let mut clock = state.clock.lock()
            .map_err(|e| format!("Failed to lock clock state: {}", e))?;
        let outcome = clock.tick();
        (outcome, clock.snapshot(running))
    };

    if let Err(e) = state.clock_update_tx.send(snapshot.clone()) {
        warn!("Failed to send clock update: {}", e);
    }

    match outcome {
        TickOutcome::Counted => {
            debug!("Tick: {} {}", snapshot.phase_label, snapshot.display);
        }
        TickOutcome::Expired => {
            info!("{} finished, sounding alert", snapshot.phase_label);
            state.beep.play().await;
        }
        TickOutcome::PhaseFlipped(phase) => {
            info!("Switching to {} ({})", phase.label(), snapshot.display);
        }
    }

    Ok(outcome)
}

/// The tick loop itself. The interval persists across phase flips; it is
/// only created here, on explicit start.
async fn ticker_task(state: Arc<AppState>) {
    debug!("Ticker task started");

    let mut ticks = interval(Duration::from_secs(1));
    // The first tick completes immediately; consume it so the first
    // decrement lands a full second after start
    ticks.tick().await;

    loop {
        ticks.tick().await;
        if let Err(e) = apply_tick(&state).await {
            error!("Ticker failed to advance the clock: {}", e);
        }
    }
}
