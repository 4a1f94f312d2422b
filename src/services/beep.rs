//! Alert sound playback
//!
//! The clock only triggers playback; decoding and output belong to an
//! external command-line player (paplay, aplay, afplay, ...). Each play
//! starts a fresh player process at the top of the file, so killing the
//! process is both "stop" and "rewind".

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Handle to the alert sound resource
#[derive(Debug)]
pub struct Beeper {
    player: String,
    /// Path to the sound file; `None` means alerts are muted
    sound: Option<String>,
    /// The in-flight player process, if playback is underway
    playing: Mutex<Option<Child>>,
    /// Total number of times the alert has been triggered
    plays: AtomicU64,
}

impl Beeper {
    /// Create a beeper that plays `sound` through `player`
    pub fn new(player: String, sound: String) -> Self {
        Self {
            player,
            sound: Some(sound),
            playing: Mutex::new(None),
            plays: AtomicU64::new(0),
        }
    }

    /// Create a muted beeper: triggers are counted and logged but no
    /// process is ever spawned
    pub fn muted() -> Self {
        Self {
            player: String::new(),
            sound: None,
            playing: Mutex::new(None),
            plays: AtomicU64::new(0),
        }
    }

    /// Play the alert from the start. Playback failure is non-fatal: the
    /// clock keeps running and the failure is logged as a warning.
    pub async fn play(&self) {
        self.plays.fetch_add(1, Ordering::Relaxed);

        let Some(sound) = &self.sound else {
            debug!("Alert triggered (muted)");
            return;
        };

        let mut playing = self.playing.lock().await;

        // Restart from the top if the previous alert is still sounding
        if let Some(mut previous) = playing.take() {
            if let Err(e) = previous.kill().await {
                warn!("Failed to stop previous alert playback: {}", e);
            }
        }

        match Command::new(&self.player).arg(sound).spawn() {
            Ok(child) => {
                debug!("Alert playback started via {}", self.player);
                *playing = Some(child);
            }
            Err(e) => {
                warn!("Failed to play alert sound: {}", e);
            }
        }
    }

    /// Stop any in-flight playback and rewind to the start, without playing
    pub async fn stop(&self) {
        let mut playing = self.playing.lock().await;
        if let Some(mut child) = playing.take() {
            if let Err(e) = child.kill().await {
                warn!("Failed to stop alert playback: {}", e);
            }
        }
    }

    /// Total number of alert triggers since startup
    pub fn plays(&self) -> u64 {
        self.plays.load(Ordering::Relaxed)
    }

    /// Whether this beeper will actually spawn a player
    pub fn is_muted(&self) -> bool {
        self.sound.is_none()
    }
}

/// Check if the configured audio player is available on the system
pub async fn check_player_available(player: &str) -> Result<(), String> {
    Command::new(player)
        .arg("--version")
        .output()
        .await
        .map_err(|_| format!("audio player '{}' is not available", player))?;

    info!("Audio player '{}' is available", player);
    Ok(())
}
