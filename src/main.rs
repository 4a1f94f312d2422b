//! Pomo Clock - A state-managed HTTP server for a Pomodoro countdown clock
//!
//! This is the main entry point for the pomo-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use pomo_clock::{
    api::create_router,
    config::Config,
    services::{check_player_available, Beeper},
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomo_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomo-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Wire up the alert sound. A missing player is not fatal; the clock
    // runs with alerts muted.
    let beep = if config.mute {
        info!("Alerts muted by configuration");
        Beeper::muted()
    } else if let Err(e) = check_player_available(&config.player).await {
        warn!("{}, running with alerts muted", e);
        Beeper::muted()
    } else {
        info!("Alert sound: {} via {}", config.sound, config.player);
        Beeper::new(config.player.clone(), config.sound.clone())
    };

    // Create application state; the ticker is only spawned when the
    // countdown is started through the API
    let state = Arc::new(AppState::new(config.port, config.host.clone(), beep));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /break/increment    - Break length +1 minute");
    info!("  POST /break/decrement    - Break length -1 minute");
    info!("  POST /session/increment  - Session length +1 minute");
    info!("  POST /session/decrement  - Session length -1 minute");
    info!("  POST /toggle             - Start or pause the countdown");
    info!("  POST /reset              - Restore defaults");
    info!("  GET  /status             - Clock display and server status");
    info!("  GET  /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
