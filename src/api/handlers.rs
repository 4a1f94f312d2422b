//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    state::{AppState, Direction, LengthTarget},
    tasks::{stop_ticker, toggle_ticker},
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Shared logic for the four length-adjustment endpoints. An out-of-range
/// adjustment is not an error: the prior value is kept and reported back.
async fn adjust_handler(
    state: Arc<AppState>,
    target: LengthTarget,
    direction: Direction,
) -> Result<Json<ApiResponse>, StatusCode> {
    let action = match (target, direction) {
        (LengthTarget::Break, Direction::Increment) => "break-increment",
        (LengthTarget::Break, Direction::Decrement) => "break-decrement",
        (LengthTarget::Session, Direction::Increment) => "session-increment",
        (LengthTarget::Session, Direction::Decrement) => "session-decrement",
    };

    match state.update_clock(action, |clock| clock.adjust(target, direction)) {
        Ok((changed, snapshot)) => {
            let minutes = match target {
                LengthTarget::Break => snapshot.break_length_minutes,
                LengthTarget::Session => snapshot.session_length_minutes,
            };
            let message = if changed {
                info!("{} length set to {} minutes", target.label(), minutes);
                format!("{} length set to {} minutes", target.label(), minutes)
            } else {
                info!("{} length at limit, keeping {} minutes", target.label(), minutes);
                format!("{} length kept at {} minutes", target.label(), minutes)
            };
            Ok(Json(ApiResponse::ok(message, snapshot)))
        }
        Err(e) => {
            error!("Failed to adjust {} length: {}", target.label(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /break/increment
pub async fn break_increment_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    adjust_handler(state, LengthTarget::Break, Direction::Increment).await
}

/// Handle POST /break/decrement
pub async fn break_decrement_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    adjust_handler(state, LengthTarget::Break, Direction::Decrement).await
}

/// Handle POST /session/increment
pub async fn session_increment_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    adjust_handler(state, LengthTarget::Session, Direction::Increment).await
}

/// Handle POST /session/decrement
pub async fn session_decrement_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    adjust_handler(state, LengthTarget::Session, Direction::Decrement).await
}

/// Handle POST /toggle - start or pause the countdown
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let running = match toggle_ticker(&state) {
        Ok(running) => running,
        Err(e) => {
            error!("Failed to toggle countdown: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match state.current_snapshot() {
        Ok(snapshot) => {
            let message = if running {
                "Countdown started".to_string()
            } else {
                "Countdown paused".to_string()
            };
            Ok(Json(ApiResponse::ok(message, snapshot)))
        }
        Err(e) => {
            error!("Failed to snapshot clock state: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - stop the countdown, restore defaults, and rewind
/// the alert sound without playing it
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if let Err(e) = stop_ticker(&state) {
        error!("Failed to stop ticker on reset: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    match state.update_clock("reset", |clock| clock.reset()) {
        Ok((_, snapshot)) => {
            state.beep.stop().await;
            info!("Clock reset to defaults");
            Ok(Json(ApiResponse::ok("Clock reset to defaults".to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to reset clock: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - return the current clock and server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.current_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to snapshot clock state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        clock: snapshot,
        alerts_played: state.beep.plays(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
