//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;

/// `GET /ws`: Upgrade to a WebSocket that streams desk notifications.
///
/// The broadcast receiver is taken before the upgrade completes so no
/// notification published in between is missed.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let event_rx = state.event_bus.subscribe();
    let service = Arc::clone(&state.registration_service);
    tracing::debug!(subscribers = state.event_bus.receiver_count(), "ws upgrade");

    ws.on_upgrade(move |socket| run_connection(socket, event_rx, service))
}
