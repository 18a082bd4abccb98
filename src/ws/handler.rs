//! Axum WebSocket upgrade handlers.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::{Query, Request, State};
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::{RoomId, RoomQuery};

/// `GET <WS_PATH>?room=<token>` — Upgrade HTTP connection to WebSocket.
///
/// A missing or malformed query string puts the connection in the
/// default room; it is never rejected.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    query: Result<Query<RoomQuery>, QueryRejection>,
    State(state): State<AppState>,
) -> Response {
    upgrade(ws, query, &state)
}

/// Fallback for every unrouted path.
///
/// WebSocket upgrade requests join a room whatever their path; everything
/// else is handed to the static file service.
pub async fn upgrade_or_serve(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    query: Result<Query<RoomQuery>, QueryRejection>,
    State(state): State<AppState>,
    request: Request,
) -> Response {
    match ws {
        Ok(ws) => upgrade(ws, query, &state),
        Err(_) => match state.static_files.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        },
    }
}

fn upgrade(
    ws: WebSocketUpgrade,
    query: Result<Query<RoomQuery>, QueryRejection>,
    state: &AppState,
) -> Response {
    let room = RoomId::from_query(query.map(|Query(q)| q));
    let relay_service = Arc::clone(&state.relay_service);

    ws.on_upgrade(move |socket| run_connection(socket, room, relay_service))
        .into_response()
}
