//! System endpoints: health check and room diagnostics.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::app_state::AppState;
use crate::domain::RoomId;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    version: &'static str,
    rooms: usize,
    connections: usize,
}

/// `GET /health` — Service health status with live room and connection
/// counts.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let registry = state.relay_service.registry();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            rooms: registry.room_count().await,
            connections: registry.connection_count().await,
        }),
    )
}

/// One row of the room listing.
#[derive(Debug, Serialize)]
pub struct RoomSummary {
    room: RoomId,
    members: usize,
}

/// `GET /rooms` — Live rooms and their member counts.
pub async fn rooms_handler(State(state): State<AppState>) -> impl IntoResponse {
    let rooms: Vec<RoomSummary> = state
        .relay_service
        .registry()
        .room_sizes()
        .await
        .into_iter()
        .map(|(room, members)| RoomSummary { room, members })
        .collect();
    (StatusCode::OK, Json(rooms))
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/rooms", get(rooms_handler))
}
