//! HTTP layer: diagnostic endpoints, the upgrade endpoint, and the static
//! file fallback.

pub mod static_files;
pub mod system;

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::service::RelayService;
use crate::ws::handler::{upgrade_or_serve, ws_handler};

/// Builds the complete router.
///
/// With no `ws_path` configured, a WebSocket upgrade on any unrouted path
/// joins a room and every other request is served from the static
/// directory. With `ws_path` set, only that path upgrades.
pub fn build_router(config: &RelayConfig, relay_service: RelayService) -> Router {
    let state = AppState::new(relay_service, static_files::router(&config.static_dir));

    let router = match &config.ws_path {
        Some(path) => Router::new()
            .route(path, get(ws_handler))
            .fallback_service(state.static_files.clone()),
        None => Router::new().fallback(upgrade_or_serve),
    };

    router
        .merge(system::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Binds the listening socket.
///
/// # Errors
///
/// Returns [`RelayError::Io`] if the address cannot be bound.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, RelayError> {
    Ok(TcpListener::bind(addr).await?)
}

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`RelayError::Io`] if the server fails while accepting.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), RelayError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
