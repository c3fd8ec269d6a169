//! Axum router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::{handlers, AppState, ServerConfig};

/// Build the complete router.
///
/// - `POST /ajax.html` -- sync protocol
/// - `GET /health` -- store counters
/// - `GET /` -- `game.html` from the static directory
/// - anything else -- static files, 404 when missing
pub fn build_router(config: &ServerConfig, state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ajax.html", post(handlers::ajax))
        .route("/health", get(handlers::health))
        .route_service("/", ServeFile::new(config.landing_page()))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
