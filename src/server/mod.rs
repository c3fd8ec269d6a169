//! HTTP dispatcher for the sync protocol.
//!
//! Accepts JSON payloads on `POST /ajax.html`, runs them through one shared
//! [`SyncState`] and returns the result map verbatim. Every other `GET` is
//! served from the static asset directory holding the browser front end.
//!
//! The store sits behind a single [`Mutex`]: a request holds it from player
//! resolution until its cursor is stored, so no append can slip in between
//! reading the log length and moving the cursor.

pub mod handlers;
pub mod router;

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;

use crate::state::SyncState;

pub use router::build_router;

/// Default TCP port, the one the browser client is served from.
pub const DEFAULT_PORT: u16 = 8987;

/// Configuration for the dispatcher.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to.
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
    /// Directory holding `game.html` and its assets.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("front_end"),
        }
    }
}

impl ServerConfig {
    /// Page served for `GET /`.
    pub fn landing_page(&self) -> PathBuf {
        self.static_dir.join("game.html")
    }
}

/// Shared state injected into handlers.
#[derive(Debug, Default)]
pub struct AppState {
    pub sync: Mutex<SyncState>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Bind the configured address and serve until the process exits.
///
/// # Errors
///
/// Returns an error if the address is invalid, the listener cannot bind, or
/// the server hits a fatal I/O error.
pub async fn start_server(
    config: &ServerConfig,
    state: std::sync::Arc<AppState>,
) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))?;

    let router = build_router(config, state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    info!(%addr, static_dir = %config.static_dir.display(), "Position sync server listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    Ok(())
}

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bind error: {0}")]
    Bind(String),

    #[error("serve error: {0}")]
    Serve(String),
}
