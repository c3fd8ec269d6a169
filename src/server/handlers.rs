//! Endpoint handlers.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/ajax.html` | Run a Click / Update payload |
//! | `GET` | `/health` | Player and log counts |

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::debug;

use super::AppState;
use crate::error::RequestError;

/// Run one protocol payload and return the result map.
pub async fn ajax(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, RequestError> {
    debug!(%payload, "ajax request");

    let mut sync = state.sync.lock().await;
    let response = sync.dispatch(&payload)?;

    Ok(Json(response))
}

/// Report how many players and log entries the store holds.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let sync = state.sync.lock().await;

    Json(serde_json::json!({
        "status": "ok",
        "players": sync.players().len(),
        "log_len": sync.change_log().len(),
    }))
}
