//! Position Sync Library
//!
//! This crate provides the shared state behind a multiplayer position-sharing
//! service: clients report where they are and periodically pull everyone
//! else's positions that changed since their last pull.
//!
//! # Overview
//!
//! - **Player Registry** - Players keyed by client id, created on first
//!   reference and kept for the life of the process.
//!
//! - **Change Log** - Append-only dirty markers. Each entry points at a
//!   player, not at a copy of its state.
//!
//! - **Sync Protocol** - `Click` reports a position, `Update` returns the
//!   log suffix past the caller's cursor and advances the cursor.
//!
//! - **HTTP Dispatcher** - Axum server that feeds JSON payloads through the
//!   protocol and serves the browser front end.
//!
//! # Design Principles
//!
//! 1. **Dirty markers, not snapshots** - A client that catches up late sees
//!    the latest position once per report it missed.
//!
//! 2. **One owner** - [`SyncState`] owns the registry and the log. The
//!    server guards it with a single lock, one request at a time.
//!
//! 3. **Serialization-ready** - Responses convert straight to JSON.
//!
//! # Example
//!
//! ```rust
//! use position_sync::state::SyncState;
//! use serde_json::json;
//!
//! let mut state = SyncState::new();
//!
//! state
//!     .dispatch(&json!({"action": "Click", "id": "p1", "x": 3, "y": 4}))
//!     .unwrap();
//!
//! let response = state
//!     .dispatch(&json!({"action": "Update", "id": "p2"}))
//!     .unwrap();
//! assert_eq!(response, json!({"updates": [["p1", 3, 4]]}));
//! ```

pub mod error;
pub mod server;
pub mod state;

pub use error::RequestError;
pub use server::{build_router, start_server, AppState, ServerConfig, ServerError};
pub use state::*;
