//! Player position state.
//!
//! - `player` - Player entities and the registry that owns them
//! - `change_log` - Append-only dirty markers
//! - `sync` - The Click / Update protocol over both
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        SyncState                          │
//! │                                                           │
//! │  ┌──────────────────┐         ┌───────────────────────┐   │
//! │  │  PlayerRegistry  │         │       ChangeLog       │   │
//! │  │                  │         │                       │   │
//! │  │  id → handle     │◀────────│  [handle, handle, …]  │   │
//! │  │  handle → Player │  reads  │                       │   │
//! │  │   (x, y, cursor) │         │  append-only          │   │
//! │  └──────────────────┘         └───────────────────────┘   │
//! │                                                           │
//! │  Click:  set x,y  ─▶ append(handle)                       │
//! │  Update: slice(cursor..len) ─▶ cursor = len               │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use position_sync::state::SyncState;
//!
//! let mut state = SyncState::new();
//! state.report_position("alice", 10, 20);
//!
//! let updates = state.fetch_updates("bob");
//! assert_eq!(updates.len(), 1);
//! assert_eq!(updates[0].position(), (10, 20));
//! ```

pub mod change_log;
pub mod player;
pub mod sync;

pub use change_log::ChangeLog;
pub use player::{Player, PlayerHandle, PlayerRegistry};
pub use sync::{
    PlayerUpdate, SyncRequest, SyncResponse, SyncState, ACK_MESSAGE, ACTION_CLICK, ACTION_UPDATE,
};
