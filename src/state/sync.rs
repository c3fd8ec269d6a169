//! Position synchronization protocol.
//!
//! Two request kinds run against one [`PlayerRegistry`] and one
//! [`ChangeLog`]:
//!
//! - **Click** ([`SyncState::report_position`]) stores the caller's position
//!   and appends a dirty marker for it.
//! - **Update** ([`SyncState::fetch_updates`]) returns every marker past the
//!   caller's cursor, resolved to current positions, and moves the cursor to
//!   the end of the log.
//!
//! # Catch-up
//!
//! ```text
//!   log:     [ p1 | p1 | p2 | p3 ]
//!                       ▲          ▲
//!               p2.cursor      len()
//!
//!   fetch_updates("p2")  ──▶  [(p2,x,y), (p3,x,y)]   p2.cursor = 4
//! ```
//!
//! Markers are handles, not snapshots: if `p1` reports twice before anyone
//! reads, both entries resolve to `p1`'s latest position.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use super::change_log::ChangeLog;
use super::player::{Player, PlayerRegistry};
use crate::error::RequestError;

/// Message returned for every accepted position report.
pub const ACK_MESSAGE: &str = "position recorded";

/// Action name for [`SyncRequest::ReportPosition`].
pub const ACTION_CLICK: &str = "Click";

/// Action name for [`SyncRequest::FetchUpdates`].
pub const ACTION_UPDATE: &str = "Update";

/// A decoded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncRequest {
    ReportPosition { id: String, x: i64, y: i64 },
    FetchUpdates { id: String },
    /// Any action name the protocol does not know
    Unknown(String),
}

impl SyncRequest {
    /// Decode a key/value payload.
    ///
    /// Every field the action needs is checked here, so a payload that fails
    /// to decode never touches the store.
    pub fn from_payload(payload: &Value) -> Result<Self, RequestError> {
        let action = str_field(payload, "action")?;

        match action {
            ACTION_CLICK => Ok(Self::ReportPosition {
                id: str_field(payload, "id")?.to_string(),
                x: int_field(payload, "x")?,
                y: int_field(payload, "y")?,
            }),
            ACTION_UPDATE => Ok(Self::FetchUpdates {
                id: str_field(payload, "id")?.to_string(),
            }),
            other => Ok(Self::Unknown(other.to_string())),
        }
    }

    pub fn action(&self) -> &str {
        match self {
            Self::ReportPosition { .. } => ACTION_CLICK,
            Self::FetchUpdates { .. } => ACTION_UPDATE,
            Self::Unknown(action) => action,
        }
    }
}

fn field<'a>(payload: &'a Value, name: &'static str) -> Result<&'a Value, RequestError> {
    payload.get(name).ok_or(RequestError::MissingField(name))
}

fn str_field<'a>(payload: &'a Value, name: &'static str) -> Result<&'a str, RequestError> {
    field(payload, name)?
        .as_str()
        .ok_or(RequestError::InvalidField {
            field: name,
            expected: "a string",
        })
}

fn int_field(payload: &Value, name: &'static str) -> Result<i64, RequestError> {
    field(payload, name)?
        .as_i64()
        .ok_or(RequestError::InvalidField {
            field: name,
            expected: "an integer",
        })
}

/// One player's position as seen by a catching-up client.
///
/// Serializes as a `[id, x, y]` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate(pub String, pub i64, pub i64);

impl PlayerUpdate {
    fn of(player: &Player) -> Self {
        let (x, y) = player.position();
        Self(player.id().to_string(), x, y)
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn position(&self) -> (i64, i64) {
        (self.1, self.2)
    }
}

/// Result of handling a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResponse {
    /// A position report was stored
    Ack { message: String },
    /// Positions changed since the caller's last fetch, in log order
    Updates(Vec<PlayerUpdate>),
    /// Unrecognized action
    Empty,
}

impl SyncResponse {
    /// Convert to the key/value map returned to clients.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Ack { message } => serde_json::json!({ "message": message }),
            Self::Updates(updates) => serde_json::json!({ "updates": updates }),
            Self::Empty => serde_json::json!({}),
        }
    }
}

/// The player store plus its change log.
///
/// Methods take `&mut self`; callers that share a `SyncState` across tasks
/// must run each request under one lock.
#[derive(Debug, Default)]
pub struct SyncState {
    players: PlayerRegistry,
    log: ChangeLog,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode, apply and encode one payload.
    pub fn dispatch(&mut self, payload: &Value) -> Result<Value, RequestError> {
        let request = SyncRequest::from_payload(payload)?;
        trace!(action = request.action(), "Dispatching request");
        Ok(self.handle(request).to_json())
    }

    /// Apply a decoded request.
    pub fn handle(&mut self, request: SyncRequest) -> SyncResponse {
        match request {
            SyncRequest::ReportPosition { id, x, y } => self.report_position(&id, x, y),
            SyncRequest::FetchUpdates { id } => SyncResponse::Updates(self.fetch_updates(&id)),
            SyncRequest::Unknown(action) => {
                debug!(%action, "Ignoring unknown action");
                SyncResponse::Empty
            }
        }
    }

    /// Store `id`'s new position and mark it dirty.
    pub fn report_position(&mut self, id: &str, x: i64, y: i64) -> SyncResponse {
        let handle = self.players.resolve(id);
        let player = self.players.get_mut(handle);
        player.set_position(x, y);
        player.touch();
        self.log.append(handle);

        debug!(player_id = %id, x, y, log_len = self.log.len(), "Position reported");

        SyncResponse::Ack {
            message: ACK_MESSAGE.to_string(),
        }
    }

    /// Everything logged since `id`'s cursor, resolved to current positions.
    ///
    /// The cursor moves to the log length observed before the batch is
    /// built. A never-seen id starts at 0 and receives the whole history.
    pub fn fetch_updates(&mut self, id: &str) -> Vec<PlayerUpdate> {
        let handle = self.players.resolve(id);
        let end = self.log.len();
        let from = self.players.get(handle).cursor();

        let player = self.players.get_mut(handle);
        player.advance_cursor(end);
        player.touch();

        let updates: Vec<PlayerUpdate> = self
            .log
            .slice(from)
            .iter()
            .map(|entry| PlayerUpdate::of(self.players.get(*entry)))
            .collect();

        debug!(player_id = %id, from, to = end, count = updates.len(), "Updates fetched");
        updates
    }

    /// Current cursor for `id`, if the player exists.
    pub fn cursor_of(&self, id: &str) -> Option<usize> {
        self.players.find(id).map(Player::cursor)
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.log
    }
}
