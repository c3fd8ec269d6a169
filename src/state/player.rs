//! Player state and the registry that owns it.
//!
//! Players are created lazily the first time a client id is seen and live for
//! the whole process. The registry stores them in an arena so that other
//! components (the change log) can hold cheap [`PlayerHandle`]s that always
//! resolve to the player's *current* state.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │        PlayerRegistry        │
//! │                              │
//! │  id ──▶ PlayerHandle ──▶ ┌────────┐
//! │                          │ Player │  x, y, cursor
//! │                          └────────┘
//! └──────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

/// Stable reference to a player inside a [`PlayerRegistry`].
///
/// Handles are never invalidated because players are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerHandle(usize);

impl PlayerHandle {
    /// Position of the player in the registry arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A connected client's shared state.
#[derive(Debug, Clone)]
pub struct Player {
    /// Client-supplied identity
    id: String,

    /// Last reported position
    x: i64,
    y: i64,

    /// Change log index up to which this player has consumed updates
    cursor: usize,

    /// When this player was first referenced
    pub created_at: DateTime<Utc>,

    /// Last time any request referenced this player
    pub last_seen: DateTime<Utc>,
}

impl Player {
    /// Create a player at the origin with nothing consumed yet.
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            x: 0,
            y: 0,
            cursor: 0,
            created_at: now,
            last_seen: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current position as an `(x, y)` pair.
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }

    /// Move the cursor forward. Never moves it backwards.
    pub fn advance_cursor(&mut self, to: usize) {
        self.cursor = self.cursor.max(to);
    }

    /// Record activity.
    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

/// Registry of all players, indexed by client id.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    /// Players in creation order
    players: Vec<Player>,

    /// Client id to arena index
    index: HashMap<String, PlayerHandle>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle for `id`, creating the player if it has never been seen.
    pub fn resolve(&mut self, id: &str) -> PlayerHandle {
        if let Some(handle) = self.index.get(id) {
            return *handle;
        }

        let handle = PlayerHandle(self.players.len());
        self.players.push(Player::new(id));
        self.index.insert(id.to_string(), handle);
        debug!(player_id = %id, %handle, "Created player");
        handle
    }

    /// Look up a player by handle.
    ///
    /// Handles are only produced by [`PlayerRegistry::resolve`], so a handle
    /// from this registry is always valid.
    pub fn get(&self, handle: PlayerHandle) -> &Player {
        &self.players[handle.0]
    }

    pub fn get_mut(&mut self, handle: PlayerHandle) -> &mut Player {
        &mut self.players[handle.0]
    }

    /// Look up a player by id without creating it.
    pub fn find(&self, id: &str) -> Option<&Player> {
        self.index.get(id).map(|handle| self.get(*handle))
    }

    /// All players in creation order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
