//! Append-only change log.
//!
//! Each entry is a dirty marker: a [`PlayerHandle`] saying "this player
//! changed". Entries are resolved against the registry when they are read, so
//! a consumer always sees the player's latest position, once per entry.

use super::player::PlayerHandle;

#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    entries: Vec<PlayerHandle>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a player as changed.
    pub fn append(&mut self, handle: PlayerHandle) {
        self.entries.push(handle);
    }

    /// Number of entries ever appended.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries at positions `[from, len())`, in append order.
    ///
    /// `from` must not exceed [`ChangeLog::len`]; cursors handed out by the
    /// sync protocol never do.
    pub fn slice(&self, from: usize) -> &[PlayerHandle] {
        debug_assert!(
            from <= self.entries.len(),
            "cursor {} past log end {}",
            from,
            self.entries.len()
        );
        self.entries.get(from..).unwrap_or(&[])
    }
}
