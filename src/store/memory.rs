//! In-memory best-time store for tests and ephemeral runs.

use rustc_hash::FxHashMap;

use super::BestTimeStore;
use crate::core::BoardSize;

/// Best-time store that forgets everything on drop.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<u8, u32>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BestTimeStore for MemoryStore {
    fn load(&self, size: BoardSize) -> Option<u32> {
        self.entries.get(&size.raw()).copied().filter(|&s| s > 0)
    }

    fn save(&mut self, size: BoardSize, seconds: u32) {
        self.entries.insert(size.raw(), seconds);
    }
}
