//! Best-time persistence.
//!
//! One integer per board size: the fewest seconds a completed round has
//! ever taken, surviving process restarts. The store is deliberately
//! infallible at the trait level; a storage failure is logged and
//! swallowed, never surfaced to the player. The controller alone decides
//! when a new time is an improvement, so `save` overwrites unconditionally.

use rustc_hash::FxHashMap;

use crate::core::BoardSize;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Durable best-time records keyed by board size.
pub trait BestTimeStore {
    /// The stored best time in seconds, or `None` when no round of this
    /// size has been completed. Zero reads as absent.
    fn load(&self, size: BoardSize) -> Option<u32>;

    /// Overwrite the stored best time. Callers only invoke this when the
    /// new value is an improvement.
    fn save(&mut self, size: BoardSize, seconds: u32);
}

/// In-memory view of the best times, refreshed from the store at every
/// round start and updated on wins.
#[derive(Clone, Debug, Default)]
pub struct BestTimes {
    entries: FxHashMap<u8, u32>,
}

impl BestTimes {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached best time for a size.
    #[must_use]
    pub fn get(&self, size: BoardSize) -> Option<u32> {
        self.entries.get(&size.raw()).copied()
    }

    /// Record a best time.
    pub fn record(&mut self, size: BoardSize, seconds: u32) {
        self.entries.insert(size.raw(), seconds);
    }

    /// Human-readable best-time line for the mode display.
    #[must_use]
    pub fn label(&self, size: BoardSize) -> String {
        match self.get(size) {
            Some(seconds) => format!("Best time ({}): {}s", size, seconds),
            None => format!("Best time ({}): none yet", size),
        }
    }
}
