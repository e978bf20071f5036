//! # memory-match
//!
//! A memory-matching card game engine: cards are dealt face-down in value
//! pairs, the player flips two at a time, matches stay up, and the fastest
//! full clear per board size is kept on record.
//!
//! ## Design Principles
//!
//! 1. **Deterministic Core**: the game state machine is synchronous and
//!    seed-reproducible. Randomness and time come in through `GameRng` and
//!    `Clock`, so every scenario replays exactly under test.
//!
//! 2. **Collaborators Behind Traits**: image acquisition (`ImageSource`)
//!    and best-time persistence (`BestTimeStore`) are seams, not
//!    hardcoded services. The shipped implementations are an HTTP provider
//!    and a JSON records file; tests swap in doubles.
//!
//! 3. **No Stale Timers**: the mismatch-reset delay is a token the driver
//!    schedules, stamped with the session generation. Tokens from a
//!    restarted or abandoned session are discarded on redemption, so a
//!    late timer can never mutate a new round.
//!
//! ## Modules
//!
//! - `core`: cards, board sessions, RNG, clock, configuration
//! - `errors`: the two failure taxonomies (configuration, acquisition)
//! - `source`: image providers (HTTP and fixed-pool)
//! - `store`: best-time records (JSON file and in-memory)
//! - `game`: the controller orchestrating the round lifecycle

pub mod core;
pub mod errors;
pub mod game;
pub mod source;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    BoardSize, Card, CardIndex, CardState, CardValue,
    Clock, ManualClock, SystemClock,
    GameConfig, SourceConfig, API_KEY_ENV, API_KEY_HEADER, DEFAULT_API_BASE,
    GameRng, GameSession,
};

pub use crate::errors::{GameError, SourceError};

pub use crate::source::{CatApiSource, FixedImageSource, ImageLocator, ImageSource};

pub use crate::store::{BestTimeStore, BestTimes, JsonFileStore, MemoryStore};

pub use crate::game::{FlipOutcome, GameController, GameOver, Phase, ResetToken};
