//! Core engine types: cards, the board session, RNG, clock, configuration.
//!
//! Everything here is synchronous and deterministic. The asynchronous world
//! (image acquisition, timers) lives outside and talks to this module
//! through plain method calls.

pub mod board;
pub mod card;
pub mod clock;
pub mod config;
pub mod rng;

pub use board::{BoardSize, GameSession};
pub use card::{Card, CardIndex, CardState, CardValue};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameConfig, SourceConfig, API_KEY_ENV, API_KEY_HEADER, DEFAULT_API_BASE};
pub use rng::GameRng;
