//! Deterministic in-memory image provider.
//!
//! Used as the test double and for offline play in the driver. Delivers
//! locators from a fixed pool in order, and under-delivers honestly: asking
//! for more than the pool holds fails with `Insufficient`, exercising the
//! same abort path the HTTP provider takes.

use async_trait::async_trait;

use super::{ImageLocator, ImageSource};
use crate::errors::SourceError;

/// Built-in symbol pool for offline play; enough for a 6x6 board.
pub const OFFLINE_SYMBOLS: [&str; 18] = [
    "anchor", "bell", "comet", "daisy", "ember", "fern", "grape", "harp", "iris", "jade",
    "kite", "lotus", "maple", "nova", "opal", "pine", "quill", "reef",
];

/// Image source drawing from a fixed pool of locators.
#[derive(Clone, Debug)]
pub struct FixedImageSource {
    pool: Vec<ImageLocator>,
}

impl FixedImageSource {
    /// Create a source from an explicit pool.
    #[must_use]
    pub fn new(pool: Vec<ImageLocator>) -> Self {
        Self { pool }
    }

    /// A pool of `count` distinct numbered locators.
    #[must_use]
    pub fn numbered(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|i| ImageLocator::new(format!("fixture-{}", i)))
                .collect(),
        )
    }

    /// The built-in offline symbol pool.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(OFFLINE_SYMBOLS.iter().copied().map(ImageLocator::new).collect())
    }
}

#[async_trait]
impl ImageSource for FixedImageSource {
    async fn fetch_values(&self, count: usize) -> Result<Vec<ImageLocator>, SourceError> {
        if self.pool.len() < count {
            return Err(SourceError::Insufficient {
                wanted: count,
                got: self.pool.len(),
            });
        }
        Ok(self.pool[..count].to_vec())
    }
}
