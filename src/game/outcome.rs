//! Results handed back to the driver: flip outcomes, the scheduled
//! mismatch reset, and end-of-game bookkeeping.

use std::time::Duration;

use crate::core::{BoardSize, CardIndex};

/// A scheduled close of a mismatched pair.
///
/// The controller does not own a timer; it hands the driver a token and the
/// driver sleeps for `delay` before redeeming it. The generation stamp ties
/// the token to the session that issued it, so a token that outlives its
/// session (restart, back to menu) is discarded on redemption instead of
/// mutating a new round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetToken {
    pub(crate) generation: u64,
    /// First card of the mismatched pair.
    pub first: CardIndex,
    /// Second card of the mismatched pair.
    pub second: CardIndex,
    /// How long the pair stays visible before closing.
    pub delay: Duration,
}

/// Bookkeeping from a completed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    /// Board size of the completed round.
    pub size: BoardSize,
    /// Whole seconds from round start to the last match, floored.
    pub elapsed_secs: u32,
    /// Best time on record before this round.
    pub previous_best: Option<u32>,
    /// Whether this round set a new best time.
    pub new_best: bool,
}

/// What a single flip did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The flip was a no-op: not in a playable phase, index out of range,
    /// card already open or matched, or two cards already open (including
    /// the locked window while a mismatch reset is pending).
    Ignored,
    /// The card opened; waiting for a second card.
    Opened,
    /// The opened pair matched. Carries the end-of-game bookkeeping when
    /// this was the final pair.
    Matched { game_over: Option<GameOver> },
    /// The opened pair did not match; redeem the token after its delay.
    Mismatched(ResetToken),
}
