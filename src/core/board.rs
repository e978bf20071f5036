//! Board sizing and the per-round game session.
//!
//! ## BoardSize
//!
//! A board is square with an even dimension, so the deck always splits into
//! exact pairs. The two shipped game modes are 4x4 and 6x6, but the engine
//! accepts any even dimension of at least 2.
//!
//! ## GameSession
//!
//! One round of play: the shuffled deck, the opened list (at most two
//! face-up unresolved cards), the match count, and the start timestamp. A
//! session exclusively owns its cards and is discarded wholesale on restart
//! or return to the menu.

use std::time::Duration;

use smallvec::SmallVec;

use super::card::{Card, CardIndex, CardState, CardValue};
use super::rng::GameRng;

/// Square board dimension. Always even and at least 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardSize(u8);

impl BoardSize {
    /// The 4x4 easy mode.
    pub const EASY: BoardSize = BoardSize(4);

    /// The 6x6 hard mode.
    pub const HARD: BoardSize = BoardSize(6);

    /// Create a board size. Returns `None` for odd or zero dimensions.
    ///
    /// ```
    /// use memory_match::core::BoardSize;
    ///
    /// assert!(BoardSize::new(4).is_some());
    /// assert!(BoardSize::new(5).is_none());
    /// assert!(BoardSize::new(0).is_none());
    /// ```
    #[must_use]
    pub fn new(dimension: u8) -> Option<Self> {
        if dimension >= 2 && dimension % 2 == 0 {
            Some(Self(dimension))
        } else {
            None
        }
    }

    /// The raw dimension value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Cards per side.
    #[must_use]
    pub const fn dimension(self) -> usize {
        self.0 as usize
    }

    /// Total cards on the board (dimension squared).
    #[must_use]
    pub const fn total_cards(self) -> usize {
        self.dimension() * self.dimension()
    }

    /// Number of value-pairs on the board.
    #[must_use]
    pub const fn pairs(self) -> usize {
        self.total_cards() / 2
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// One round of play.
#[derive(Clone, Debug)]
pub struct GameSession {
    size: BoardSize,
    deck: Vec<Card>,
    opened: SmallVec<[CardIndex; 2]>,
    matches_found: usize,
    started_at: Duration,
}

impl GameSession {
    /// Build a session from exactly one value per pair.
    ///
    /// Each value is duplicated, the deck is shuffled into a uniform random
    /// permutation, and one face-down card is instantiated per slot.
    ///
    /// ## Panics
    ///
    /// Panics when `values.len() != size.pairs()`; the controller guarantees
    /// the count by contract with the image source.
    #[must_use]
    pub fn new(
        size: BoardSize,
        values: Vec<CardValue>,
        rng: &mut GameRng,
        started_at: Duration,
    ) -> Self {
        assert_eq!(
            values.len(),
            size.pairs(),
            "deck needs exactly one value per pair"
        );

        let mut slots = Vec::with_capacity(size.total_cards());
        for value in values {
            slots.push(value.clone());
            slots.push(value);
        }
        rng.shuffle(&mut slots);

        let deck = slots
            .into_iter()
            .enumerate()
            .map(|(i, value)| Card::new(value, CardIndex::new(i as u16)))
            .collect();

        Self {
            size,
            deck,
            opened: SmallVec::new(),
            matches_found: 0,
            started_at,
        }
    }

    /// The board size of this round.
    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// All cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.deck
    }

    /// A single card, or `None` for an out-of-range index.
    #[must_use]
    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.deck.get(index.index())
    }

    /// The currently face-up unresolved cards, in flip order. At most two.
    #[must_use]
    pub fn opened(&self) -> &[CardIndex] {
        &self.opened
    }

    /// Pairs matched so far.
    #[must_use]
    pub fn matches_found(&self) -> usize {
        self.matches_found
    }

    /// Monotonic timestamp at which this round started.
    #[must_use]
    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    /// Have all pairs been found?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matches_found == self.size.pairs()
    }

    /// Open a card, honoring the two-open limit.
    ///
    /// Returns `false` without touching any state when the index is out of
    /// range, the card is already open or matched, or two cards are already
    /// open (including the locked window while a mismatched pair waits for
    /// its reset).
    pub fn open_card(&mut self, index: CardIndex) -> bool {
        if self.opened.len() >= 2 {
            return false;
        }
        let Some(card) = self.deck.get_mut(index.index()) else {
            return false;
        };
        if !card.flip() {
            return false;
        }
        self.opened.push(index);
        true
    }

    /// The opened pair, once two cards are face up.
    #[must_use]
    pub fn opened_pair(&self) -> Option<(CardIndex, CardIndex)> {
        if self.opened.len() == 2 {
            Some((self.opened[0], self.opened[1]))
        } else {
            None
        }
    }

    /// Do the two opened cards carry the same value?
    ///
    /// `None` until a pair is open.
    #[must_use]
    pub fn opened_pair_matches(&self) -> Option<bool> {
        let (first, second) = self.opened_pair()?;
        Some(self.deck[first.index()].value() == self.deck[second.index()].value())
    }

    /// Mark the opened pair matched and clear the opened list.
    ///
    /// Returns `false` when no pair is open.
    pub fn resolve_match(&mut self) -> bool {
        let Some((first, second)) = self.opened_pair() else {
            return false;
        };
        self.deck[first.index()].mark_matched();
        self.deck[second.index()].mark_matched();
        self.matches_found += 1;
        self.opened.clear();
        true
    }

    /// Close the opened pair (mismatch reset) and clear the opened list.
    ///
    /// Returns `false` when no pair is open.
    pub fn close_opened_pair(&mut self) -> bool {
        let Some((first, second)) = self.opened_pair() else {
            return false;
        };
        self.deck[first.index()].reset();
        self.deck[second.index()].reset();
        self.opened.clear();
        true
    }

    /// Count cards currently in a given state.
    #[must_use]
    pub fn count_in_state(&self, state: CardState) -> usize {
        self.deck.iter().filter(|c| c.state() == state).count()
    }
}
