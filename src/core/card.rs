//! Cards and their three-state lifecycle.
//!
//! Every tile on the board is a `Card`: an opaque comparison value, a fixed
//! board position, and a display state.
//!
//! ## State machine
//!
//! ```text
//! Closed -> Open -> { Matched | Closed }
//! ```
//!
//! `Matched` is terminal; a matched card never reopens. Transitions that do
//! not apply are silent no-ops, which is what makes repeated clicks on the
//! same tile harmless. The "at most two open" rule is not the card's
//! concern; the session that owns the opened list enforces it.

/// Board position of a card. Positions are 0-based, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardIndex(pub u16);

impl CardIndex {
    /// Create a new card index.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// The position as a usize, for slice indexing.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Opaque comparison key for a card, typically an image locator.
///
/// The engine never interprets the contents; two cards match when their
/// values compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CardValue(String);

impl CardValue {
    /// Create a new card value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display state of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    /// Face-down.
    Closed,
    /// Face-up, not yet resolved.
    Open,
    /// Paired up. Terminal.
    Matched,
}

/// One tile on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    value: CardValue,
    index: CardIndex,
    state: CardState,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(value: CardValue, index: CardIndex) -> Self {
        Self {
            value,
            index,
            state: CardState::Closed,
        }
    }

    /// The card's comparison value.
    #[must_use]
    pub fn value(&self) -> &CardValue {
        &self.value
    }

    /// The card's board position.
    #[must_use]
    pub fn index(&self) -> CardIndex {
        self.index
    }

    /// The card's current display state.
    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    /// Is this card face-down?
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == CardState::Closed
    }

    /// Is this card face-up and unresolved?
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == CardState::Open
    }

    /// Has this card been paired up?
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    /// Closed -> Open. Returns whether the transition happened; flipping an
    /// already-open or matched card is a no-op.
    pub fn flip(&mut self) -> bool {
        if self.state == CardState::Closed {
            self.state = CardState::Open;
            true
        } else {
            false
        }
    }

    /// Open -> Closed. No-op when closed or matched.
    pub fn reset(&mut self) {
        if self.state == CardState::Open {
            self.state = CardState::Closed;
        }
    }

    /// Open -> Matched. No-op when closed; matched is terminal.
    pub fn mark_matched(&mut self) {
        if self.state == CardState::Open {
            self.state = CardState::Matched;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card::new(CardValue::new("cat"), CardIndex::new(3))
    }

    #[test]
    fn test_new_card_is_closed() {
        let card = card();
        assert!(card.is_closed());
        assert_eq!(card.index(), CardIndex::new(3));
        assert_eq!(card.value().as_str(), "cat");
    }

    #[test]
    fn test_flip_opens_closed_card() {
        let mut card = card();
        assert!(card.flip());
        assert!(card.is_open());
    }

    #[test]
    fn test_flip_open_card_is_noop() {
        let mut card = card();
        assert!(card.flip());
        assert!(!card.flip());
        assert!(card.is_open());
    }

    #[test]
    fn test_flip_matched_card_is_noop() {
        let mut card = card();
        card.flip();
        card.mark_matched();
        assert!(!card.flip());
        assert!(card.is_matched());
    }

    #[test]
    fn test_reset_closes_open_card() {
        let mut card = card();
        card.flip();
        card.reset();
        assert!(card.is_closed());
    }

    #[test]
    fn test_reset_does_not_touch_matched_card() {
        let mut card = card();
        card.flip();
        card.mark_matched();
        card.reset();
        assert!(card.is_matched());
    }

    #[test]
    fn test_mark_matched_requires_open() {
        let mut card = card();
        card.mark_matched();
        assert!(card.is_closed());

        card.flip();
        card.mark_matched();
        assert!(card.is_matched());
    }

    #[test]
    fn test_matched_is_terminal() {
        let mut card = card();
        card.flip();
        card.mark_matched();

        card.reset();
        assert!(card.is_matched());
        assert!(!card.flip());
        assert!(card.is_matched());
    }
}
