//! Invariant properties of the board session and the shuffle.

use std::collections::HashMap;
use std::time::Duration;

use proptest::collection::vec;
use proptest::prelude::*;

use memory_match::{BoardSize, CardIndex, CardState, CardValue, GameRng, GameSession};

fn values(n: usize) -> Vec<CardValue> {
    (0..n).map(|i| CardValue::new(format!("v-{}", i))).collect()
}

fn session(dimension: u8, seed: u64) -> GameSession {
    let size = BoardSize::new(dimension).expect("even dimension");
    let mut rng = GameRng::new(seed);
    GameSession::new(size, values(size.pairs()), &mut rng, Duration::ZERO)
}

proptest! {
    /// For every even size, the deck is size^2 cards forming size^2/2
    /// distinct value-pairs, each value appearing exactly twice.
    #[test]
    fn deck_always_splits_into_exact_pairs(half in 1u8..=5, seed in any::<u64>()) {
        let session = session(half * 2, seed);
        let size = session.size();

        prop_assert_eq!(session.cards().len(), size.total_cards());

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for card in session.cards() {
            *counts.entry(card.value().as_str()).or_default() += 1;
        }
        prop_assert_eq!(counts.len(), size.pairs());
        prop_assert!(counts.values().all(|&n| n == 2));
    }

    /// Arbitrary flip sequences never push the opened list past two, and
    /// the opened list always agrees with the card states.
    #[test]
    fn opened_list_never_exceeds_two(seed in any::<u64>(), flips in vec(0u16..20, 1..200)) {
        let mut session = session(4, seed);

        for flip in flips {
            let _ = session.open_card(CardIndex::new(flip));
            prop_assert!(session.opened().len() <= 2);
            prop_assert!(session.matches_found() <= session.size().pairs());

            // Resolve the way the controller does, so play continues.
            if let Some(matched) = session.opened_pair_matches() {
                if matched {
                    session.resolve_match();
                } else {
                    session.close_opened_pair();
                }
            }
            prop_assert_eq!(
                session.count_in_state(CardState::Open),
                session.opened().len()
            );
        }
    }

    /// Once matched, a card never changes state again, no matter what is
    /// flipped afterwards.
    #[test]
    fn matched_cards_stay_matched(seed in any::<u64>(), flips in vec(0u16..16, 1..300)) {
        let mut session = session(4, seed);
        let mut matched: Vec<usize> = Vec::new();

        for flip in flips {
            let _ = session.open_card(CardIndex::new(flip));
            if let Some(is_match) = session.opened_pair_matches() {
                if is_match {
                    let (a, b) = session.opened_pair().expect("pair is open");
                    session.resolve_match();
                    matched.push(a.index());
                    matched.push(b.index());
                } else {
                    session.close_opened_pair();
                }
            }

            for &index in &matched {
                prop_assert!(session.cards()[index].is_matched());
            }
        }
    }

    /// The shuffle is a function of the seed alone.
    #[test]
    fn same_seed_same_permutation(seed in any::<u64>()) {
        let a = session(6, seed);
        let b = session(6, seed);

        let order = |s: &GameSession| -> Vec<String> {
            s.cards().iter().map(|c| c.value().as_str().to_string()).collect()
        };
        prop_assert_eq!(order(&a), order(&b));
    }
}
