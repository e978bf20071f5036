//! Game lifecycle orchestration.
//!
//! `GameController` owns the round lifecycle: starting a game (image
//! acquisition, deck build), flip handling with synchronous match
//! resolution, the generation-stamped mismatch reset, win detection, and
//! best-time bookkeeping. Collaborators come in through trait seams so the
//! whole controller runs deterministically under test: an `ImageSource`
//! for values, a `BestTimeStore` for records, a `Clock` for elapsed time.
//!
//! ## Phases
//!
//! ```text
//! Menu -> Playing -> { Won -> Menu | aborted -> Menu }
//! ```
//!
//! A failed start (configuration or acquisition) is the defined recovery
//! path back to `Menu`, not a crash. Every session boundary increments the
//! generation counter, which invalidates any reset token still in flight.

use crate::core::{
    BoardSize, CardIndex, CardValue, Clock, GameConfig, GameRng, GameSession,
};
use crate::errors::GameError;
use crate::source::ImageSource;
use crate::store::{BestTimeStore, BestTimes};

use super::outcome::{FlipOutcome, GameOver, ResetToken};

/// Controller lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// No active round; mode selection.
    #[default]
    Menu,
    /// A round is in progress.
    Playing,
    /// The last round was completed; board still visible.
    Won,
}

/// Orchestrates rounds of the memory game.
pub struct GameController<S, B, C> {
    config: GameConfig,
    source: S,
    store: B,
    clock: C,
    rng: GameRng,
    phase: Phase,
    session: Option<GameSession>,
    generation: u64,
    last_size: Option<BoardSize>,
    best_times: BestTimes,
}

impl<S, B, C> GameController<S, B, C>
where
    S: ImageSource,
    B: BestTimeStore,
    C: Clock,
{
    /// Create a controller in the menu phase.
    #[must_use]
    pub fn new(config: GameConfig, source: S, store: B, clock: C) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        log::debug!("controller ready, shuffle seed {}", rng.seed());

        Self {
            config,
            source,
            store,
            clock,
            rng,
            phase: Phase::Menu,
            session: None,
            generation: 0,
            last_size: None,
            best_times: BestTimes::new(),
        }
    }

    /// The current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The active (or just-won) session, for board display.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// The board size of the current or most recent round.
    #[must_use]
    pub fn last_size(&self) -> Option<BoardSize> {
        self.last_size
    }

    /// The best time on record for a size, from the in-memory cache.
    #[must_use]
    pub fn best_time(&self, size: BoardSize) -> Option<u32> {
        self.best_times.get(size)
    }

    /// Human-readable best-time line for the mode display.
    #[must_use]
    pub fn best_time_label(&self, size: BoardSize) -> String {
        self.best_times.label(size)
    }

    /// Start a round.
    ///
    /// Discards any active session first, so a stale reset token or a
    /// completion handler from the previous round can no longer touch
    /// state. On any error the controller is back in the menu phase with
    /// no session; the caller surfaces the message and nothing else
    /// happens.
    pub async fn start_game(&mut self, size: BoardSize) -> Result<(), GameError> {
        self.abandon_session();
        self.last_size = Some(size);

        if let Some(best) = self.store.load(size) {
            self.best_times.record(size, best);
        }

        self.source.validate()?;

        let wanted = size.pairs();
        let locators = self.source.fetch_values(wanted).await?;
        debug_assert_eq!(locators.len(), wanted);

        let values: Vec<CardValue> = locators.into_iter().map(CardValue::from).collect();
        let started_at = self.clock.monotonic();
        self.session = Some(GameSession::new(size, values, &mut self.rng, started_at));
        self.phase = Phase::Playing;
        log::info!("started a {} round, {} pairs", size, wanted);
        Ok(())
    }

    /// Start a fresh round at the current size.
    pub async fn restart(&mut self) -> Result<(), GameError> {
        let size = self.last_size.ok_or_else(|| {
            GameError::Config("restart requested before any round was started".to_string())
        })?;
        self.start_game(size).await
    }

    /// Discard the active session and return to the menu.
    pub fn back_to_menu(&mut self) {
        self.abandon_session();
    }

    /// Flip a card and resolve the pair when this was the second flip.
    pub fn flip_card(&mut self, index: CardIndex) -> FlipOutcome {
        if self.phase != Phase::Playing {
            return FlipOutcome::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return FlipOutcome::Ignored;
        };
        if !session.open_card(index) {
            return FlipOutcome::Ignored;
        }

        match session.opened_pair_matches() {
            None => FlipOutcome::Opened,
            Some(true) => {
                session.resolve_match();
                log::debug!("match {} of {}", session.matches_found(), session.size().pairs());
                let complete = session.is_complete();
                let game_over = if complete { Some(self.finish_round()) } else { None };
                FlipOutcome::Matched { game_over }
            }
            Some(false) => {
                // The pair stays open and the opened list stays full until
                // the token is redeemed, so no third flip gets in.
                let (first, second) = session
                    .opened_pair()
                    .expect("mismatch outcome requires an opened pair");
                FlipOutcome::Mismatched(ResetToken {
                    generation: self.generation,
                    first,
                    second,
                    delay: self.config.mismatch_delay,
                })
            }
        }
    }

    /// Redeem a mismatch reset token, closing the pair it was issued for.
    ///
    /// Returns `false` and touches nothing when the token belongs to a
    /// discarded session.
    pub fn close_mismatch(&mut self, token: ResetToken) -> bool {
        if token.generation != self.generation {
            log::debug!("discarding reset token from a stale session");
            return false;
        }
        match self.session.as_mut() {
            Some(session) => session.close_opened_pair(),
            None => false,
        }
    }

    fn abandon_session(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.session = None;
        self.phase = Phase::Menu;
    }

    /// End-of-round bookkeeping: elapsed time, best-time comparison and
    /// persistence, phase transition.
    fn finish_round(&mut self) -> GameOver {
        let session = self
            .session
            .as_ref()
            .expect("finish_round runs with an active session");
        let size = session.size();
        let elapsed = self.clock.monotonic().saturating_sub(session.started_at());
        let elapsed_secs = u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX);

        let previous_best = self.best_times.get(size);
        let new_best = previous_best.map_or(true, |best| elapsed_secs < best);
        if new_best {
            self.best_times.record(size, elapsed_secs);
            self.store.save(size, elapsed_secs);
            log::info!("new best time for {}: {}s", size, elapsed_secs);
        }

        self.phase = Phase::Won;
        GameOver {
            size,
            elapsed_secs,
            previous_best,
            new_best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::source::FixedImageSource;
    use crate::store::MemoryStore;

    fn controller(
        pool: usize,
    ) -> GameController<FixedImageSource, MemoryStore, ManualClock> {
        GameController::new(
            GameConfig::default().with_seed(42),
            FixedImageSource::numbered(pool),
            MemoryStore::new(),
            ManualClock::new(),
        )
    }

    #[test]
    fn test_starts_in_menu() {
        let c = controller(8);
        assert_eq!(c.phase(), Phase::Menu);
        assert!(c.session().is_none());
        assert!(c.last_size().is_none());
    }

    #[tokio::test]
    async fn test_start_game_builds_full_board() {
        let mut c = controller(8);
        c.start_game(BoardSize::EASY).await.unwrap();

        assert_eq!(c.phase(), Phase::Playing);
        let session = c.session().unwrap();
        assert_eq!(session.cards().len(), 16);
        assert_eq!(session.matches_found(), 0);
    }

    #[tokio::test]
    async fn test_insufficient_images_abort_to_menu() {
        let mut c = controller(7);
        let err = c.start_game(BoardSize::EASY).await.unwrap_err();

        assert!(matches!(err, GameError::Acquisition(_)));
        assert_eq!(c.phase(), Phase::Menu);
        assert!(c.session().is_none());
    }

    #[tokio::test]
    async fn test_flip_outside_playing_is_ignored() {
        let mut c = controller(8);
        assert_eq!(c.flip_card(CardIndex::new(0)), FlipOutcome::Ignored);

        c.start_game(BoardSize::EASY).await.unwrap();
        c.back_to_menu();
        assert_eq!(c.flip_card(CardIndex::new(0)), FlipOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_restart_reuses_last_size() {
        let mut c = controller(8);
        c.start_game(BoardSize::EASY).await.unwrap();
        c.restart().await.unwrap();
        assert_eq!(c.session().unwrap().size(), BoardSize::EASY);
    }

    #[tokio::test]
    async fn test_restart_before_first_game_is_config_error() {
        let mut c = controller(8);
        assert!(matches!(c.restart().await, Err(GameError::Config(_))));
    }
}
