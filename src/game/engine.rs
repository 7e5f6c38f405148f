//! The memory game engine.
//!
//! `MemoryGame` owns the board, the counters, and a virtual-time scheduler.
//! Hosts drive it with two calls:
//!
//! - [`MemoryGame::activate`] when the player clicks a card
//! - [`MemoryGame::advance`] as wall-clock time passes
//!
//! ## Turn flow
//!
//! 1. First activation flips a card (`WaitingForInput`).
//! 2. Second activation flips another card and schedules the match check
//!    `flip_duration` later (`Resolving`). Further activations are ignored.
//! 3. The check either keeps both cards face up (match) or turns them back
//!    down (mismatch), then accepts input again.
//! 4. When the last pair matches the timer stops and the score is computed
//!    (`Won`).
//!
//! ```
//! use memory_match::board::NullRenderer;
//! use memory_match::core::GameConfig;
//! use memory_match::game::{DisplayLog, GamePhase, MemoryGame};
//! use std::time::Duration;
//!
//! let mut game = MemoryGame::new(GameConfig::default(), NullRenderer, DisplayLog::new());
//! game.start_timer();
//!
//! let a = game.board().cards()[0].entity_id();
//! game.activate(a);
//! assert_eq!(game.moves(), 1);
//!
//! game.advance(Duration::from_secs(2));
//! assert_eq!(game.elapsed_seconds(), 2);
//! assert_eq!(game.phase(), GamePhase::WaitingForInput);
//! ```

use im::Vector;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::time::Duration;

use super::display::DisplaySink;
use super::phase::{ActivationOutcome, GamePhase, IgnoreReason, MatchOutcome};
use super::score::calculate_score;
use super::snapshot::{GameSnapshot, MoveRecord};
use crate::board::{Board, Renderer, SubscriptionId};
use crate::cards::Card;
use crate::core::{ConfigError, EntityAllocator, EntityId, FlipDuration, GameConfig, GameRng};
use crate::schedule::{periods, Scheduler, TaskId};

/// Work the engine schedules on its clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineTask {
    Tick,
    CheckMatch,
}

/// Memory game engine.
pub struct MemoryGame<R, D> {
    board: Board<R>,
    display: D,
    scheduler: Scheduler<EngineTask>,
    subscription: SubscriptionId,

    flip_duration: FlipDuration,
    tick_interval: Duration,

    /// Face-up cards awaiting resolution, in activation order.
    flipped: SmallVec<[EntityId; 2]>,
    matched: FxHashSet<EntityId>,
    moves: u32,
    score: u32,
    elapsed: Duration,
    won: bool,

    timer: Option<TaskId>,
    pending_check: Option<TaskId>,

    history: Vector<MoveRecord>,
    warnings: Vec<ConfigError>,
}

impl<R: Renderer, D: DisplaySink> MemoryGame<R, D> {
    /// Deal the deck, subscribe to the board, and reset it.
    ///
    /// An invalid flip duration is replaced by
    /// [`FlipDuration::FALLBACK`]; the warning is logged, sent to
    /// [`DisplaySink::notify`], and kept in [`MemoryGame::warnings`].
    ///
    /// The timer does not start until [`MemoryGame::start_timer`] or
    /// [`MemoryGame::reset_game`].
    pub fn new(config: GameConfig, renderer: R, mut display: D) -> Self {
        debug_assert!(config.deck.is_well_formed(), "deck repeats an identity");

        let (flip_duration, warning) = config.flip_duration();
        let mut warnings = Vec::new();
        if let Some(err) = warning {
            log::warn!("{err}");
            display.notify(&err.to_string());
            warnings.push(err);
        }

        let mut alloc = EntityAllocator::new();
        let cards: Vec<Card> = config
            .deck
            .faces()
            .iter()
            .flat_map(|face| Card::pair(alloc.next_id(), alloc.next_id(), face.clone()))
            .collect();

        let mut board = Board::new(renderer, GameRng::new(config.seed));
        board.initialize(cards);
        let subscription = board.subscribe();
        board.reset();

        log::info!(
            "new game: {} cards, flip duration {} ms, seed {}",
            board.len(),
            flip_duration.as_millis(),
            config.seed
        );

        Self {
            board,
            display,
            scheduler: Scheduler::new(),
            subscription,
            flip_duration,
            tick_interval: config.tick_interval(),
            flipped: SmallVec::new(),
            matched: FxHashSet::default(),
            moves: 0,
            score: 0,
            elapsed: Duration::ZERO,
            won: false,
            timer: None,
            pending_check: None,
            history: Vector::new(),
            warnings,
        }
    }

    // === Input ===

    /// Host entry point for a card click.
    ///
    /// Routes through [`Board::notify_activation`] and handles the
    /// activation only if it is addressed to this game.
    pub fn activate(&mut self, entity: EntityId) -> ActivationOutcome {
        match self.board.notify_activation(entity) {
            Some(activation) if activation.subscription == self.subscription => {
                self.handle_activation(activation.entity)
            }
            Some(_) => ActivationOutcome::Ignored(IgnoreReason::NotSubscribed),
            None if self.board.subscription() != Some(self.subscription) => {
                ActivationOutcome::Ignored(IgnoreReason::NotSubscribed)
            }
            None => ActivationOutcome::Ignored(IgnoreReason::UnknownCard),
        }
    }

    /// Flip a face-down card and count the move.
    ///
    /// Ignored while two cards are pending, and for face-up, matched, or
    /// unknown cards. The second flip of a turn schedules the match check.
    pub fn handle_activation(&mut self, entity: EntityId) -> ActivationOutcome {
        if let Some(reason) = self.refusal(entity) {
            log::debug!("activation of {entity} ignored: {reason:?}");
            return ActivationOutcome::Ignored(reason);
        }

        let identity = self
            .board
            .card(entity)
            .map(|card| card.identity().to_string())
            .unwrap_or_default();

        self.board.flip(entity);
        self.flipped.push(entity);
        self.moves += 1;
        self.display.show_moves(self.moves);
        self.history.push_back(MoveRecord {
            sequence: self.moves,
            entity,
            identity,
            elapsed_seconds: self.elapsed_seconds(),
        });

        let resolving = self.flipped.len() == 2;
        if resolving {
            let id = self
                .scheduler
                .schedule_once(self.flip_duration.as_duration(), EngineTask::CheckMatch);
            self.pending_check = Some(id);
        }
        log::debug!("flipped {entity} (move {}, resolving: {resolving})", self.moves);

        ActivationOutcome::Flipped {
            moves: self.moves,
            resolving,
        }
    }

    fn refusal(&self, entity: EntityId) -> Option<IgnoreReason> {
        if self.flipped.len() >= 2 {
            return Some(IgnoreReason::PairPending);
        }
        let Some(card) = self.board.card(entity) else {
            return Some(IgnoreReason::UnknownCard);
        };
        if self.matched.contains(&entity) {
            return Some(IgnoreReason::AlreadyMatched);
        }
        if card.is_flipped() {
            return Some(IgnoreReason::AlreadyFlipped);
        }
        None
    }

    // === Resolution ===

    /// Resolve the two pending cards now.
    ///
    /// Normally fired by the scheduler `flip_duration` after the second
    /// flip. Calling it directly cancels that scheduled check. Returns
    /// `None` if fewer than two cards are pending.
    pub fn check_for_match(&mut self) -> Option<MatchOutcome> {
        if let Some(id) = self.pending_check.take() {
            self.scheduler.cancel(id);
        }
        if self.flipped.len() < 2 {
            return None;
        }

        let (first, second) = (self.flipped[0], self.flipped[1]);
        self.flipped.clear();

        let is_match = match (self.board.card(first), self.board.card(second)) {
            (Some(a), Some(b)) => a.matches(b),
            _ => false,
        };

        if !is_match {
            self.board.flip(first);
            self.board.flip(second);
            log::debug!("{first} and {second} do not match");
            return Some(MatchOutcome::Mismatched(first, second));
        }

        self.matched.insert(first);
        self.matched.insert(second);
        log::debug!(
            "{first} and {second} match ({}/{})",
            self.matched.len(),
            self.board.len()
        );

        if self.matched.len() == self.board.len() {
            let score = self.end_game();
            return Some(MatchOutcome::Won { score });
        }
        Some(MatchOutcome::Matched(first, second))
    }

    fn end_game(&mut self) -> u32 {
        self.won = true;
        self.stop_timer();
        let score = self.calculate_score();
        self.display.show_final_score(score);
        self.display.set_game_over_visible(true);
        log::info!(
            "game won: {} moves, {}s, score {}",
            self.moves,
            self.elapsed_seconds(),
            score
        );
        score
    }

    // === Timer ===

    /// Reset elapsed time to zero and start ticking.
    ///
    /// Replaces any running tick, so there is never more than one.
    pub fn start_timer(&mut self) {
        self.stop_timer();
        self.elapsed = Duration::ZERO;
        self.timer = Some(
            self.scheduler
                .schedule_repeating(self.tick_interval, EngineTask::Tick),
        );
    }

    /// Stop ticking. Safe to call when already stopped.
    pub fn stop_timer(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Account for `count` tick intervals at once.
    fn tick(&mut self, count: u64) {
        self.elapsed = self
            .elapsed
            .saturating_add(periods(self.tick_interval, count));
        let seconds = self.elapsed_seconds();
        self.display.show_elapsed(&format!("{seconds}s"));
        log::trace!("tick x{count}: {seconds}s");
    }

    /// Move the clock forward, firing due ticks and match checks in order.
    ///
    /// Ticks missed during a long advance are applied in one step. The
    /// clock saturates at `Duration::MAX`.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now().saturating_add(by);
        while let Some(fired) = self.scheduler.pop_due(until) {
            match fired.task {
                EngineTask::Tick if self.timer == Some(fired.id) => self.tick(fired.count),
                EngineTask::CheckMatch if self.pending_check == Some(fired.id) => {
                    self.check_for_match();
                }
                task => log::trace!("stale {task:?} ({}) skipped", fired.id),
            }
        }
        self.scheduler.advance_to(until);
    }

    // === Scoring ===

    /// Compute the score from the current counters and display it.
    pub fn calculate_score(&mut self) -> u32 {
        self.score = calculate_score(self.elapsed_seconds(), self.moves);
        self.display.show_score(self.score);
        self.score
    }

    // === Restart ===

    /// Start over: clear counters, cancel pending work, reshuffle.
    ///
    /// Safe at any point, including while a pair is resolving; the pending
    /// check is cancelled so it cannot touch the new game.
    pub fn reset_game(&mut self) {
        if let Some(id) = self.pending_check.take() {
            self.scheduler.cancel(id);
        }

        self.flipped.clear();
        self.matched.clear();
        self.moves = 0;
        self.score = 0;
        self.elapsed = Duration::ZERO;
        self.won = false;
        self.history = Vector::new();

        self.display.show_moves(self.moves);
        self.display.show_score(self.score);
        self.display.show_elapsed(&format!("{}s", self.elapsed_seconds()));

        self.stop_timer();
        self.start_timer();
        self.board.reset();
        self.display.set_game_over_visible(false);

        log::info!("game reset");
    }

    // === Accessors ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        if self.won {
            GamePhase::Won
        } else if self.flipped.len() == 2 {
            GamePhase::Resolving
        } else {
            GamePhase::WaitingForInput
        }
    }

    /// True once every card is matched.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Move counter.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Score (zero until the game is won).
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whole seconds since the timer started, saturating at `u32::MAX`.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        u32::try_from(self.elapsed.as_secs()).unwrap_or(u32::MAX)
    }

    /// Face-up cards awaiting resolution.
    #[must_use]
    pub fn flipped_cards(&self) -> &[EntityId] {
        &self.flipped
    }

    /// Is the card part of a matched pair?
    #[must_use]
    pub fn is_matched(&self, entity: EntityId) -> bool {
        self.matched.contains(&entity)
    }

    /// Number of matched cards.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// Is the elapsed-time tick running?
    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_some_and(|id| self.scheduler.is_scheduled(id))
    }

    /// Is a match check scheduled?
    #[must_use]
    pub fn resolution_pending(&self) -> bool {
        self.pending_check.is_some()
    }

    /// The validated flip duration.
    #[must_use]
    pub fn flip_duration(&self) -> FlipDuration {
        self.flip_duration
    }

    /// Configuration problems found at construction.
    #[must_use]
    pub fn warnings(&self) -> &[ConfigError] {
        &self.warnings
    }

    /// Accepted moves since the last reset.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Virtual time since construction.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// When the next tick or match check is due, if anything is scheduled.
    ///
    /// Hosts can sleep until then instead of polling [`MemoryGame::advance`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    /// The display sink.
    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Detached view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cards: self.board.cards().clone(),
            layout: self.board.layout(),
            phase: self.phase(),
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds(),
            score: self.score,
            matched: self.matched.len(),
            pending: self.flipped.to_vec(),
            timer_running: self.timer_running(),
            history: self.history.clone(),
        }
    }
}
