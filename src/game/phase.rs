//! Engine phases and the outcomes of activations and resolutions.

use serde::{Deserialize, Serialize};

use crate::core::EntityId;

/// Where the engine is in a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fewer than two cards are pending; activations are accepted.
    WaitingForInput,
    /// Two cards are face up and the match check is scheduled.
    Resolving,
    /// Every card is matched.
    Won,
}

impl GamePhase {
    /// Check if the game is over.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won)
    }
}

/// Why an activation changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Two cards are already waiting for resolution.
    PairPending,
    /// The card is already face up.
    AlreadyFlipped,
    /// The card is part of a resolved pair.
    AlreadyMatched,
    /// No such card on the board.
    UnknownCard,
    /// The board routes activations to a different subscriber.
    NotSubscribed,
}

/// Result of [`MemoryGame::handle_activation`](super::MemoryGame::handle_activation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationOutcome {
    /// The card was turned face up and counted as a move.
    Flipped {
        /// Move counter after this activation.
        moves: u32,
        /// True if this was the second card and resolution is scheduled.
        resolving: bool,
    },
    /// Nothing happened.
    Ignored(IgnoreReason),
}

impl ActivationOutcome {
    /// Check if the activation flipped a card.
    #[must_use]
    pub fn is_flipped(self) -> bool {
        matches!(self, ActivationOutcome::Flipped { .. })
    }
}

/// Result of resolving a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The cards matched and stay face up.
    Matched(EntityId, EntityId),
    /// The cards differ and were turned back down.
    Mismatched(EntityId, EntityId),
    /// The last pair matched; carries the final score.
    Won { score: u32 },
}
