//! Point-in-time views of a game.
//!
//! Snapshots share structure with the live game through `im` vectors, so
//! taking one per frame is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::phase::GamePhase;
use crate::board::GridLayout;
use crate::cards::Card;
use crate::core::EntityId;

/// One accepted activation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Move number (1-based, equals the move counter after the move).
    pub sequence: u32,
    /// Card that was flipped.
    pub entity: EntityId,
    /// Identity of that card.
    pub identity: String,
    /// Elapsed seconds when the move was made.
    pub elapsed_seconds: u32,
}

/// Everything a renderer or status bar needs, detached from the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cards: Vector<Card>,
    pub layout: GridLayout,
    pub phase: GamePhase,
    pub moves: u32,
    pub elapsed_seconds: u32,
    pub score: u32,
    pub matched: usize,
    pub pending: Vec<EntityId>,
    pub timer_running: bool,
    pub history: Vector<MoveRecord>,
}

impl GameSnapshot {
    /// Number of cards still face down.
    #[must_use]
    pub fn face_down(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_flipped()).count()
    }

    /// Fraction of the board matched, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.cards.is_empty() {
            return 0.0;
        }
        self.matched as f64 / self.cards.len() as f64
    }
}
