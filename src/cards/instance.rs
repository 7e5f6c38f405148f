//! Card instances - one tile on the board.
//!
//! A `Card` pairs a face with the mutable flip state. The face is shared
//! (cheaply, through `Arc`) with the other card of the pair.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::definition::CardFace;
use crate::core::entity::EntityId;

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    entity_id: EntityId,
    face: Arc<CardFace>,
    is_flipped: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(entity_id: EntityId, face: Arc<CardFace>) -> Self {
        Self {
            entity_id,
            face,
            is_flipped: false,
        }
    }

    /// Deal a pair of face-down cards sharing `face`.
    #[must_use]
    pub fn pair(first: EntityId, second: EntityId, face: CardFace) -> [Card; 2] {
        let face = Arc::new(face);
        [Card::new(first, Arc::clone(&face)), Card::new(second, face)]
    }

    /// Unique entity ID.
    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    /// The face (identity + image).
    #[must_use]
    pub fn face(&self) -> &CardFace {
        &self.face
    }

    /// Pairing key.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.face.identity
    }

    /// Is the card face up?
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// Turn the card over.
    pub fn toggle_flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    /// True iff both cards carry the same identity.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.face.identity == other.face.identity
    }
}
