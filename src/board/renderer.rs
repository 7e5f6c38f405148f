//! Renderer capability used by the board.
//!
//! The board never draws anything itself. It hands the card sequence and a
//! layout hint to a `Renderer`, and reports every individual flip so the
//! renderer can animate it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::layout::GridLayout;
use crate::cards::Card;
use crate::core::EntityId;

/// Visual collaborator of a [`Board`](super::Board).
pub trait Renderer {
    /// Rebuild the whole grid from `cards`, in order.
    fn render(&mut self, cards: &Vector<Card>, layout: GridLayout);

    /// Reflect a single `toggle_flip()` on `card`.
    fn card_flipped(&mut self, card: &Card);
}

/// Renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _cards: &Vector<Card>, _layout: GridLayout) {}

    fn card_flipped(&mut self, _card: &Card) {}
}

/// A single call made to a [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderEvent {
    /// Full grid rebuild.
    Rendered {
        order: Vec<EntityId>,
        layout: GridLayout,
    },
    /// One card turned over.
    Flipped { entity: EntityId, face_up: bool },
}

/// Renderer that records every call, for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Number of full renders recorded.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RenderEvent::Rendered { .. }))
            .count()
    }

    /// Card order of the most recent full render.
    #[must_use]
    pub fn last_order(&self) -> Option<&[EntityId]> {
        self.events.iter().rev().find_map(|e| match e {
            RenderEvent::Rendered { order, .. } => Some(order.as_slice()),
            RenderEvent::Flipped { .. } => None,
        })
    }

    /// Forget recorded calls.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, cards: &Vector<Card>, layout: GridLayout) {
        self.events.push(RenderEvent::Rendered {
            order: cards.iter().map(Card::entity_id).collect(),
            layout,
        });
    }

    fn card_flipped(&mut self, card: &Card) {
        self.events.push(RenderEvent::Flipped {
            entity: card.entity_id(),
            face_up: card.is_flipped(),
        });
    }
}
