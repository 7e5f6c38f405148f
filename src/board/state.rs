//! The board: ordered card sequence, shuffling, and activation routing.
//!
//! The `Board` owns every card of the game. It supports:
//! - Shuffling with a seeded [`GameRng`]
//! - Flipping single cards and flipping everything face down
//! - Card lookup by entity ID
//! - Forwarding activations to a single subscriber
//!
//! ## Usage
//!
//! ```
//! use memory_match::board::{Board, NullRenderer};
//! use memory_match::cards::{Card, CardFace};
//! use memory_match::core::{EntityId, GameRng};
//!
//! let mut board = Board::new(NullRenderer, GameRng::new(42));
//! board.initialize(Card::pair(EntityId(0), EntityId(1), CardFace::new("Go", "go.svg")));
//!
//! board.flip(EntityId(0));
//! assert_eq!(board.flipped_count(), 1);
//!
//! board.reset();
//! assert_eq!(board.flipped_count(), 0);
//! ```

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::layout::GridLayout;
use super::renderer::Renderer;
use crate::cards::Card;
use crate::core::{EntityId, GameRng};

/// Token identifying the board's current activation subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

/// An activation forwarded by [`Board::notify_activation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    /// Subscriber the activation is addressed to.
    pub subscription: SubscriptionId,
    /// Card that was activated.
    pub entity: EntityId,
}

/// The card grid.
///
/// Cards live in an `im::Vector` so snapshots of the board are O(1).
#[derive(Clone, Debug)]
pub struct Board<R> {
    cards: Vector<Card>,

    /// entity_id -> index into `cards`, rebuilt whenever the order changes.
    positions: FxHashMap<EntityId, usize>,

    rng: GameRng,
    renderer: R,

    subscription: Option<SubscriptionId>,
    next_subscription: u32,
}

impl<R: Renderer> Board<R> {
    /// Create an empty board.
    #[must_use]
    pub fn new(renderer: R, rng: GameRng) -> Self {
        Self {
            cards: Vector::new(),
            positions: FxHashMap::default(),
            rng,
            renderer,
            subscription: None,
            next_subscription: 0,
        }
    }

    /// Store the card sequence, replacing any previous cards.
    ///
    /// The sequence must have even length.
    pub fn initialize(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards = cards.into_iter().collect();
        debug_assert!(self.cards.len() % 2 == 0, "board needs an even card count");
        self.reindex();
    }

    /// Permute the card sequence.
    pub fn shuffle(&mut self) {
        let mut order: Vec<Card> = self.cards.iter().cloned().collect();
        self.rng.shuffle(&mut order);
        self.cards = order.into_iter().collect();
        self.reindex();
    }

    /// Turn every face-up card face down. Repeated calls are no-ops.
    pub fn flip_down_all(&mut self) {
        for index in 0..self.cards.len() {
            if self.cards[index].is_flipped() {
                self.toggle_at(index);
            }
        }
    }

    /// Shuffle, flip everything down, and rebuild the grid.
    pub fn reset(&mut self) {
        self.shuffle();
        self.flip_down_all();
        self.render();
        log::debug!("board reset: {} cards, seed {}", self.cards.len(), self.rng.seed());
    }

    /// Hand the current sequence and layout to the renderer.
    pub fn render(&mut self) {
        let layout = self.layout();
        self.renderer.render(&self.cards, layout);
    }

    /// Turn one card over.
    ///
    /// Returns the new face-up state, or `None` if the card is not on the
    /// board.
    pub fn flip(&mut self, entity: EntityId) -> Option<bool> {
        let index = self.positions.get(&entity).copied()?;
        Some(self.toggle_at(index))
    }

    /// Register the activation subscriber, replacing any previous one.
    pub fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscription = Some(id);
        id
    }

    /// Current subscriber.
    #[must_use]
    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// Forward a card activation from the presentation layer.
    ///
    /// Returns `None` when nobody is subscribed or the card is unknown.
    #[must_use]
    pub fn notify_activation(&self, entity: EntityId) -> Option<Activation> {
        let subscription = self.subscription?;
        if !self.positions.contains_key(&entity) {
            log::trace!("activation for unknown {entity} dropped");
            return None;
        }
        Some(Activation { subscription, entity })
    }

    /// Layout hint for the current card count.
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        GridLayout::for_card_count(self.cards.len())
    }

    /// Cards in display order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Look up a card.
    #[must_use]
    pub fn card(&self, entity: EntityId) -> Option<&Card> {
        self.positions.get(&entity).map(|&index| &self.cards[index])
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if the board has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of face-up cards.
    #[must_use]
    pub fn flipped_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_flipped()).count()
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn toggle_at(&mut self, index: usize) -> bool {
        let card = &mut self.cards[index];
        card.toggle_flip();
        let face_up = card.is_flipped();
        self.renderer.card_flipped(&self.cards[index]);
        face_up
    }

    fn reindex(&mut self) {
        self.positions = self
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| (card.entity_id(), index))
            .collect();
    }
}
