//! Card faces and decks - static card data.
//!
//! `CardFace` holds the immutable properties of a pair: the identity that
//! pairs two cards, and the image the renderer shows when a card is face up.
//! Flip state lives separately in [`Card`](super::Card).

use serde::{Deserialize, Serialize};

/// The face shared by both cards of a pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    /// Pairing key. Two cards match iff their identities are equal.
    pub identity: String,

    /// Image reference for the renderer (path, URL, sprite name).
    pub image: String,
}

impl CardFace {
    /// Create a new card face.
    #[must_use]
    pub fn new(identity: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            image: image.into(),
        }
    }
}

/// The fixed list of faces a game is dealt from.
///
/// Every face is dealt twice, so a deck of `n` faces yields `2n` cards.
///
/// ## Example
///
/// ```
/// use memory_match::cards::{CardFace, Deck};
///
/// let deck = Deck::new()
///     .with_face(CardFace::new("Rust", "./img/Rust.svg"))
///     .with_face(CardFace::new("Zig", "./img/Zig.svg"));
///
/// assert_eq!(deck.len(), 2);
/// assert_eq!(deck.card_count(), 4);
/// assert!(deck.is_well_formed());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    faces: Vec<CardFace>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The six programming-language faces of the classic board.
    #[must_use]
    pub fn standard() -> Self {
        [
            ("Python", "./img/Python.svg"),
            ("JavaScript", "./img/JS.svg"),
            ("Java", "./img/Java.svg"),
            ("CSharp", "./img/CSharp.svg"),
            ("Go", "./img/Go.svg"),
            ("Ruby", "./img/Ruby.svg"),
        ]
        .into_iter()
        .map(|(identity, image)| CardFace::new(identity, image))
        .collect()
    }

    /// Add a face (builder pattern).
    #[must_use]
    pub fn with_face(mut self, face: CardFace) -> Self {
        self.faces.push(face);
        self
    }

    /// Faces in configuration order.
    #[must_use]
    pub fn faces(&self) -> &[CardFace] {
        &self.faces
    }

    /// Number of faces (pairs).
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True if the deck has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of cards dealt from this deck.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.faces.len() * 2
    }

    /// True if no identity is listed twice.
    ///
    /// A repeated identity would deal four cards sharing one pair key.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let mut seen = rustc_hash::FxHashSet::default();
        self.faces.iter().all(|face| seen.insert(face.identity.as_str()))
    }
}

impl FromIterator<CardFace> for Deck {
    fn from_iter<I: IntoIterator<Item = CardFace>>(iter: I) -> Self {
        Self {
            faces: iter.into_iter().collect(),
        }
    }
}
