//! Card system: faces, decks, and card instances.
//!
//! ## Key Types
//!
//! - `CardFace`: Identity (pairing key) and image reference
//! - `Deck`: The fixed list of faces a game deals, each twice
//! - `Card`: One tile on the board with its flip state

pub mod definition;
pub mod instance;

pub use definition::{CardFace, Deck};
pub use instance::Card;
