//! The board: card sequence, shuffling, layout, and rendering seam.
//!
//! ## Key Types
//!
//! - `Board`: Owns the cards and routes activations to one subscriber
//! - `Renderer`: Visual collaborator (grid rebuilds and single flips)
//! - `GridLayout`: Column-count hint derived from the card count

pub mod layout;
pub mod renderer;
pub mod state;

pub use layout::GridLayout;
pub use renderer::{NullRenderer, RecordingRenderer, RenderEvent, Renderer};
pub use state::{Activation, Board, SubscriptionId};
