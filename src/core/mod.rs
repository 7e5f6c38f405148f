//! Core engine types: entities, RNG, configuration, errors.
//!
//! These are the building blocks shared by the board and the game engine.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{EntityAllocator, EntityId};
pub use rng::GameRng;
pub use config::{FlipDuration, GameConfig};
pub use error::ConfigError;
