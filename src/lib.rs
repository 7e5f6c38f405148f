//! # memory-match
//!
//! A memory-matching card game engine: a fixed set of paired cards is
//! shuffled onto a board and the player flips two at a time until every
//! pair is found. Moves, elapsed time, and a derived score are tracked.
//!
//! ## Design Principles
//!
//! 1. **Headless**: Drawing goes through the `Renderer` trait, counters
//!    through the `DisplaySink` trait. The engine never touches a UI.
//!
//! 2. **Explicit time**: No threads or sleeps. Delayed match checks and
//!    the elapsed-time tick run on a virtual-clock `Scheduler` that the
//!    host advances, and every scheduled task can be cancelled.
//!
//! 3. **Deterministic**: Shuffles use a seeded `GameRng`, so a seed and a
//!    sequence of activations always replay the same game.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration, errors
//! - `cards`: Card faces, decks, and card instances
//! - `board`: Card sequence, shuffling, layout hint, renderer seam
//! - `schedule`: Virtual-time task scheduler
//! - `game`: The `MemoryGame` engine, phases, scoring, display outputs

pub mod core;
pub mod cards;
pub mod board;
pub mod schedule;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    EntityId, EntityAllocator,
    GameRng,
    FlipDuration, GameConfig, ConfigError,
};

pub use crate::cards::{Card, CardFace, Deck};

pub use crate::board::{
    Board, GridLayout, Activation, SubscriptionId,
    Renderer, NullRenderer, RecordingRenderer, RenderEvent,
};

pub use crate::schedule::{Scheduler, TaskId, Fired};

pub use crate::game::{
    MemoryGame, GamePhase, ActivationOutcome, IgnoreReason, MatchOutcome,
    DisplaySink, DisplayLog, DisplayUpdate, NullDisplay,
    GameSnapshot, MoveRecord, calculate_score,
};
