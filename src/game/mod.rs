//! The memory game: turn state machine, timing, scoring, and display.
//!
//! ## Key Types
//!
//! - `MemoryGame`: The engine. Owns the board, counters, and scheduler
//! - `GamePhase`: `WaitingForInput`, `Resolving`, `Won`
//! - `DisplaySink`: Outputs the engine writes (moves, time, score, panel)
//! - `GameSnapshot`: Cheap detached view for renderers and status bars

pub mod display;
pub mod engine;
pub mod phase;
pub mod score;
pub mod snapshot;

pub use display::{DisplayLog, DisplaySink, DisplayUpdate, NullDisplay};
pub use engine::MemoryGame;
pub use phase::{ActivationOutcome, GamePhase, IgnoreReason, MatchOutcome};
pub use score::calculate_score;
pub use snapshot::{GameSnapshot, MoveRecord};
