//! Configuration errors.

use thiserror::Error;

use super::config::FlipDuration;

/// Problems detected while validating a [`GameConfig`](super::GameConfig).
///
/// None of these abort construction: the engine falls back to a safe value
/// and keeps the error as a warning for the host to show the player.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(
        "flip duration must be between {} and {} ms (got {requested} ms), using {} ms",
        FlipDuration::MIN_MS,
        FlipDuration::MAX_MS,
        FlipDuration::MIN_MS
    )]
    FlipDurationOutOfRange { requested: f64 },

    #[error("flip duration is not a number, using {} ms", FlipDuration::MIN_MS)]
    FlipDurationNotANumber,
}
