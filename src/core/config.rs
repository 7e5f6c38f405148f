//! Game configuration.
//!
//! Hosts configure a game at startup by providing:
//! - `Deck`: the faces to deal (each face becomes a pair of cards)
//! - flip duration: how long two face-up cards stay visible before resolution
//! - tick interval: how often the elapsed-time display refreshes
//! - seed: RNG seed for board shuffles
//!
//! The flip duration is kept raw (as `f64` milliseconds) until the engine
//! validates it with [`FlipDuration::resolve`], so out-of-range and
//! non-numeric input can be reported instead of silently clamped.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;
use crate::cards::Deck;

/// A validated delay between the second flip and match resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlipDuration {
    millis: u64,
}

impl FlipDuration {
    /// Shortest accepted delay.
    pub const MIN_MS: u64 = 350;
    /// Longest accepted delay.
    pub const MAX_MS: u64 = 3000;
    /// Delay used when none is configured.
    pub const DEFAULT_MS: u64 = 500;

    /// Value substituted for invalid input.
    pub const FALLBACK: FlipDuration = FlipDuration { millis: Self::MIN_MS };
    /// Default delay.
    pub const DEFAULT: FlipDuration = FlipDuration { millis: Self::DEFAULT_MS };

    /// Check a requested delay in milliseconds.
    ///
    /// The range is inclusive on both ends. Fractional milliseconds are
    /// truncated.
    ///
    /// ```
    /// use memory_match::core::FlipDuration;
    ///
    /// assert_eq!(FlipDuration::validate(1000.0).unwrap().as_millis(), 1000);
    /// assert!(FlipDuration::validate(349.0).is_err());
    /// assert!(FlipDuration::validate(f64::NAN).is_err());
    /// ```
    pub fn validate(requested_ms: f64) -> Result<Self, ConfigError> {
        if requested_ms.is_nan() {
            return Err(ConfigError::FlipDurationNotANumber);
        }
        let range = Self::MIN_MS as f64..=Self::MAX_MS as f64;
        if !range.contains(&requested_ms) {
            return Err(ConfigError::FlipDurationOutOfRange { requested: requested_ms });
        }
        Ok(Self { millis: requested_ms as u64 })
    }

    /// Validate, falling back to [`FlipDuration::FALLBACK`] on error.
    ///
    /// The error is handed back so the caller can warn the player.
    #[must_use]
    pub fn resolve(requested_ms: f64) -> (Self, Option<ConfigError>) {
        match Self::validate(requested_ms) {
            Ok(duration) => (duration, None),
            Err(err) => (Self::FALLBACK, Some(err)),
        }
    }

    /// Delay in milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.millis
    }

    /// Delay as a `Duration`.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl Default for FlipDuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Faces to deal. Each face produces two cards.
    pub deck: Deck,

    /// Requested flip duration in milliseconds (unvalidated; NaN for
    /// non-numeric input).
    pub flip_duration_ms: f64,

    /// Elapsed-time tick interval in milliseconds. Each tick adds the
    /// interval to the elapsed time, so `elapsed_seconds` counts seconds
    /// whatever the interval.
    pub tick_interval_ms: u64,

    /// Seed for board shuffles.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            deck: Deck::standard(),
            flip_duration_ms: FlipDuration::DEFAULT_MS as f64,
            tick_interval_ms: 1000,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Create a configuration for the given deck with default timings.
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            ..Self::default()
        }
    }

    /// Set the requested flip duration in milliseconds.
    #[must_use]
    pub fn with_flip_duration(mut self, millis: f64) -> Self {
        self.flip_duration_ms = millis;
        self
    }

    /// Set the flip duration from user text.
    ///
    /// Text that does not parse as a number is kept as NaN and reported at
    /// validation time.
    #[must_use]
    pub fn with_flip_duration_str(mut self, text: &str) -> Self {
        self.flip_duration_ms = text.trim().parse::<f64>().unwrap_or(f64::NAN);
        self
    }

    /// Set the elapsed-time tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, millis: u64) -> Self {
        self.tick_interval_ms = millis;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validated flip duration plus the warning, if the request was invalid.
    #[must_use]
    pub fn flip_duration(&self) -> (FlipDuration, Option<ConfigError>) {
        FlipDuration::resolve(self.flip_duration_ms)
    }

    /// Tick interval as a `Duration`, at least one millisecond.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
