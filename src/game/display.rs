//! Display outputs written by the engine.
//!
//! The engine pushes values to a `DisplaySink` whenever a counter changes.
//! Hosts map these onto whatever UI they have.

use serde::{Deserialize, Serialize};

/// Named outputs the engine writes to.
pub trait DisplaySink {
    /// Move counter changed.
    fn show_moves(&mut self, moves: u32);

    /// Elapsed-time text changed (`"{seconds}s"`).
    fn show_elapsed(&mut self, text: &str);

    /// Live score changed. Written at game end and on reset.
    fn show_score(&mut self, score: u32);

    /// Final score for the game-over panel.
    fn show_final_score(&mut self, score: u32);

    /// Show or hide the game-over panel.
    fn set_game_over_visible(&mut self, visible: bool);

    /// A notice the player should acknowledge (configuration warnings).
    fn notify(&mut self, message: &str);
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn show_moves(&mut self, _moves: u32) {}
    fn show_elapsed(&mut self, _text: &str) {}
    fn show_score(&mut self, _score: u32) {}
    fn show_final_score(&mut self, _score: u32) {}
    fn set_game_over_visible(&mut self, _visible: bool) {}
    fn notify(&mut self, _message: &str) {}
}

/// One write to a [`DisplayLog`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayUpdate {
    Moves(u32),
    Elapsed(String),
    Score(u32),
    FinalScore(u32),
    GameOverVisible(bool),
    Notice(String),
}

/// Sink that records every write, for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct DisplayLog {
    updates: Vec<DisplayUpdate>,
}

impl DisplayLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes, oldest first.
    #[must_use]
    pub fn updates(&self) -> &[DisplayUpdate] {
        &self.updates
    }

    /// Most recent move counter value.
    #[must_use]
    pub fn moves(&self) -> Option<u32> {
        self.updates.iter().rev().find_map(|u| match u {
            DisplayUpdate::Moves(moves) => Some(*moves),
            _ => None,
        })
    }

    /// Most recent elapsed-time text.
    #[must_use]
    pub fn elapsed(&self) -> Option<&str> {
        self.updates.iter().rev().find_map(|u| match u {
            DisplayUpdate::Elapsed(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Most recent live score.
    #[must_use]
    pub fn score(&self) -> Option<u32> {
        self.updates.iter().rev().find_map(|u| match u {
            DisplayUpdate::Score(score) => Some(*score),
            _ => None,
        })
    }

    /// Most recent final score.
    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.updates.iter().rev().find_map(|u| match u {
            DisplayUpdate::FinalScore(score) => Some(*score),
            _ => None,
        })
    }

    /// Whether the game-over panel is currently shown.
    #[must_use]
    pub fn game_over_visible(&self) -> bool {
        self.updates
            .iter()
            .rev()
            .find_map(|u| match u {
                DisplayUpdate::GameOverVisible(visible) => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Notices, oldest first.
    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.updates.iter().filter_map(|u| match u {
            DisplayUpdate::Notice(message) => Some(message.as_str()),
            _ => None,
        })
    }

    /// Forget recorded writes.
    pub fn clear(&mut self) {
        self.updates.clear();
    }
}

impl DisplaySink for DisplayLog {
    fn show_moves(&mut self, moves: u32) {
        self.updates.push(DisplayUpdate::Moves(moves));
    }

    fn show_elapsed(&mut self, text: &str) {
        self.updates.push(DisplayUpdate::Elapsed(text.to_string()));
    }

    fn show_score(&mut self, score: u32) {
        self.updates.push(DisplayUpdate::Score(score));
    }

    fn show_final_score(&mut self, score: u32) {
        self.updates.push(DisplayUpdate::FinalScore(score));
    }

    fn set_game_over_visible(&mut self, visible: bool) {
        self.updates.push(DisplayUpdate::GameOverVisible(visible));
    }

    fn notify(&mut self, message: &str) {
        self.updates.push(DisplayUpdate::Notice(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_log_latest_values() {
        let mut log = DisplayLog::new();
        log.show_moves(1);
        log.show_moves(2);
        log.show_elapsed("3s");
        log.show_score(930);
        log.show_final_score(930);
        log.set_game_over_visible(true);

        assert_eq!(log.moves(), Some(2));
        assert_eq!(log.elapsed(), Some("3s"));
        assert_eq!(log.score(), Some(930));
        assert_eq!(log.final_score(), Some(930));
        assert!(log.game_over_visible());

        log.set_game_over_visible(false);
        assert!(!log.game_over_visible());
    }

    #[test]
    fn test_display_log_empty() {
        let log = DisplayLog::new();
        assert_eq!(log.moves(), None);
        assert_eq!(log.elapsed(), None);
        assert!(!log.game_over_visible());
        assert_eq!(log.notices().count(), 0);
    }

    #[test]
    fn test_notices_and_clear() {
        let mut log = DisplayLog::new();
        log.notify("first");
        log.show_moves(1);
        log.notify("second");

        assert_eq!(log.notices().collect::<Vec<_>>(), vec!["first", "second"]);

        log.clear();
        assert!(log.updates().is_empty());
    }
}
