//! Grid layout hint for renderers.
//!
//! The layout has no bearing on game logic. Renderers are free to ignore it
//! and use their own policy.

use serde::{Deserialize, Serialize};

/// Suggested grid shape for a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridLayout {
    /// Number of columns. Always even, within `MIN_COLUMNS..=MAX_COLUMNS`.
    pub columns: u8,
}

impl GridLayout {
    pub const MIN_COLUMNS: u8 = 2;
    pub const MAX_COLUMNS: u8 = 12;

    /// Derive the column count for `card_count` cards.
    ///
    /// Half the card count, clamped to `2..=12`, then made even: 11 rounds
    /// up to 12, any other odd value rounds down.
    ///
    /// ```
    /// use memory_match::board::GridLayout;
    ///
    /// assert_eq!(GridLayout::for_card_count(12).columns, 6);
    /// assert_eq!(GridLayout::for_card_count(14).columns, 6);
    /// assert_eq!(GridLayout::for_card_count(22).columns, 12);
    /// assert_eq!(GridLayout::for_card_count(2).columns, 2);
    /// ```
    #[must_use]
    pub fn for_card_count(card_count: usize) -> Self {
        let half = card_count / 2;
        let mut columns = half.clamp(Self::MIN_COLUMNS as usize, Self::MAX_COLUMNS as usize) as u8;
        if columns % 2 != 0 {
            columns = if columns == 11 { 12 } else { columns - 1 };
        }
        Self { columns }
    }
}
