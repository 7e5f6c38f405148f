//! Entity identification for cards on the board.
//!
//! Every dealt card gets a unique `EntityId`. The two cards of a pair share
//! an identity but never an entity ID, so the engine always tracks cards by
//! `EntityId` and compares identities only when resolving a pair.
//!
//! ## Usage
//!
//! ```
//! use memory_match::core::{EntityAllocator, EntityId};
//!
//! let mut alloc = EntityAllocator::new();
//! let first = alloc.next_id();
//! let second = alloc.next_id();
//!
//! assert_eq!(first, EntityId(0));
//! assert_eq!(second, EntityId(1));
//! assert_eq!(alloc.allocated(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Sequential entity ID allocator.
///
/// IDs start at 0 and are never reused within a session. Dealing a deck
/// allocates IDs in deal order, so the initial (pre-shuffle) position of a
/// card equals its raw ID.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at `EntityId(0)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.next as usize
    }
}
