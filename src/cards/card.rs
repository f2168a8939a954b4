//! Card instances - runtime card state.
//!
//! A `Card` is one face-down tile on the table. It knows its value (which
//! card it pairs with), whether it is currently turned face up, and whether
//! its pair has been found.

use serde::{Deserialize, Serialize};

use crate::core::entity::CardId;

/// Point on the table plane, in world units. `y` grows upwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A card on the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique id within the session.
    pub id: CardId,

    /// Pair value in `1..=pairs_in_level`. Also selects the face artwork.
    pub value: u32,

    /// Turned face up as a pending pick.
    pub flipped: bool,

    /// Pair found; stays face up for the rest of the level.
    pub matched: bool,

    /// Centre of the card on the table.
    pub position: Position,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, value: u32, position: Position) -> Self {
        Self {
            id,
            value,
            flipped: false,
            matched: false,
            position,
        }
    }

    /// Can the player pick this card?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.flipped && !self.matched
    }

    /// Is the face visible on the table?
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.flipped || self.matched
    }

    /// Does this card pair with `other`?
    ///
    /// A card never pairs with itself.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.value == other.value
    }
}
