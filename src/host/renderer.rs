//! Renderer collaborator.

use crate::cards::Card;
use crate::core::entity::CardId;

/// Duration of the flip rotation in the reference scene.
pub const FLIP_ANIMATION_MS: u64 = 1000;

/// Draws the table.
///
/// Implementations map a card to a pickable visual object: the back
/// texture by default, the face texture for `card.value` once flipped.
pub trait CardRenderer {
    /// Remove every card from the table.
    fn clear(&mut self);

    /// Add a face-down card at `card.position`.
    fn spawn(&mut self, card: &Card);

    /// Rotate a card face up or back face down.
    fn animate_flip(&mut self, card: CardId, face_up: bool);

    /// Highlight a found pair.
    fn mark_matched(&mut self, first: CardId, second: CardId);
}
