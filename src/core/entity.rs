//! Card identification.
//!
//! Every card dealt during a session gets a unique `CardId`. Ids are handed
//! out from a session-wide counter, so a card from a discarded level never
//! aliases a card on the current table.
//!
//! ```
//! use arcana_match::core::CardId;
//!
//! let first = CardId::new(0);
//! let second = CardId::new(1);
//!
//! assert_ne!(first, second);
//! assert_eq!(second.raw(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within a session.
///
/// Two cards may share a value (they are a pair) but never an id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_display() {
        assert_eq!(format!("{}", CardId::new(7)), "Card(7)");
    }

    #[test]
    fn test_card_id_ordering() {
        let mut ids = vec![CardId::new(3), CardId::new(1), CardId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![CardId::new(1), CardId::new(2), CardId::new(3)]);
    }

    #[test]
    fn test_card_id_serde() {
        let id = CardId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
