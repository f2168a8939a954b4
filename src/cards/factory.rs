//! Dealing: building the cards for one level.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::layout::{card_positions, grid_layout, GridLayout};
use super::values::generate_values;
use crate::core::config::TableLayout;
use crate::core::entity::CardId;
use crate::core::rng::RandomSource;

/// Cards and grid for one level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub layout: GridLayout,
    /// Face-down cards in row-major slot order.
    pub cards: Vec<Card>,
}

impl Deal {
    /// Shuffle `pairs` pairs onto the table.
    ///
    /// Card ids are allocated consecutively from `first_id`.
    pub fn new<R: RandomSource + ?Sized>(
        pairs: u32,
        first_id: u32,
        table: &TableLayout,
        rng: &mut R,
    ) -> Self {
        let values = generate_values(pairs, rng);
        let layout = grid_layout(values.len() as u32);
        let positions = card_positions(layout, values.len(), table);

        let cards = values
            .into_iter()
            .zip(positions)
            .enumerate()
            .map(|(i, (value, position))| Card::new(CardId::new(first_id + i as u32), value, position))
            .collect();

        Self { layout, cards }
    }

    /// Id the next deal should start from.
    #[must_use]
    pub fn next_id(&self) -> Option<u32> {
        self.cards.last().map(|card| card.id.raw() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    #[test]
    fn test_deal_four_pairs() {
        let mut rng = GameRng::new(42);
        let deal = Deal::new(4, 0, &TableLayout::default(), &mut rng);

        assert_eq!(deal.layout, GridLayout::new(2, 4));
        assert_eq!(deal.cards.len(), 8);
        assert!(deal.cards.iter().all(Card::is_selectable));

        let ids: Vec<u32> = deal.cards.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, (0..8).collect::<Vec<_>>());
        assert_eq!(deal.next_id(), Some(8));
    }

    #[test]
    fn test_ids_continue_from_first_id() {
        let mut rng = GameRng::new(1);
        let deal = Deal::new(2, 100, &TableLayout::default(), &mut rng);
        assert_eq!(deal.cards[0].id, CardId::new(100));
        assert_eq!(deal.cards[3].id, CardId::new(103));
    }

    #[test]
    fn test_every_card_positioned_uniquely() {
        let mut rng = GameRng::new(9);
        let deal = Deal::new(5, 0, &TableLayout::default(), &mut rng);

        for (i, a) in deal.cards.iter().enumerate() {
            for b in &deal.cards[i + 1..] {
                assert_ne!(a.position, b.position);
            }
        }
    }

    #[test]
    fn test_empty_deal() {
        let mut rng = GameRng::new(9);
        let deal = Deal::new(0, 0, &TableLayout::default(), &mut rng);
        assert!(deal.cards.is_empty());
        assert_eq!(deal.next_id(), None);
    }
}
