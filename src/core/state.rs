//! Session state.
//!
//! ## SessionState
//!
//! Everything the rules need for one game:
//! - Level progression (current level, pairs, levels completed)
//! - Score and countdown
//! - Cards on the table and the pending picks
//!
//! The host owns exactly one `SessionState` through the session
//! controller. The match engine and the controller are the only writers.
//! Cards live in an `im::Vector`, so snapshots taken for rendering or tests
//! are O(1) clones.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::entity::CardId;
use crate::cards::{Card, Deal, GridLayout};

/// Pairs dealt on `level`.
///
/// Grows by one per level, capped at `max_level`.
#[must_use]
pub fn pairs_for_level(level: u32, max_level: u32) -> u32 {
    level.saturating_add(1).min(max_level).max(1)
}

/// Score awarded when a session ends.
#[must_use]
pub fn final_score(levels_completed: u32, remaining_time: u32) -> u32 {
    levels_completed
        .saturating_mul(1000)
        .saturating_add(remaining_time.saturating_mul(10))
}

/// Where the session is in its level loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Cards can be flipped.
    Playing,
    /// Every pair of a non-final level found; waiting on the overlay.
    LevelCleared,
    /// Final level cleared.
    GameComplete,
    /// Countdown ran out.
    GameOver,
}

impl SessionPhase {
    /// Game-complete and game-over only accept a restart.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::GameComplete | SessionPhase::GameOver)
    }
}

/// Pending picks of the match engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No card picked.
    #[default]
    Idle,
    /// One card face up, waiting for its partner.
    OnePicked(CardId),
    /// Two cards face up, being compared.
    Evaluating(CardId, CardId),
    /// Two mismatched cards face up until the flip-back delay ends.
    Locked(CardId, CardId),
}

impl MatchPhase {
    /// Picked cards, first pick first.
    #[must_use]
    pub fn picks(self) -> (Option<CardId>, Option<CardId>) {
        match self {
            MatchPhase::Idle => (None, None),
            MatchPhase::OnePicked(first) => (Some(first), None),
            MatchPhase::Evaluating(first, second) | MatchPhase::Locked(first, second) => {
                (Some(first), Some(second))
            }
        }
    }

    #[must_use]
    pub fn pick_count(self) -> usize {
        let (first, second) = self.picks();
        usize::from(first.is_some()) + usize::from(second.is_some())
    }
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Level being played, starting at 1.
    pub current_level: u32,

    /// Pairs on the table this level.
    pub pairs_in_level: u32,

    /// Pairs found this level.
    pub score: u32,

    /// Countdown units left.
    pub remaining_time: u32,

    /// Levels cleared this game.
    pub levels_completed: u32,

    /// Set once the countdown has been started for this game.
    pub timer_started: bool,

    pub phase: SessionPhase,

    pub match_phase: MatchPhase,

    /// Cards in row-major slot order.
    pub cards: Vector<Card>,

    pub layout: GridLayout,

    /// Set when the session reaches game-complete or game-over.
    pub final_score: Option<u32>,

    /// First id of the next deal.
    next_card_id: u32,
}

impl SessionState {
    /// Fresh level-1 state with an empty table and a full countdown.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            current_level: 1,
            pairs_in_level: pairs_for_level(1, config.max_level),
            score: 0,
            remaining_time: config.time_budget,
            levels_completed: 0,
            timer_started: false,
            phase: SessionPhase::Playing,
            match_phase: MatchPhase::Idle,
            cards: Vector::new(),
            layout: GridLayout::default(),
            final_score: None,
            next_card_id: 0,
        }
    }

    /// Id the next deal should start from.
    #[must_use]
    pub fn next_card_id(&self) -> u32 {
        self.next_card_id
    }

    /// Replace the table with `deal` and clear the picks.
    pub fn install_deal(&mut self, deal: Deal) {
        if let Some(next) = deal.next_id() {
            self.next_card_id = next;
        }
        self.layout = deal.layout;
        self.cards = deal.cards.into_iter().collect();
        self.match_phase = MatchPhase::Idle;
    }

    // === Cards ===

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Mutable lookup by id.
    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        self.cards.get_mut(index)
    }

    /// Card in a grid slot.
    #[must_use]
    pub fn card_at(&self, row: u32, col: u32) -> Option<&Card> {
        self.layout.index(row, col).and_then(|i| self.cards.get(i))
    }

    /// Cards whose pair has not been found yet.
    pub fn unmatched(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|card| !card.matched)
    }

    // === Flags ===

    /// Are flips currently refused?
    ///
    /// True while a pair is being evaluated or flipped back, and whenever
    /// the session is not in `Playing`.
    #[must_use]
    pub fn input_locked(&self) -> bool {
        self.phase != SessionPhase::Playing
            || matches!(self.match_phase, MatchPhase::Evaluating(..) | MatchPhase::Locked(..))
    }

    /// Have all pairs of this level been found?
    #[must_use]
    pub fn level_cleared(&self) -> bool {
        self.score == self.pairs_in_level
    }

    /// Is this the last level of the journey?
    #[must_use]
    pub fn on_final_level(&self, max_level: u32) -> bool {
        self.current_level >= max_level
    }

    /// Score the session would end with right now.
    #[must_use]
    pub fn compute_final_score(&self) -> u32 {
        final_score(self.levels_completed, self.remaining_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Position;
    use crate::core::GameRng;

    fn dealt_state(pairs: u32) -> SessionState {
        let config = GameConfig::new();
        let mut state = SessionState::new(&config);
        state.pairs_in_level = pairs;
        let deal = Deal::new(pairs, state.next_card_id(), &config.table, &mut GameRng::new(3));
        state.install_deal(deal);
        state
    }

    #[test]
    fn test_pairs_for_level() {
        assert_eq!(pairs_for_level(1, 10), 2);
        assert_eq!(pairs_for_level(2, 10), 3);
        assert_eq!(pairs_for_level(9, 10), 10);
        assert_eq!(pairs_for_level(10, 10), 10);
        assert_eq!(pairs_for_level(1, 1), 1);
        assert_eq!(pairs_for_level(u32::MAX, 4), 4);
    }

    #[test]
    fn test_final_score() {
        assert_eq!(final_score(0, 0), 0);
        assert_eq!(final_score(3, 0), 3000);
        assert_eq!(final_score(2, 45), 2450);
    }

    #[test]
    fn test_new_state() {
        let state = SessionState::new(&GameConfig::new());

        assert_eq!(state.current_level, 1);
        assert_eq!(state.pairs_in_level, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining_time, 600);
        assert_eq!(state.levels_completed, 0);
        assert!(!state.timer_started);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.match_phase, MatchPhase::Idle);
        assert!(state.cards.is_empty());
        assert!(!state.input_locked());
    }

    #[test]
    fn test_install_deal_advances_ids() {
        let config = GameConfig::new();
        let mut state = dealt_state(2);
        assert_eq!(state.cards.len(), 4);
        assert_eq!(state.next_card_id(), 4);

        let deal = Deal::new(3, state.next_card_id(), &config.table, &mut GameRng::new(1));
        state.install_deal(deal);
        assert_eq!(state.cards.len(), 6);
        assert_eq!(state.cards[0].id, CardId::new(4));
        assert_eq!(state.next_card_id(), 10);
        assert!(state.card(CardId::new(0)).is_none());
    }

    #[test]
    fn test_card_lookup() {
        let mut state = dealt_state(2);
        let id = state.cards[2].id;

        assert_eq!(state.card(id).map(|c| c.id), Some(id));
        state.card_mut(id).unwrap().flipped = true;
        assert!(state.card(id).unwrap().flipped);
        assert_eq!(state.unmatched().count(), 4);

        assert_eq!(state.card_at(1, 0).map(|c| c.id), Some(id));
        assert!(state.card_at(2, 0).is_none());
    }

    #[test]
    fn test_input_lock() {
        let mut state = dealt_state(2);
        let a = state.cards[0].id;
        let b = state.cards[1].id;

        state.match_phase = MatchPhase::OnePicked(a);
        assert!(!state.input_locked());

        state.match_phase = MatchPhase::Locked(a, b);
        assert!(state.input_locked());

        state.match_phase = MatchPhase::Idle;
        state.phase = SessionPhase::LevelCleared;
        assert!(state.input_locked());
    }

    #[test]
    fn test_picks() {
        let a = CardId::new(1);
        let b = CardId::new(2);
        assert_eq!(MatchPhase::Idle.pick_count(), 0);
        assert_eq!(MatchPhase::OnePicked(a).picks(), (Some(a), None));
        assert_eq!(MatchPhase::Locked(a, b).pick_count(), 2);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut state = dealt_state(2);
        let snapshot = state.clone();
        state.cards[0].matched = true;
        state.cards[0].position = Position::new(9.0, 9.0);

        assert!(!snapshot.cards[0].matched);
        assert_ne!(snapshot, state);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!SessionPhase::Playing.is_terminal());
        assert!(!SessionPhase::LevelCleared.is_terminal());
        assert!(SessionPhase::GameComplete.is_terminal());
        assert!(SessionPhase::GameOver.is_terminal());
    }
}
