//! Match engine: flip, evaluate, flip back.
//!
//! The engine is a set of transition functions over [`SessionState`]:
//!
//! ```text
//! Idle --flip(a)--> OnePicked(a) --flip(b)--> Evaluating(a, b)
//!                                               |-- same value --> Idle (score + 1)
//!                                               `-- different ---> Locked(a, b)
//! Locked(a, b) --resolve_mismatch--> Idle (a and b face down)
//! ```
//!
//! Invalid flips are not errors. They come back as
//! [`FlipOutcome::Ignored`] and leave the state untouched.

use serde::{Deserialize, Serialize};

use crate::core::entity::CardId;
use crate::core::state::{MatchPhase, SessionState};

/// Why a flip request did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoredFlip {
    /// A pair is being evaluated or flipped back, or the session is not
    /// accepting play.
    InputLocked,
    /// No card with this id is on the table.
    UnknownCard,
    /// The card's pair was already found.
    AlreadyMatched,
    /// The card is already face up.
    AlreadyFlipped,
    /// The card is the pending first pick.
    SameCard,
}

/// Result of a flip request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipOutcome {
    Ignored(IgnoredFlip),
    /// First card of a pair turned face up.
    FirstPick(CardId),
    /// Second card matched the first.
    Matched {
        first: CardId,
        second: CardId,
        value: u32,
        /// Every pair of the level has now been found.
        level_cleared: bool,
    },
    /// Second card differs; both stay face up until
    /// [`resolve_mismatch`] runs.
    Mismatched { first: CardId, second: CardId },
}

impl FlipOutcome {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, FlipOutcome::Ignored(_))
    }

    /// Card turned face up by this flip, if any.
    #[must_use]
    pub fn revealed(&self) -> Option<CardId> {
        match *self {
            FlipOutcome::Ignored(_) => None,
            FlipOutcome::FirstPick(card) => Some(card),
            FlipOutcome::Matched { second, .. } | FlipOutcome::Mismatched { second, .. } => Some(second),
        }
    }
}

/// Turn `card` face up and resolve the pair if it is the second pick.
pub fn flip(state: &mut SessionState, card: CardId) -> FlipOutcome {
    if state.input_locked() {
        return FlipOutcome::Ignored(IgnoredFlip::InputLocked);
    }

    let (matched, flipped) = match state.card(card) {
        Some(c) => (c.matched, c.flipped),
        None => return FlipOutcome::Ignored(IgnoredFlip::UnknownCard),
    };
    if matched {
        return FlipOutcome::Ignored(IgnoredFlip::AlreadyMatched);
    }

    match state.match_phase {
        MatchPhase::Idle => {
            if flipped {
                return FlipOutcome::Ignored(IgnoredFlip::AlreadyFlipped);
            }
            set_flipped(state, card, true);
            state.match_phase = MatchPhase::OnePicked(card);
            FlipOutcome::FirstPick(card)
        }
        MatchPhase::OnePicked(first) => {
            if first == card {
                return FlipOutcome::Ignored(IgnoredFlip::SameCard);
            }
            if flipped {
                return FlipOutcome::Ignored(IgnoredFlip::AlreadyFlipped);
            }
            set_flipped(state, card, true);
            state.match_phase = MatchPhase::Evaluating(first, card);
            evaluate(state)
        }
        MatchPhase::Evaluating(..) | MatchPhase::Locked(..) => FlipOutcome::Ignored(IgnoredFlip::InputLocked),
    }
}

/// Compare the two picks of an `Evaluating` state.
fn evaluate(state: &mut SessionState) -> FlipOutcome {
    let MatchPhase::Evaluating(first, second) = state.match_phase else {
        return FlipOutcome::Ignored(IgnoredFlip::InputLocked);
    };

    let first_value = state.card(first).map(|c| c.value);
    let second_value = state.card(second).map(|c| c.value);

    match (first_value, second_value) {
        (Some(a), Some(b)) if a == b => {
            for id in [first, second] {
                if let Some(c) = state.card_mut(id) {
                    c.matched = true;
                }
            }
            state.score = (state.score + 1).min(state.pairs_in_level);
            state.match_phase = MatchPhase::Idle;
            FlipOutcome::Matched {
                first,
                second,
                value: a,
                level_cleared: state.level_cleared(),
            }
        }
        _ => {
            state.match_phase = MatchPhase::Locked(first, second);
            FlipOutcome::Mismatched { first, second }
        }
    }
}

/// Turn a mismatched pair back face down and unlock input.
///
/// Returns the two cards, or `None` when no mismatch is pending.
pub fn resolve_mismatch(state: &mut SessionState) -> Option<(CardId, CardId)> {
    let MatchPhase::Locked(first, second) = state.match_phase else {
        return None;
    };

    for id in [first, second] {
        if let Some(c) = state.card_mut(id) {
            c.flipped = false;
            c.matched = false;
        }
    }
    state.match_phase = MatchPhase::Idle;
    Some((first, second))
}

fn set_flipped(state: &mut SessionState, card: CardId, flipped: bool) {
    if let Some(c) = state.card_mut(card) {
        c.flipped = flipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Position};
    use crate::core::{GameConfig, SessionPhase};

    /// Two pairs laid out as values [1, 2, 1, 2].
    fn table() -> SessionState {
        let mut state = SessionState::new(&GameConfig::new());
        state.pairs_in_level = 2;
        state.cards = [1, 2, 1, 2]
            .into_iter()
            .enumerate()
            .map(|(i, v)| Card::new(CardId::new(i as u32), v, Position::default()))
            .collect();
        state
    }

    const A1: CardId = CardId(0);
    const B1: CardId = CardId(1);
    const A2: CardId = CardId(2);
    const B2: CardId = CardId(3);

    #[test]
    fn test_first_pick() {
        let mut state = table();
        assert_eq!(flip(&mut state, A1), FlipOutcome::FirstPick(A1));
        assert_eq!(state.match_phase, MatchPhase::OnePicked(A1));
        assert!(state.card(A1).unwrap().flipped);
    }

    #[test]
    fn test_same_card_twice_stays_one_picked() {
        let mut state = table();
        flip(&mut state, A1);
        assert_eq!(flip(&mut state, A1), FlipOutcome::Ignored(IgnoredFlip::SameCard));
        assert_eq!(state.match_phase, MatchPhase::OnePicked(A1));
    }

    #[test]
    fn test_match() {
        let mut state = table();
        flip(&mut state, A1);
        let outcome = flip(&mut state, A2);

        assert_eq!(
            outcome,
            FlipOutcome::Matched { first: A1, second: A2, value: 1, level_cleared: false }
        );
        assert_eq!(state.score, 1);
        assert_eq!(state.match_phase, MatchPhase::Idle);
        assert!(state.card(A1).unwrap().matched);
        assert!(state.card(A2).unwrap().matched);
        assert!(!state.input_locked());
    }

    #[test]
    fn test_last_match_clears_level() {
        let mut state = table();
        flip(&mut state, A1);
        flip(&mut state, A2);
        flip(&mut state, B2);
        let outcome = flip(&mut state, B1);

        assert!(matches!(outcome, FlipOutcome::Matched { level_cleared: true, value: 2, .. }));
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_mismatch_locks_then_resolves() {
        let mut state = table();
        flip(&mut state, A1);
        assert_eq!(flip(&mut state, B1), FlipOutcome::Mismatched { first: A1, second: B1 });
        assert_eq!(state.match_phase, MatchPhase::Locked(A1, B1));
        assert!(state.input_locked());

        assert_eq!(flip(&mut state, A2), FlipOutcome::Ignored(IgnoredFlip::InputLocked));
        assert!(!state.card(A2).unwrap().flipped);

        assert_eq!(resolve_mismatch(&mut state), Some((A1, B1)));
        assert_eq!(state.match_phase, MatchPhase::Idle);
        for id in [A1, B1] {
            let card = state.card(id).unwrap();
            assert!(!card.flipped);
            assert!(!card.matched);
        }
        assert_eq!(state.score, 0);
        assert!(!state.input_locked());
    }

    #[test]
    fn test_resolve_without_mismatch() {
        let mut state = table();
        assert_eq!(resolve_mismatch(&mut state), None);
        flip(&mut state, A1);
        assert_eq!(resolve_mismatch(&mut state), None);
        assert_eq!(state.match_phase, MatchPhase::OnePicked(A1));
    }

    #[test]
    fn test_matched_card_ignored() {
        let mut state = table();
        flip(&mut state, A1);
        flip(&mut state, A2);
        assert_eq!(flip(&mut state, A1), FlipOutcome::Ignored(IgnoredFlip::AlreadyMatched));
        assert_eq!(state.match_phase, MatchPhase::Idle);
    }

    #[test]
    fn test_flipped_card_ignored() {
        let mut state = table();
        state.card_mut(B1).unwrap().flipped = true;
        assert_eq!(flip(&mut state, B1), FlipOutcome::Ignored(IgnoredFlip::AlreadyFlipped));

        flip(&mut state, A1);
        assert_eq!(flip(&mut state, B1), FlipOutcome::Ignored(IgnoredFlip::AlreadyFlipped));
        assert_eq!(state.match_phase, MatchPhase::OnePicked(A1));
    }

    #[test]
    fn test_unknown_card_ignored() {
        let mut state = table();
        assert_eq!(flip(&mut state, CardId::new(99)), FlipOutcome::Ignored(IgnoredFlip::UnknownCard));
    }

    #[test]
    fn test_session_phase_locks_input() {
        let mut state = table();
        state.phase = SessionPhase::GameOver;
        assert_eq!(flip(&mut state, A1), FlipOutcome::Ignored(IgnoredFlip::InputLocked));
        assert!(!state.card(A1).unwrap().flipped);
    }

    #[test]
    fn test_revealed() {
        assert_eq!(FlipOutcome::FirstPick(A1).revealed(), Some(A1));
        assert_eq!(FlipOutcome::Mismatched { first: A1, second: B1 }.revealed(), Some(B1));
        assert_eq!(FlipOutcome::Ignored(IgnoredFlip::SameCard).revealed(), None);
        assert!(FlipOutcome::Ignored(IgnoredFlip::SameCard).is_ignored());
    }
}
