//! Game events.
//!
//! Events are what the session tells the outside world: which cards to
//! animate, which sound to play, which overlay to show. The controller
//! queues them; the host drains the queue once per frame and routes each
//! event to its collaborator (see `host::present`).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, GridLayout};
use crate::core::entity::CardId;

/// Events queued between two host drains.
///
/// A flip produces at most a handful of events, so the common case never
/// touches the heap.
pub type EventBatch = SmallVec<[GameEvent; 8]>;

/// Sound effects keyed to game moments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    CardFlip,
    PairMatch,
    LevelComplete,
    GameComplete,
}

/// Which overlay is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptKind {
    LevelComplete,
    GameComplete,
    GameOver,
}

/// A modal message with a single acknowledgement button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayPrompt {
    pub kind: PromptKind,
    pub title: String,
    pub message: String,
    pub button: String,
}

impl OverlayPrompt {
    /// Shown after clearing `level`.
    pub fn level_complete(level: u32, next_pairs: u32) -> Self {
        Self {
            kind: PromptKind::LevelComplete,
            title: format!("Level {level} Complete"),
            message: format!(
                "The cards have revealed their secrets. Level {} holds {} pairs.",
                level + 1,
                next_pairs
            ),
            button: "Next Level".to_string(),
        }
    }

    /// Shown after clearing the final level.
    pub fn game_complete(final_score: u32) -> Self {
        Self {
            kind: PromptKind::GameComplete,
            title: "Congratulations!".to_string(),
            message: format!("You matched every arcanum. Final score: {final_score}"),
            button: "Play Again".to_string(),
        }
    }

    /// Shown when the countdown runs out.
    pub fn game_over(levels_completed: u32, final_score: u32) -> Self {
        Self {
            kind: PromptKind::GameOver,
            title: "Time's Up".to_string(),
            message: format!("Levels completed: {levels_completed}. Final score: {final_score}"),
            button: "Start New Journey".to_string(),
        }
    }
}

/// Something the host should react to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new level's cards replace the table.
    LevelDealt {
        level: u32,
        pairs: u32,
        layout: GridLayout,
        cards: Vec<Card>,
    },
    /// A card turned face up or back face down.
    CardFlipped { card: CardId, face_up: bool },
    PairMatched { first: CardId, second: CardId, value: u32 },
    Mismatch { first: CardId, second: CardId },
    ScoreChanged { score: u32, pairs: u32 },
    TimerTicked { remaining: u32 },
    /// Every pair of a non-final level found.
    LevelComplete { level: u32 },
    GameComplete { final_score: u32 },
    GameOver { final_score: u32 },
    /// Show the overlay, replacing any overlay already visible.
    Prompt(OverlayPrompt),
    PromptDismissed,
}

impl GameEvent {
    /// Sound to play for this event.
    #[must_use]
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::CardFlipped { face_up: true, .. } => Some(SoundCue::CardFlip),
            GameEvent::PairMatched { .. } => Some(SoundCue::PairMatch),
            GameEvent::LevelComplete { .. } => Some(SoundCue::LevelComplete),
            GameEvent::GameComplete { .. } => Some(SoundCue::GameComplete),
            _ => None,
        }
    }
}
