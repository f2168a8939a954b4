//! Host-side collaborators.
//!
//! A host (browser page, desktop window, terminal) provides:
//! - `CardRenderer`: draws and animates cards
//! - `AudioSink`: plays sound cues
//! - `Overlay`: shows level/game prompts
//! - `InputDispatcher`: turns pointer clicks into flips
//!
//! and routes the session's events to them with [`present`].

pub mod audio;
pub mod input;
pub mod overlay;
pub mod renderer;

pub use audio::{play_cue, AudioError, AudioSink, Muted};
pub use input::{pick_card, Camera, InputDispatcher, Viewport};
pub use overlay::Overlay;
pub use renderer::{CardRenderer, FLIP_ANIMATION_MS};

use crate::events::GameEvent;

/// Route session events to the host's collaborators.
pub fn present<A, O, R>(events: impl IntoIterator<Item = GameEvent>, audio: &mut A, overlay: &mut O, renderer: &mut R)
where
    A: AudioSink + ?Sized,
    O: Overlay + ?Sized,
    R: CardRenderer + ?Sized,
{
    for event in events {
        if let Some(cue) = event.sound_cue() {
            play_cue(audio, cue);
        }

        match event {
            GameEvent::LevelDealt { cards, .. } => {
                renderer.clear();
                for card in &cards {
                    renderer.spawn(card);
                }
            }
            GameEvent::CardFlipped { card, face_up } => renderer.animate_flip(card, face_up),
            GameEvent::PairMatched { first, second, .. } => renderer.mark_matched(first, second),
            GameEvent::Prompt(prompt) => overlay.show(&prompt),
            GameEvent::PromptDismissed => overlay.hide(),
            GameEvent::Mismatch { .. }
            | GameEvent::ScoreChanged { .. }
            | GameEvent::TimerTicked { .. }
            | GameEvent::LevelComplete { .. }
            | GameEvent::GameComplete { .. }
            | GameEvent::GameOver { .. } => {}
        }
    }
}
