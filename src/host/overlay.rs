//! Overlay collaborator.
//!
//! The overlay only displays prompts. The acknowledgement itself lives in
//! the session controller, which keeps exactly one pending at a time: a new
//! `show` replaces whatever was on screen, and the host reports the button
//! press through `SessionController::acknowledge`.

use crate::events::OverlayPrompt;

/// A modal dialog with one button.
pub trait Overlay {
    /// Display `prompt`, replacing any visible prompt.
    fn show(&mut self, prompt: &OverlayPrompt);

    fn hide(&mut self);
}
