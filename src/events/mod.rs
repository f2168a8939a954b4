//! Events emitted by the session.
//!
//! The session never calls renderers, speakers or dialogs directly. It
//! queues `GameEvent`s, and hosts decide how to show them.

pub mod event;

pub use event::{EventBatch, GameEvent, OverlayPrompt, PromptKind, SoundCue};
