//! # arcana-match
//!
//! Game logic for a tarot-themed memory matching game.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: All game state is one `SessionState` value. The
//!    match rules are functions over it; the host owns the only instance
//!    through a `SessionController`.
//!
//! 2. **No Wall Clock**: Flip-backs, announcements and the countdown are
//!    cancellable tasks on a virtual clock that the host advances.
//!
//! 3. **Events Out**: The session never touches a renderer, speaker or
//!    dialog. It queues `GameEvent`s for the host to present.
//!
//! ## Game Flow
//!
//! - Level `n` deals `min(n + 1, max_level)` pairs, shuffled onto a grid.
//! - Two face-up cards with the same value are a match; otherwise they flip
//!   back after a short delay.
//! - Clearing a level shows an overlay; acknowledging it deals the next.
//! - A single countdown spans the whole journey. When it runs out the game
//!   ends with `levels_completed × 1000 + remaining_time × 10` points.
//!
//! ## Modules
//!
//! - `core`: Card ids, RNG, configuration, errors, session state
//! - `cards`: Cards, shuffling, values, grid layout, dealing
//! - `rules`: Match engine transitions
//! - `events`: Events, sound cues, overlay prompts
//! - `session`: Controller, scheduler, HUD
//! - `host`: Renderer, audio, overlay and input collaborators

pub mod cards;
pub mod core;
pub mod events;
pub mod host;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    AssetStorageConfig, CardAssets, CardId, ConfigError, GameConfig, GameRng, MatchPhase, RandomSource,
    SessionPhase, SessionState, TableLayout,
};

pub use crate::cards::{generate_values, grid_layout, shuffle, Card, Deal, GridLayout, Position};

pub use crate::rules::{FlipOutcome, IgnoredFlip};

pub use crate::events::{EventBatch, GameEvent, OverlayPrompt, PromptKind, SoundCue};

pub use crate::session::{Acknowledgement, Hud, Scheduler, SessionController, TaskHandle};

pub use crate::host::{present, AudioError, AudioSink, CardRenderer, InputDispatcher, Overlay, Viewport};
