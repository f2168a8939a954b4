//! Core types: card ids, RNG, configuration, errors, session state.
//!
//! Everything here is plain data plus deterministic helpers. Rules that
//! change the state live in `rules`; timing lives in `session`.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;
pub mod state;

pub use config::{AssetStorageConfig, CardAssets, GameConfig, TableLayout};
pub use entity::CardId;
pub use error::ConfigError;
pub use rng::{GameRng, GameRngState, RandomSource};
pub use state::{final_score, pairs_for_level, MatchPhase, SessionPhase, SessionState};
