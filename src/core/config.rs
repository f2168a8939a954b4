//! Game configuration types.
//!
//! Hosts configure a session at startup by providing:
//! - `GameConfig`: level cap, countdown budget, delays, RNG seed
//! - `TableLayout`: card size and spacing on the table plane
//! - `CardAssets`: where the renderer finds card faces and the card back
//! - `AssetStorageConfig`: optional remote asset bucket settings
//!
//! Every field has a default, so a JSON config only needs the keys it
//! overrides:
//!
//! ```
//! use arcana_match::core::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "max_level": 4, "seed": 7 }"#).unwrap();
//! assert_eq!(config.max_level, 4);
//! assert_eq!(config.time_budget, 600);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Highest level of a default journey.
pub const DEFAULT_MAX_LEVEL: u32 = 10;

/// Countdown budget in time units.
pub const DEFAULT_TIME_BUDGET: u32 = 600;

/// Milliseconds per countdown unit.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// How long a mismatched pair stays face up.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;

/// Pause between the last match of a level and its overlay.
pub const DEFAULT_LEVEL_COMPLETE_DELAY_MS: u64 = 800;

/// Card size and spacing on the table plane, in world units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    pub card_width: f32,
    pub card_height: f32,
    /// Distance between the centres of horizontally adjacent cards.
    pub spacing_x: f32,
    /// Distance between the centres of vertically adjacent cards.
    pub spacing_y: f32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            card_width: 1.0,
            card_height: 1.5,
            spacing_x: 1.5,
            spacing_y: 2.0,
        }
    }
}

impl TableLayout {
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("table.card_width", self.card_width),
            ("table.card_height", self.card_height),
            ("table.spacing_x", self.spacing_x),
            ("table.spacing_y", self.spacing_y),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
        }
        Ok(())
    }
}

/// Location of card artwork.
///
/// Faces are named after the card value: value 3 is `assets/cards/3.png`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardAssets {
    pub directory: String,
    pub back: String,
    pub extension: String,
}

impl Default for CardAssets {
    fn default() -> Self {
        Self {
            directory: "assets/cards".to_string(),
            back: "back".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl CardAssets {
    /// Path of the face texture for a card value.
    #[must_use]
    pub fn face_path(&self, value: u32) -> String {
        format!("{}/{}.{}", self.directory, value, self.extension)
    }

    /// Path of the shared card back texture.
    #[must_use]
    pub fn back_path(&self) -> String {
        format!("{}/{}.{}", self.directory, self.back, self.extension)
    }
}

/// Remote asset bucket settings.
///
/// Not used by the game rules; carried so hosts that sync artwork from
/// object storage read it from the same file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetStorageConfig {
    pub region: String,
    pub bucket: String,
    #[serde(default)]
    pub mandatory_sign_in: bool,
}

impl AssetStorageConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::invalid("storage.region", "must not be empty"));
        }
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::invalid("storage.bucket", "must not be empty"));
        }
        Ok(())
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Last level of a journey. Also caps the pairs per level.
    pub max_level: u32,

    /// Countdown budget in time units.
    pub time_budget: u32,

    /// Milliseconds per countdown unit.
    pub tick_interval_ms: u64,

    /// Delay before a mismatched pair flips back.
    pub mismatch_delay_ms: u64,

    /// Delay before the level/game complete overlay is shown.
    pub level_complete_delay_ms: u64,

    /// RNG seed for dealing.
    pub seed: u64,

    pub table: TableLayout,

    pub assets: CardAssets,

    pub storage: Option<AssetStorageConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            time_budget: DEFAULT_TIME_BUDGET,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            level_complete_delay_ms: DEFAULT_LEVEL_COMPLETE_DELAY_MS,
            seed: 0,
            table: TableLayout::default(),
            assets: CardAssets::default(),
            storage: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    #[must_use]
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    #[must_use]
    pub fn with_time_budget(mut self, budget: u32) -> Self {
        self.time_budget = budget;
        self
    }

    #[must_use]
    pub fn with_tick_interval_ms(mut self, interval: u64) -> Self {
        self.tick_interval_ms = interval;
        self
    }

    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, delay: u64) -> Self {
        self.mismatch_delay_ms = delay;
        self
    }

    #[must_use]
    pub fn with_level_complete_delay_ms(mut self, delay: u64) -> Self {
        self.level_complete_delay_ms = delay;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_storage(mut self, storage: AssetStorageConfig) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Check the configuration can drive a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level == 0 {
            return Err(ConfigError::invalid("max_level", "must be at least 1"));
        }
        if self.time_budget == 0 {
            return Err(ConfigError::invalid("time_budget", "must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::invalid("tick_interval_ms", "must be at least 1"));
        }
        self.table.validate()?;
        if let Some(storage) = &self.storage {
            storage.validate()?;
        }
        Ok(())
    }
}
