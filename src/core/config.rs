//! Race and application configuration.
//!
//! - `RaceConfig`: parameters of the simulation itself (finish line,
//!   power-up odds, turn cap)
//! - `AppConfig`: everything around a session (file paths, opponents,
//!   tournament length, pacing, seed) plus a nested `RaceConfig`
//!
//! Both are serde types so a session can be configured from a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Distance a racer must cover to end the race.
pub const DEFAULT_FINISH_DISTANCE: u32 = 300;

/// Probability that an idle racer activates its power-up on a given turn.
pub const DEFAULT_ACTIVATION_PROBABILITY: f64 = 0.15;

/// Half-width of the per-turn random speed offset.
pub const SPEED_VARIANCE: i32 = 30;

/// Turn cap applied when none is configured.
pub const DEFAULT_MAX_TURNS: u32 = 10_000;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Simulation parameters for a single race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Distance that ends the race once any racer reaches it.
    pub finish_distance: u32,

    /// Chance per turn that an idle racer triggers its power-up.
    pub activation_probability: f64,

    /// Maximum number of turns (0 = unlimited).
    pub max_turns: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            finish_distance: DEFAULT_FINISH_DISTANCE,
            activation_probability: DEFAULT_ACTIVATION_PROBABILITY,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

impl RaceConfig {
    #[must_use]
    pub fn with_finish_distance(mut self, distance: u32) -> Self {
        self.finish_distance = distance;
        self
    }

    #[must_use]
    pub fn with_activation_probability(mut self, probability: f64) -> Self {
        self.activation_probability = probability;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Whether the turn counter has run past the configured cap.
    #[must_use]
    pub fn turn_limit_reached(&self, turn: u32) -> bool {
        self.max_turns != 0 && turn >= self.max_turns
    }

    /// Check that every value is usable by the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.finish_distance == 0 {
            return Err(ConfigError::Invalid(
                "finish_distance must be greater than zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.activation_probability) {
            return Err(ConfigError::Invalid(format!(
                "activation_probability must be within [0, 1], got {}",
                self.activation_probability
            )));
        }
        Ok(())
    }
}

/// Session-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV file holding the roster (`Name,Speed,PowerUp`).
    pub roster_path: PathBuf,

    /// Text file holding one history record per line.
    pub history_path: PathBuf,

    /// Opponents drawn for a quick race or tournament.
    pub opponents: usize,

    /// Rounds in a tournament.
    pub tournament_rounds: u32,

    /// Pause between turns when printing a race (milliseconds).
    pub turn_delay_ms: u64,

    /// Fixed seed for reproducible sessions.
    pub seed: Option<u64>,

    pub race: RaceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from("personajes.csv"),
            history_path: PathBuf::from("historial.txt"),
            opponents: 2,
            tournament_rounds: 4,
            turn_delay_ms: 0,
            seed: None,
            race: RaceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tournament_rounds == 0 {
            return Err(ConfigError::Invalid(
                "tournament_rounds must be at least 1".into(),
            ));
        }
        self.race.validate()
    }
}
