//! Core building blocks: randomness, configuration, errors.
//!
//! Nothing in here knows about racers; the rest of the crate is built on top.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{AppConfig, ConfigError, RaceConfig};
pub use error::RaceError;
pub use rng::{FixedRandom, RaceRng, RaceRngState, RandomSource, ScriptedRandom};
