//! # kart-race
//!
//! A turn-based racing simulator for a small roster of racers, each with a
//! base speed and one power-up that grants a temporary speed bonus.
//!
//! ## Design Principles
//!
//! 1. **Injected Randomness**: The engine draws every random number from a
//!    `RandomSource` it owns. Seeded `RaceRng` for real runs, `FixedRandom`
//!    and `ScriptedRandom` for exact scenarios in tests.
//!
//! 2. **No Printing in the Core**: Race progress is reported through
//!    `RaceObserver`. The console commentary lives in the binary.
//!
//! 3. **Split Racer State**: `RaceState` is reset before every race and is
//!    the only thing the turn loop touches. `CareerStats` outlives races and
//!    is written once per racer when a race is recorded.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `racer`: `Racer`, `PowerUp`, and the `Competitor` trait
//! - `race`: the engine, events, ranking, and race lineups
//! - `roster`: all racers known to a session
//! - `tournament`: multi-round races ranked by average placement
//! - `stats`: career summaries and leaders
//! - `persistence`: roster CSV and race history files

pub mod core;
pub mod persistence;
pub mod race;
pub mod racer;
pub mod roster;
pub mod stats;
pub mod tournament;

// Re-export commonly used types
pub use crate::core::{
    AppConfig, ConfigError, FixedRandom, RaceConfig, RaceError, RaceRng, RaceRngState,
    RandomSource, ScriptedRandom,
};

pub use crate::racer::{CareerStats, Competitor, PowerUp, PowerUpState, RaceState, Racer};

pub use crate::race::{
    NullObserver, Race, RaceEngine, RaceEvent, RaceObserver, RaceOutcome, RaceResult, Standing,
};

pub use crate::roster::Roster;

pub use crate::tournament::{Medal, TournamentEntry, TournamentResult, TournamentRunner};

pub use crate::stats::{Leaders, RacerSummary, StatsReport};

pub use crate::persistence::{HistoryRecord, PersistenceError, PersistenceGateway};
