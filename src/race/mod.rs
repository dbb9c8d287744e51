//! Race simulation: the engine, its event sink, ranking, and the lineup
//! that ties a race to roster racers.

mod engine;
mod event;
mod lineup;
mod ranking;

pub use engine::RaceEngine;
pub use event::{NullObserver, RaceEvent, RaceObserver};
pub use lineup::Race;
pub use ranking::{rank, rank_positions, RaceOutcome, RaceResult, Standing};
