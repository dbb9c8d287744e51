//! Tournaments: the same entrants over a fixed number of rounds, ranked
//! by average placement.

mod runner;

pub use runner::{
    Medal, RoundEvent, TournamentEntry, TournamentResult, TournamentRunner, DEFAULT_ROUNDS,
};
