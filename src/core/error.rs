//! Errors raised by race setup and the race engine.

use thiserror::Error;

/// Errors that prevent a race from being run.
///
/// The turn loop itself has no failure modes; everything here is a
/// precondition checked before the first turn.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RaceError {
    #[error("a race needs at least one participant")]
    NoParticipants,

    #[error("participant {name} was not reset before the race")]
    ParticipantNotReset { name: String },

    #[error("participant {name} entered the race twice")]
    DuplicateParticipant { name: String },

    #[error("racer name {name:?} cannot contain commas or line breaks")]
    InvalidName { name: String },

    #[error("unknown racer: {0}")]
    UnknownRacer(String),

    #[error("no racer at roster index {0}")]
    InvalidEntrant(usize),

    #[error("not enough racers: needed {needed}, available {available}")]
    NotEnoughRacers { needed: usize, available: usize },
}
