//! A single race among roster racers, from lineup to recorded results.

use crate::core::{RaceError, RandomSource};
use crate::racer::{Competitor, Racer};

use super::engine::RaceEngine;
use super::event::RaceObserver;
use super::ranking::RaceResult;

/// Lineup for one race.
///
/// Adding a racer resets it for the race. Running the race ranks the
/// lineup and records each racer's placement in its career stats,
/// exactly once per racer.
#[derive(Debug, Default)]
pub struct Race<'a> {
    entrants: Vec<&'a mut Racer>,
}

impl<'a> Race<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entrants: Vec::new(),
        }
    }

    /// Reset the racer and put it on the grid. Names must be unique.
    pub fn add_participant(&mut self, racer: &'a mut Racer) -> Result<(), RaceError> {
        if self.entrants.iter().any(|e| e.name() == racer.name()) {
            return Err(RaceError::DuplicateParticipant {
                name: racer.name().to_string(),
            });
        }
        racer.reset_for_new_race();
        self.entrants.push(racer);
        Ok(())
    }

    /// Racers in entry order.
    pub fn participants(&self) -> impl Iterator<Item = &Racer> {
        self.entrants.iter().map(|r| &**r)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    /// Simulate the race and record every placement.
    pub fn run<R, O>(mut self, engine: &mut RaceEngine<R, O>) -> Result<RaceResult, RaceError>
    where
        R: RandomSource,
        O: RaceObserver,
    {
        let result = engine.simulate(&mut self.entrants)?;

        for standing in &result.standings {
            self.entrants[standing.entrant].record_result(standing.placement);
        }

        Ok(result)
    }
}
