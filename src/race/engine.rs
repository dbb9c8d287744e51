//! The race engine: turn loop, power-up activation, finish detection, ranking.

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::core::{RaceConfig, RaceError, RandomSource};
use crate::racer::Competitor;

use super::event::{NullObserver, RaceEvent, RaceObserver};
use super::ranking::{rank, RaceOutcome, RaceResult};

/// Runs races among competitors.
///
/// The engine owns its random source and observer; it holds no race state
/// between calls to `simulate`. All mutable race state lives on the
/// competitors.
///
/// ## Turn loop
///
/// Every turn, each competitor in entry order:
/// 1. if idle, gets one activation trial at `activation_probability`
/// 2. advances once
/// 3. flags the race as finished if it reached `finish_distance`
///
/// The finish flag is only checked after the whole turn, so every
/// competitor moves in the turn where someone crosses the line.
pub struct RaceEngine<R, O = NullObserver> {
    config: RaceConfig,
    rng: R,
    observer: O,
}

impl<R: RandomSource> RaceEngine<R, NullObserver> {
    /// Create an engine with no observer.
    pub fn new(config: RaceConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            observer: NullObserver,
        }
    }
}

impl<R: RandomSource, O: RaceObserver> RaceEngine<R, O> {
    /// Replace the observer.
    pub fn with_observer<P: RaceObserver>(self, observer: P) -> RaceEngine<R, P> {
        RaceEngine {
            config: self.config,
            rng: self.rng,
            observer,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Run one race to completion and rank the participants.
    ///
    /// Participants must be reset (position 0, no active power-up) and
    /// have unique names. Entry order is the iteration order of every turn
    /// and breaks ties in the ranking. Career stats are not touched here;
    /// see `Race` for the flow that records results.
    pub fn simulate<C: Competitor>(&mut self, participants: &mut [C]) -> Result<RaceResult, RaceError> {
        Self::check_participants(participants)?;

        let finish_distance = self.config.finish_distance;
        let probability = self.config.activation_probability;

        {
            let names: Vec<&str> = participants.iter().map(Competitor::name).collect();
            info!(
                participants = names.len(),
                finish_distance, "Starting race: {}", names.join(", ")
            );
            self.observer.on_event(&RaceEvent::Started {
                names: &names,
                finish_distance,
            });
        }

        let mut turn = 1;
        let outcome = loop {
            self.observer.on_event(&RaceEvent::TurnStarted { turn });
            let mut finished = false;

            for competitor in participants.iter_mut() {
                if !competitor.is_power_up_active() && self.rng.chance(probability) {
                    competitor.activate_power_up();
                    debug!(turn, racer = competitor.name(), "power-up activated");
                    self.observer.on_event(&RaceEvent::PowerUpActivated {
                        turn,
                        name: competitor.name(),
                        power_up: competitor.power_up_name(),
                    });
                }

                let distance = competitor.advance(&mut self.rng);
                let position = competitor.position();
                debug!(turn, racer = competitor.name(), distance, position, "advanced");
                self.observer.on_event(&RaceEvent::Advanced {
                    turn,
                    name: competitor.name(),
                    distance,
                    position,
                    boosted: competitor.is_power_up_active(),
                });

                if position >= finish_distance {
                    finished = true;
                }
            }

            self.observer.on_event(&RaceEvent::TurnFinished { turn });

            if finished {
                break RaceOutcome::Finished;
            }
            if self.config.turn_limit_reached(turn) {
                warn!(turn, "turn limit reached before anyone finished");
                break RaceOutcome::TurnLimit;
            }
            turn += 1;
        };

        let result = RaceResult {
            standings: rank(participants),
            turns: turn,
            outcome,
        };

        if let Some(winner) = result.winner() {
            info!(
                turns = result.turns,
                winner = %winner.name,
                position = winner.position,
                "Race finished"
            );
        }
        self.observer.on_event(&RaceEvent::Finished { result: &result });

        Ok(result)
    }

    fn check_participants<C: Competitor>(participants: &[C]) -> Result<(), RaceError> {
        if participants.is_empty() {
            return Err(RaceError::NoParticipants);
        }

        let mut seen = FxHashSet::default();
        for competitor in participants {
            if !competitor.is_reset() {
                return Err(RaceError::ParticipantNotReset {
                    name: competitor.name().to_string(),
                });
            }
            if !seen.insert(competitor.name()) {
                return Err(RaceError::DuplicateParticipant {
                    name: competitor.name().to_string(),
                });
            }
        }

        Ok(())
    }
}
