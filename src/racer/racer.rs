//! The `Racer`: fixed identity plus race and career state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::SPEED_VARIANCE;
use crate::core::RandomSource;

use super::competitor::Competitor;
use super::power_up::PowerUp;
use super::state::{CareerStats, PowerUpState, RaceState};

/// A competitor with a base speed and one power-up.
///
/// Name, base speed and power-up are fixed for the racer's lifetime.
/// `race` is reset before every race; `career` accumulates across races
/// and is only written by the ranking consumer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Racer {
    name: String,
    base_speed: u32,
    power_up: PowerUp,
    race: RaceState,
    career: CareerStats,
}

impl Racer {
    pub fn new(name: impl Into<String>, base_speed: u32, power_up: PowerUp) -> Self {
        Self {
            name: name.into(),
            base_speed,
            power_up,
            race: RaceState::default(),
            career: CareerStats::default(),
        }
    }

    #[must_use]
    pub fn base_speed(&self) -> u32 {
        self.base_speed
    }

    #[must_use]
    pub fn power_up(&self) -> &PowerUp {
        &self.power_up
    }

    #[must_use]
    pub fn race_state(&self) -> &RaceState {
        &self.race
    }

    #[must_use]
    pub fn career(&self) -> &CareerStats {
        &self.career
    }

    /// Turns of power-up bonus left, 0 when idle.
    #[must_use]
    pub fn power_up_turns_remaining(&self) -> u32 {
        self.race.power_up.turns_remaining()
    }

    /// Back to the start line with no active power-up.
    pub fn reset_for_new_race(&mut self) {
        self.race.reset();
    }

    /// Record the placement of a completed race (1 = winner).
    pub fn record_result(&mut self, placement: u32) {
        self.career.record(placement);
    }

    /// Move using an already drawn offset.
    ///
    /// The bonus applies first, then the countdown decays; the total is
    /// clamped at zero so the racer never moves backwards.
    pub fn advance_by(&mut self, offset: i32) -> u32 {
        let mut speed = i64::from(self.base_speed) + i64::from(offset);

        if self.race.power_up.consume() {
            speed += i64::from(self.power_up.bonus());
        }

        let moved = u32::try_from(speed.max(0)).unwrap_or(u32::MAX);
        self.race.position = self.race.position.saturating_add(moved);
        moved
    }
}

impl Competitor for Racer {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> u32 {
        self.race.position
    }

    fn advance(&mut self, rng: &mut dyn RandomSource) -> u32 {
        let offset = rng.offset(-SPEED_VARIANCE, SPEED_VARIANCE);
        self.advance_by(offset)
    }

    fn activate_power_up(&mut self) {
        if !self.race.power_up.is_active() {
            self.race.power_up = PowerUpState::Boosted {
                turns_remaining: self.power_up.duration(),
            };
        }
    }

    fn is_power_up_active(&self) -> bool {
        self.race.power_up.is_active()
    }

    fn power_up_name(&self) -> Option<&str> {
        Some(self.power_up.name())
    }

    fn is_reset(&self) -> bool {
        self.race.is_reset()
    }
}

impl fmt::Display for Racer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Speed: {}, Power-up: {})",
            self.name,
            self.base_speed,
            self.power_up.name()
        )
    }
}
