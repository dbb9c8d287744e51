//! Per-race and cross-race state carried by each racer.
//!
//! - `RaceState`: position and power-up countdown, reset before every race
//! - `CareerStats`: races, wins and placements, outlives races

use serde::{Deserialize, Serialize};

/// Power-up state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpState {
    #[default]
    Idle,
    /// Active, with the number of turns the bonus still applies
    /// (including the current one).
    Boosted { turns_remaining: u32 },
}

impl PowerUpState {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, PowerUpState::Boosted { .. })
    }

    #[must_use]
    pub fn turns_remaining(self) -> u32 {
        match self {
            PowerUpState::Idle => 0,
            PowerUpState::Boosted { turns_remaining } => turns_remaining,
        }
    }

    /// Spend one active turn. Returns true if the bonus applied.
    pub fn consume(&mut self) -> bool {
        match *self {
            PowerUpState::Idle => false,
            PowerUpState::Boosted { turns_remaining } => {
                *self = if turns_remaining <= 1 {
                    PowerUpState::Idle
                } else {
                    PowerUpState::Boosted {
                        turns_remaining: turns_remaining - 1,
                    }
                };
                true
            }
        }
    }
}

/// Transient state for the race in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceState {
    /// Distance covered so far. Never decreases within a race.
    pub position: u32,
    pub power_up: PowerUpState,
}

impl RaceState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }
}

/// Career totals updated once per completed race.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerStats {
    pub races_played: u32,
    pub wins: u32,
    pub placement_sum: u32,
}

impl CareerStats {
    /// Record one finished race. `placement` is 1-based.
    pub fn record(&mut self, placement: u32) {
        debug_assert!(placement >= 1, "placements start at 1");
        self.races_played += 1;
        self.placement_sum += placement;
        if placement == 1 {
            self.wins += 1;
        }
    }

    /// Mean placement, 0.0 before the first race.
    #[must_use]
    pub fn average_placement(&self) -> f64 {
        if self.races_played == 0 {
            0.0
        } else {
            f64::from(self.placement_sum) / f64::from(self.races_played)
        }
    }

    /// Wins as a percentage of races, 0.0 before the first race.
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        if self.races_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.races_played) * 100.0
        }
    }
}
