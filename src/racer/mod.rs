//! Racers, their power-ups, and the capability set the engine drives.
//!
//! ## Power-up state machine
//!
//! `Idle -> Boosted` when the turn loop triggers `activate_power_up`
//! (no-op while already boosted). Each `advance` while boosted adds the
//! bonus and spends one turn; the last turn drops back to `Idle`.

mod competitor;
mod power_up;
#[allow(clippy::module_inception)]
mod racer;
mod state;

pub use competitor::Competitor;
pub use power_up::PowerUp;
pub use racer::Racer;
pub use state::{CareerStats, PowerUpState, RaceState};
