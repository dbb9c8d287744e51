//! Race events and the observer sink the engine reports to.
//!
//! The engine never prints. Anything that wants commentary (a console, a
//! test recorder) implements `RaceObserver`, and closures work directly:
//!
//! ```
//! use kart_race::race::{RaceEvent, RaceObserver};
//!
//! let mut turns = 0;
//! let mut observer = |event: &RaceEvent<'_>| {
//!     if let RaceEvent::TurnFinished { .. } = event {
//!         turns += 1;
//!     }
//! };
//! observer.on_event(&RaceEvent::TurnFinished { turn: 1 });
//! assert_eq!(turns, 1);
//! ```

use super::ranking::RaceResult;

/// Something that happened during a race.
#[derive(Clone, Debug, PartialEq)]
pub enum RaceEvent<'a> {
    /// Emitted once before the first turn, names in entry order.
    Started {
        names: &'a [&'a str],
        finish_distance: u32,
    },

    TurnStarted { turn: u32 },

    PowerUpActivated {
        turn: u32,
        name: &'a str,
        power_up: Option<&'a str>,
    },

    /// A competitor moved. `boosted` is the power-up state after the move.
    Advanced {
        turn: u32,
        name: &'a str,
        distance: u32,
        position: u32,
        boosted: bool,
    },

    TurnFinished { turn: u32 },

    Finished { result: &'a RaceResult },
}

/// Receives race events as they happen.
pub trait RaceObserver {
    fn on_event(&mut self, event: &RaceEvent<'_>);
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl RaceObserver for NullObserver {
    fn on_event(&mut self, _event: &RaceEvent<'_>) {}
}

impl<F> RaceObserver for F
where
    F: FnMut(&RaceEvent<'_>),
{
    fn on_event(&mut self, event: &RaceEvent<'_>) {
        self(event)
    }
}
