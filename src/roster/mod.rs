//! The roster: every racer known to a session.
//!
//! Racers keep their load order. Names are unique; lookups by name go
//! through a hash index so history replay stays cheap.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::core::{RaceError, RaceRng, RandomSource};
use crate::race::{Race, RaceEngine, RaceObserver, RaceResult};
use crate::racer::{Competitor, PowerUp, Racer};

/// Racers shipped with the game, used when no roster file exists.
pub const DEFAULT_RACERS: &[(&str, u32, &str)] = &[
    ("Garfield", 45, "Lasagna Turbo"),
    ("Odie", 50, "Crazy Boost"),
    ("Nermal", 48, "Cute Power"),
    ("Arlene", 47, "Pink Speed"),
    ("Jon", 42, "Coffee Rush"),
];

/// Ordered collection of racers with unique names.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    racers: Vec<Racer>,
    index: FxHashMap<String, usize>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster, skipping racers whose name is already taken.
    pub fn from_racers(racers: impl IntoIterator<Item = Racer>) -> Self {
        let mut roster = Self::new();
        for racer in racers {
            if let Err(err) = roster.push(racer) {
                warn!(%err, "skipping racer");
            }
        }
        roster
    }

    /// The built-in five-racer roster.
    #[must_use]
    pub fn default_roster() -> Self {
        Self::from_racers(
            DEFAULT_RACERS
                .iter()
                .map(|&(name, speed, power_up)| Racer::new(name, speed, PowerUp::from_name(power_up))),
        )
    }

    /// Add a racer, returning its index.
    ///
    /// Names must be unique and must fit in a history line, so commas and
    /// line breaks are rejected.
    pub fn push(&mut self, racer: Racer) -> Result<usize, RaceError> {
        if racer.name().contains(&[',', '\n', '\r'][..]) {
            return Err(RaceError::InvalidName {
                name: racer.name().to_string(),
            });
        }
        if self.index.contains_key(racer.name()) {
            return Err(RaceError::DuplicateParticipant {
                name: racer.name().to_string(),
            });
        }
        let idx = self.racers.len();
        self.index.insert(racer.name().to_string(), idx);
        self.racers.push(racer);
        Ok(idx)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.racers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.racers.is_empty()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Racer> {
        self.racers.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Racer> {
        self.racers.get_mut(idx)
    }

    /// Index of the racer with exactly this name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Exact match first, then a case-insensitive one.
    #[must_use]
    pub fn find_ignore_case(&self, name: &str) -> Option<usize> {
        self.find(name).or_else(|| {
            self.racers
                .iter()
                .position(|r| r.name().eq_ignore_ascii_case(name))
        })
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Racer> {
        self.find(name).map(|idx| &self.racers[idx])
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Racer> {
        self.find(name).map(move |idx| &mut self.racers[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Racer> {
        self.racers.iter()
    }

    /// Indices ordered alphabetically by name, for selection menus.
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.racers.len()).collect();
        order.sort_by(|&a, &b| self.racers[a].name().cmp(self.racers[b].name()));
        order
    }

    /// Draw `count` distinct opponents for `player`, excluding the player.
    pub fn pick_opponents(
        &self,
        player: usize,
        count: usize,
        rng: &mut RaceRng,
    ) -> Result<Vec<usize>, RaceError> {
        if player >= self.racers.len() {
            return Err(RaceError::InvalidEntrant(player));
        }

        let available: Vec<usize> = (0..self.racers.len()).filter(|&i| i != player).collect();
        if available.len() < count {
            return Err(RaceError::NotEnoughRacers {
                needed: count + 1,
                available: self.racers.len(),
            });
        }

        Ok(rng.choose_distinct(&available, count))
    }

    /// Line up the given racers, in the given order, for one race.
    pub fn lineup(&mut self, entrants: &[usize]) -> Result<Race<'_>, RaceError> {
        for (pos, &idx) in entrants.iter().enumerate() {
            let racer = self.racers.get(idx).ok_or(RaceError::InvalidEntrant(idx))?;
            if entrants[..pos].contains(&idx) {
                return Err(RaceError::DuplicateParticipant {
                    name: racer.name().to_string(),
                });
            }
        }

        let mut slots: Vec<Option<&mut Racer>> = self.racers.iter_mut().map(Some).collect();
        let mut race = Race::new();
        for &idx in entrants {
            let racer = slots[idx].take().ok_or(RaceError::InvalidEntrant(idx))?;
            race.add_participant(racer)?;
        }

        Ok(race)
    }

    /// Run one race among the given racers and record the results.
    pub fn run_race<R, O>(
        &mut self,
        entrants: &[usize],
        engine: &mut RaceEngine<R, O>,
    ) -> Result<RaceResult, RaceError>
    where
        R: RandomSource,
        O: RaceObserver,
    {
        self.lineup(entrants)?.run(engine)
    }
}
