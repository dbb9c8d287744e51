//! Tournament runner: a fixed field raced over several rounds.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use crate::core::{RaceError, RandomSource};
use crate::persistence::HistoryRecord;
use crate::race::{RaceEngine, RaceObserver, RaceResult};
use crate::racer::Competitor;
use crate::roster::Roster;

/// Rounds played when none are configured.
pub const DEFAULT_ROUNDS: u32 = 4;

/// Progress notifications between rounds.
#[derive(Clone, Copy, Debug)]
pub enum RoundEvent<'a> {
    Starting { round: u32, of: u32 },
    Finished { round: u32, result: &'a RaceResult },
}

/// Podium medal for the top three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a 1-based podium rank.
    #[must_use]
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        };
        f.write_str(label)
    }
}

/// One entrant's placements across the tournament.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentEntry {
    /// Roster index.
    pub entrant: usize,
    pub name: String,
    /// Placement per round, in round order.
    pub placements: SmallVec<[u32; 4]>,
}

impl TournamentEntry {
    /// Sum of placements divided by rounds played.
    #[must_use]
    pub fn average_placement(&self) -> f64 {
        if self.placements.is_empty() {
            0.0
        } else {
            let sum: u32 = self.placements.iter().sum();
            sum as f64 / self.placements.len() as f64
        }
    }

    #[must_use]
    pub fn wins(&self) -> usize {
        self.placements.iter().filter(|&&p| p == 1).count()
    }
}

/// Outcome of a full tournament.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentResult {
    /// Entrants in the order they were entered.
    pub entries: Vec<TournamentEntry>,
    /// Every round's race result, in round order.
    pub races: Vec<RaceResult>,
}

impl TournamentResult {
    /// Entrants sorted by average placement, best first.
    ///
    /// The sort is stable, so equal averages keep entry order.
    #[must_use]
    pub fn podium(&self) -> Vec<&TournamentEntry> {
        let mut order: Vec<&TournamentEntry> = self.entries.iter().collect();
        order.sort_by(|a, b| a.average_placement().total_cmp(&b.average_placement()));
        order
    }

    /// One history record per round.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.races.iter().map(HistoryRecord::from_result).collect()
    }

    #[must_use]
    pub fn rounds(&self) -> usize {
        self.races.len()
    }
}

/// Runs the same entrants through a fixed number of races.
///
/// Each round is an ordinary roster race, so career stats are recorded
/// after every round.
#[derive(Clone, Copy, Debug)]
pub struct TournamentRunner {
    rounds: u32,
}

impl Default for TournamentRunner {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl TournamentRunner {
    /// Create a runner. At least one round is always played.
    #[must_use]
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds: rounds.max(1),
        }
    }

    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Run every round without progress callbacks.
    pub fn run<R, O>(
        &self,
        roster: &mut Roster,
        entrants: &[usize],
        engine: &mut RaceEngine<R, O>,
    ) -> Result<TournamentResult, RaceError>
    where
        R: RandomSource,
        O: RaceObserver,
    {
        self.run_with(roster, entrants, engine, |_| {})
    }

    /// Run every round, reporting progress to `on_round`.
    pub fn run_with<R, O, F>(
        &self,
        roster: &mut Roster,
        entrants: &[usize],
        engine: &mut RaceEngine<R, O>,
        mut on_round: F,
    ) -> Result<TournamentResult, RaceError>
    where
        R: RandomSource,
        O: RaceObserver,
        F: FnMut(RoundEvent<'_>),
    {
        // Validates indices and duplicates before any round is played
        drop(roster.lineup(entrants)?);

        let mut entries: Vec<TournamentEntry> = entrants
            .iter()
            .map(|&idx| TournamentEntry {
                entrant: idx,
                name: roster
                    .get(idx)
                    .map(|r| r.name().to_string())
                    .unwrap_or_default(),
                placements: SmallVec::new(),
            })
            .collect();
        let mut races = Vec::with_capacity(self.rounds as usize);

        for round in 1..=self.rounds {
            on_round(RoundEvent::Starting {
                round,
                of: self.rounds,
            });

            let result = roster.run_race(entrants, engine)?;
            for standing in &result.standings {
                entries[standing.entrant].placements.push(standing.placement);
            }
            info!(
                round,
                of = self.rounds,
                winner = result.winner().map(|s| s.name.as_str()).unwrap_or_default(),
                "round finished"
            );

            on_round(RoundEvent::Finished {
                round,
                result: &result,
            });
            races.push(result);
        }

        Ok(TournamentResult { entries, races })
    }
}
