//! Career statistics for a roster.
//!
//! ## Leaders
//!
//! Each leader is the first racer, in roster order, whose value is
//! strictly greater than every earlier one, starting from zero. A leader
//! is `None` when no racer has a value above zero, so an untouched roster
//! has no leaders at all. Win percentage only considers racers that have
//! raced.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::racer::{Competitor, Racer};
use crate::roster::Roster;

/// Career numbers for one racer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RacerSummary {
    pub name: String,
    pub races_played: u32,
    pub wins: u32,
    pub average_placement: f64,
    pub win_percentage: f64,
}

impl RacerSummary {
    #[must_use]
    pub fn from_racer(racer: &Racer) -> Self {
        let career = racer.career();
        Self {
            name: racer.name().to_string(),
            races_played: career.races_played,
            wins: career.wins,
            average_placement: career.average_placement(),
            win_percentage: career.win_percentage(),
        }
    }
}

/// Indices into `StatsReport::racers` of the aggregate leaders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaders {
    pub most_wins: Option<usize>,
    pub best_win_percentage: Option<usize>,
    pub most_races: Option<usize>,
}

impl Leaders {
    #[must_use]
    pub fn from_summaries(racers: &[RacerSummary]) -> Self {
        let most_wins = first_strict_max(racers.iter().map(|r| f64::from(r.wins)));
        let best_win_percentage = first_strict_max(racers.iter().map(|r| {
            if r.races_played > 0 {
                r.win_percentage
            } else {
                0.0
            }
        }));
        let most_races = first_strict_max(racers.iter().map(|r| f64::from(r.races_played)));

        Self {
            most_wins,
            best_win_percentage,
            most_races,
        }
    }
}

fn first_strict_max(values: impl Iterator<Item = f64>) -> Option<usize> {
    let mut best = 0.0;
    let mut leader = None;
    for (idx, value) in values.enumerate() {
        if value > best {
            best = value;
            leader = Some(idx);
        }
    }
    leader
}

/// Per-racer summaries in roster order plus the leaders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub racers: Vec<RacerSummary>,
    pub leaders: Leaders,
}

impl StatsReport {
    #[must_use]
    pub fn from_roster(roster: &Roster) -> Self {
        let racers: Vec<RacerSummary> = roster.iter().map(RacerSummary::from_racer).collect();
        let leaders = Leaders::from_summaries(&racers);
        Self { racers, leaders }
    }

    #[must_use]
    pub fn most_wins(&self) -> Option<&RacerSummary> {
        self.leaders.most_wins.map(|idx| &self.racers[idx])
    }

    #[must_use]
    pub fn best_win_percentage(&self) -> Option<&RacerSummary> {
        self.leaders.best_win_percentage.map(|idx| &self.racers[idx])
    }

    #[must_use]
    pub fn most_races(&self) -> Option<&RacerSummary> {
        self.leaders.most_races.map(|idx| &self.racers[idx])
    }

    /// Total races recorded across all racers' careers.
    #[must_use]
    pub fn total_entries(&self) -> u32 {
        self.racers.iter().map(|r| r.races_played).sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12} {:>6} {:>5} {:>9} {:>7}",
            "Racer", "Races", "Wins", "Avg place", "Win %"
        )?;
        for racer in &self.racers {
            writeln!(
                f,
                "{:<12} {:>6} {:>5} {:>9.2} {:>6.2}%",
                racer.name,
                racer.races_played,
                racer.wins,
                racer.average_placement,
                racer.win_percentage
            )?;
        }

        writeln!(f)?;
        match self.most_wins() {
            Some(r) => writeln!(f, "Most wins: {} ({})", r.name, r.wins)?,
            None => writeln!(f, "Most wins: -")?,
        }
        match self.best_win_percentage() {
            Some(r) => writeln!(f, "Best win rate: {} ({:.2}%)", r.name, r.win_percentage)?,
            None => writeln!(f, "Best win rate: -")?,
        }
        match self.most_races() {
            Some(r) => write!(f, "Most races: {} ({})", r.name, r.races_played),
            None => write!(f, "Most races: -"),
        }
    }
}
