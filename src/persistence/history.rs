//! History records: one line per completed race.
//!
//! Line format: the N racer names in finishing order, then the N
//! placements (`1..N`), all comma separated:
//!
//! ```text
//! Odie,Garfield,Jon,1,2,3
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::race::RaceResult;
use crate::roster::Roster;

/// Why a history line could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryParseError {
    #[error("empty history line")]
    Empty,

    #[error("expected names followed by the same number of placements, got {0} fields")]
    OddFieldCount(usize),

    #[error("invalid placement: {0:?}")]
    InvalidPlacement(String),

    #[error("racer {0:?} appears more than once")]
    DuplicateName(String),
}

/// One finished race, as stored on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    entries: Vec<(String, u32)>,
}

impl HistoryRecord {
    /// Build a record from (name, placement) pairs.
    pub fn new(entries: impl IntoIterator<Item = (String, u32)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Capture a race result: names in rank order, placements `1..N`.
    #[must_use]
    pub fn from_result(result: &RaceResult) -> Self {
        Self::new(
            result
                .standings
                .iter()
                .map(|s| (s.name.clone(), s.placement)),
        )
    }

    /// (name, placement) pairs in stored order.
    #[must_use]
    pub fn entries(&self) -> &[(String, u32)] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record every placement on the matching roster racer.
    ///
    /// Names not in the roster are skipped. Returns how many racers
    /// were updated.
    pub fn apply_to(&self, roster: &mut Roster) -> usize {
        let mut applied = 0;
        for (name, placement) in &self.entries {
            match roster.by_name_mut(name) {
                Some(racer) => {
                    racer.record_result(*placement);
                    applied += 1;
                }
                None => debug!(racer = %name, "history names an unknown racer"),
            }
        }
        applied
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.entries.iter().map(|(name, _)| name.clone());
        let placements = self.entries.iter().map(|(_, p)| p.to_string());
        let fields: Vec<String> = names.chain(placements).collect();
        write!(f, "{}", fields.join(","))
    }
}

impl FromStr for HistoryRecord {
    type Err = HistoryParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(HistoryParseError::Empty);
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() % 2 != 0 {
            return Err(HistoryParseError::OddFieldCount(fields.len()));
        }

        let (names, placements) = fields.split_at(fields.len() / 2);
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(HistoryParseError::DuplicateName(name.to_string()));
            }
        }
        let entries = names
            .iter()
            .zip(placements)
            .map(|(name, raw)| match raw.parse::<u32>() {
                Ok(placement) if placement >= 1 && !name.is_empty() => {
                    Ok((name.to_string(), placement))
                }
                _ => Err(HistoryParseError::InvalidPlacement(raw.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }
}
