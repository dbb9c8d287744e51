//! Final ranking of a race.
//!
//! Ranking works on an immutable snapshot of `(entrant, name, position)`,
//! sorted by position descending and entry order ascending. The sort is
//! stable, so equal positions keep their entry order.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::racer::Competitor;

/// How the turn loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceOutcome {
    /// Someone reached the finish distance.
    Finished,
    /// The turn cap was hit before anyone finished.
    TurnLimit,
}

/// One racer's final placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based rank.
    pub placement: u32,
    /// Index in the participant list the race was run with.
    pub entrant: usize,
    pub name: String,
    /// Final distance covered.
    pub position: u32,
}

/// Participants in rank order plus how the race went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub standings: Vec<Standing>,
    /// Number of turns played.
    pub turns: u32,
    pub outcome: RaceOutcome,
}

impl RaceResult {
    #[must_use]
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Placement of the participant at `entrant` in the entry order.
    #[must_use]
    pub fn placement_of(&self, entrant: usize) -> Option<u32> {
        self.standings
            .iter()
            .find(|s| s.entrant == entrant)
            .map(|s| s.placement)
    }

    /// Names in rank order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.standings.iter().map(|s| s.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.standings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome == RaceOutcome::Finished
    }
}

/// Entry indices in rank order for the given final positions.
///
/// ```
/// use kart_race::race::rank_positions;
///
/// assert_eq!(rank_positions(&[120, 310, 120, 305]), vec![1, 3, 0, 2]);
/// ```
#[must_use]
pub fn rank_positions(positions: &[u32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by_key(|&i| (Reverse(positions[i]), i));
    order
}

/// Rank participants by their current position.
pub fn rank<C: Competitor>(participants: &[C]) -> Vec<Standing> {
    let positions: Vec<u32> = participants.iter().map(Competitor::position).collect();

    rank_positions(&positions)
        .into_iter()
        .enumerate()
        .map(|(i, entrant)| Standing {
            placement: i as u32 + 1,
            entrant,
            name: participants[entrant].name().to_string(),
            position: positions[entrant],
        })
        .collect()
}
