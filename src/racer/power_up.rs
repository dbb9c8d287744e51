//! Power-up definitions and the name-based catalogue used at roster load.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, temporary speed bonus.
///
/// Immutable once built. Only `bonus` and `duration` matter to the
/// simulation; the name is for display.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerUp {
    name: String,
    bonus: u32,
    duration: u32,
}

/// Substring rules checked in order; the first match wins.
const CATALOGUE: &[(&[&str], u32, u32)] = &[
    (&["turbo", "nitro"], 30, 1),
    (&["boost"], 25, 2),
    (&["cafe", "coffee"], 20, 3),
];

const FALLBACK_BONUS: u32 = 20;
const FALLBACK_DURATION: u32 = 2;

impl PowerUp {
    /// Create a power-up. A duration of zero is raised to one turn.
    pub fn new(name: impl Into<String>, bonus: u32, duration: u32) -> Self {
        Self {
            name: name.into(),
            bonus,
            duration: duration.max(1),
        }
    }

    /// Derive bonus and duration from a free-text power-up name.
    ///
    /// Matching is case-insensitive:
    /// - "turbo" / "nitro": +30 for 1 turn
    /// - "boost": +25 for 2 turns
    /// - "cafe" / "coffee": +20 for 3 turns
    /// - anything else: +20 for 2 turns
    ///
    /// ```
    /// use kart_race::racer::PowerUp;
    ///
    /// let p = PowerUp::from_name("Lasagna Turbo");
    /// assert_eq!((p.bonus(), p.duration()), (30, 1));
    /// ```
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let lowered = name.to_lowercase();

        let (bonus, duration) = CATALOGUE
            .iter()
            .find(|(keywords, _, _)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|&(_, bonus, duration)| (bonus, duration))
            .unwrap_or((FALLBACK_BONUS, FALLBACK_DURATION));

        Self::new(name, bonus, duration)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Speed added on every turn the power-up is active.
    #[must_use]
    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    /// Number of turns the bonus applies once activated.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }
}

impl fmt::Display for PowerUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (+{} speed for {} turns)",
            self.name, self.bonus, self.duration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(name: &str) -> (u32, u32) {
        let p = PowerUp::from_name(name);
        (p.bonus(), p.duration())
    }

    #[test]
    fn test_catalogue_rules() {
        assert_eq!(stats("Lasagna Turbo"), (30, 1));
        assert_eq!(stats("NITRO"), (30, 1));
        assert_eq!(stats("Crazy Boost"), (25, 2));
        assert_eq!(stats("Coffee Rush"), (20, 3));
        assert_eq!(stats("cafe con leche"), (20, 3));
        assert_eq!(stats("Cute Power"), (20, 2));
        assert_eq!(stats(""), (20, 2));
    }

    #[test]
    fn test_first_rule_wins() {
        // Contains both "turbo" and "boost": turbo is checked first
        assert_eq!(stats("Turbo Boost"), (30, 1));
        // "boost" beats "coffee"
        assert_eq!(stats("Coffee Boost"), (25, 2));
    }

    #[test]
    fn test_name_is_preserved() {
        let p = PowerUp::from_name("Pink Speed");
        assert_eq!(p.name(), "Pink Speed");
    }

    #[test]
    fn test_zero_duration_raised() {
        let p = PowerUp::new("Blip", 10, 0);
        assert_eq!(p.duration(), 1);
    }

    #[test]
    fn test_display() {
        let p = PowerUp::new("Crazy Boost", 25, 2);
        assert_eq!(p.to_string(), "Crazy Boost (+25 speed for 2 turns)");
    }
}
