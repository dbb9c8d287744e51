//! Capability set the race engine drives.
//!
//! The engine never touches a concrete `Racer`; anything that can move,
//! trigger a power-up and report its position can take part in a race.

use crate::core::RandomSource;

/// A participant the engine can move turn by turn.
pub trait Competitor {
    /// Display name, unique within a race.
    fn name(&self) -> &str;

    /// Distance covered in the current race.
    fn position(&self) -> u32;

    /// Move once for this turn and return the distance covered.
    ///
    /// Position must never decrease.
    fn advance(&mut self, rng: &mut dyn RandomSource) -> u32;

    /// Trigger the power-up. No-op while one is already active.
    fn activate_power_up(&mut self);

    fn is_power_up_active(&self) -> bool;

    /// Name of the power-up, for commentary.
    fn power_up_name(&self) -> Option<&str> {
        None
    }

    /// Whether the competitor is at the start line with no active power-up.
    fn is_reset(&self) -> bool {
        self.position() == 0 && !self.is_power_up_active()
    }
}

impl<C: Competitor + ?Sized> Competitor for &mut C {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn position(&self) -> u32 {
        (**self).position()
    }

    fn advance(&mut self, rng: &mut dyn RandomSource) -> u32 {
        (**self).advance(rng)
    }

    fn activate_power_up(&mut self) {
        (**self).activate_power_up()
    }

    fn is_power_up_active(&self) -> bool {
        (**self).is_power_up_active()
    }

    fn power_up_name(&self) -> Option<&str> {
        (**self).power_up_name()
    }

    fn is_reset(&self) -> bool {
        (**self).is_reset()
    }
}

impl<C: Competitor + ?Sized> Competitor for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn position(&self) -> u32 {
        (**self).position()
    }

    fn advance(&mut self, rng: &mut dyn RandomSource) -> u32 {
        (**self).advance(rng)
    }

    fn activate_power_up(&mut self) {
        (**self).activate_power_up()
    }

    fn is_power_up_active(&self) -> bool {
        (**self).is_power_up_active()
    }

    fn power_up_name(&self) -> Option<&str> {
        (**self).power_up_name()
    }

    fn is_reset(&self) -> bool {
        (**self).is_reset()
    }
}
