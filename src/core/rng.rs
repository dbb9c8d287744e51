//! Random number sources for the race engine.
//!
//! ## Key Features
//!
//! - **Pluggable**: the engine draws through the `RandomSource` trait, so tests
//!   can inject scripted values instead of a real generator
//! - **Deterministic**: `RaceRng` with the same seed produces identical races
//! - **Forkable**: opponent draws and each race get their own branch, so
//!   one stream never shifts another
//! - **Resumable**: `RaceRngState` captures the exact stream position
//!
//! ## Usage
//!
//! ```
//! use kart_race::core::{RaceRng, RandomSource};
//!
//! let mut rng = RaceRng::new(42);
//! let offset = rng.offset(-30, 30);
//! assert!((-30..=30).contains(&offset));
//!
//! // Same seed, same draws
//! let mut again = RaceRng::new(42);
//! assert_eq!(again.offset(-30, 30), offset);
//! ```

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of the two kinds of randomness a race consumes.
///
/// Implementations must be uniform for `offset` and honour the
/// probability passed to `chance`.
pub trait RandomSource {
    /// Draw an integer uniformly from the closed range `[low, high]`.
    fn offset(&mut self, low: i32, high: i32) -> i32;

    /// Run one trial that succeeds with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn offset(&mut self, low: i32, high: i32) -> i32 {
        (**self).offset(low, high)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }
}

/// Seeded RNG used for real races.
///
/// Uses ChaCha8 for speed while keeping the sequence reproducible.
#[derive(Clone, Debug)]
pub struct RaceRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl RaceRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Branch off a child stream.
    ///
    /// The n-th fork of a given seed always yields the same child.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Pick `amount` distinct elements without replacement.
    ///
    /// Returns fewer than `amount` when the slice is shorter.
    pub fn choose_distinct<T: Clone>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        slice
            .choose_multiple(&mut self.inner, amount)
            .cloned()
            .collect()
    }

    /// Snapshot of the seed and stream position.
    #[must_use]
    pub fn state(&self) -> RaceRngState {
        RaceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume exactly where `state` was taken.
    #[must_use]
    pub fn from_state(state: &RaceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl RandomSource for RaceRng {
    fn offset(&mut self, low: i32, high: i32) -> i32 {
        if low >= high {
            return low;
        }
        self.inner.gen_range(low..=high)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Saved position of a `RaceRng`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
    /// Forks taken so far
    pub fork_counter: u64,
}

/// Source that always returns the same offset and the same activation decision.
///
/// Offsets are still clamped into the requested range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedRandom {
    pub offset: i32,
    pub activate: bool,
}

impl FixedRandom {
    /// Zero offset, power-ups never activate.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            offset: 0,
            activate: false,
        }
    }

    #[must_use]
    pub const fn new(offset: i32, activate: bool) -> Self {
        Self { offset, activate }
    }
}

impl RandomSource for FixedRandom {
    fn offset(&mut self, low: i32, high: i32) -> i32 {
        self.offset.clamp(low, high.max(low))
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.activate
    }
}

/// Source that replays queued values, then falls back to fixed ones.
///
/// Useful for walking a race through an exact sequence of turns.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    offsets: VecDeque<i32>,
    activations: VecDeque<bool>,
    fallback: FixedRandom,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue offsets, consumed in order by `offset`.
    #[must_use]
    pub fn with_offsets(mut self, offsets: impl IntoIterator<Item = i32>) -> Self {
        self.offsets.extend(offsets);
        self
    }

    /// Queue activation decisions, consumed in order by `chance`.
    #[must_use]
    pub fn with_activations(mut self, activations: impl IntoIterator<Item = bool>) -> Self {
        self.activations.extend(activations);
        self
    }

    /// Values returned once the queues are drained.
    #[must_use]
    pub fn with_fallback(mut self, fallback: FixedRandom) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of activation trials not yet consumed.
    #[must_use]
    pub fn pending_activations(&self) -> usize {
        self.activations.len()
    }

    /// Number of offsets not yet consumed.
    #[must_use]
    pub fn pending_offsets(&self) -> usize {
        self.offsets.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn offset(&mut self, low: i32, high: i32) -> i32 {
        match self.offsets.pop_front() {
            Some(value) => value.clamp(low, high.max(low)),
            None => self.fallback.offset(low, high),
        }
    }

    fn chance(&mut self, probability: f64) -> bool {
        match self.activations.pop_front() {
            Some(value) => value,
            None => self.fallback.chance(probability),
        }
    }
}
