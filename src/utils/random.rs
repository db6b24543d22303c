//! # Random Module
//!
//! The random-number capability injected into placement walks and teleports.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
///
/// The only operation the game needs is "pick an integer in `[0, bound)`";
/// keeping that behind a trait makes every randomized walk reproducible
/// under test with a scripted sequence.
pub trait RandomSource {
    /// Picks an index in `[0, bound)`. `bound` must be greater than zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// A `RandomSource` backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl RngSource<ThreadRng> {
    /// A source backed by the thread-local generator.
    pub fn from_entropy() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl RngSource<StdRng> {
    /// A deterministic source seeded for reproducible games.
    ///
    /// # Examples
    ///
    /// ```
    /// use hideseek::{RandomSource, RngSource};
    ///
    /// let mut a = RngSource::seeded(7);
    /// let mut b = RngSource::seeded(7);
    /// assert_eq!(a.next_index(10), b.next_index(10));
    /// ```
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// A `RandomSource` that replays a fixed sequence of indices.
///
/// Values are taken modulo the requested bound and the sequence wraps
/// around when exhausted, so a short script can drive an arbitrarily long
/// walk.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<usize>,
    next: usize,
}

impl SequenceSource {
    /// Creates a source replaying `values` in order.
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, next: 0 }
    }

    /// How many values have been consumed so far.
    pub fn draws(&self) -> usize {
        self.next
    }
}

impl RandomSource for SequenceSource {
    fn next_index(&mut self, bound: usize) -> usize {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value % bound
    }
}
