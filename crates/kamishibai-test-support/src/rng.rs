//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use kamishibai_core::rng::DeterministicRng;

/// A no-op RNG that always returns `0.0`, so every random jump lands on the
/// lower bound of its range.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that need specific, repeatable
/// jump targets.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values, each in `[0.0, 1.0)`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }
}

impl DeterministicRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}
