//! Injectable random sources for rolls and random palette colors

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform random values in `[0, 1)`
///
/// Every operation that needs randomness takes one of these explicitly so
/// callers control reproducibility.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`, or `None` when `len` is zero
    fn next_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.next_f64() * len as f64) as usize;
        Some(index.min(len - 1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seeded pseudo-random source for reproducible sessions
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    /// Create a deterministic source from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed sequence of values, cycling when exhausted
///
/// Values are clamped into `[0, 1)` so a script cannot push a roll past
/// the end of a table.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Create a source replaying `values` in order
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Create a source that always yields the same value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        let value = self
            .values
            .get(self.cursor % self.values.len().max(1))
            .copied()
            .unwrap_or(0.0);
        self.cursor = self.cursor.wrapping_add(1);
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
