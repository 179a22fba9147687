/*!
 * Injectable random sources.
 *
 * Production code draws from the thread-local generator; a seeded source
 * gives reproducible runs, and tests can script the draws directly.
 */

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the two kinds of draws the lexical strategy needs
pub trait RandomSource: Send + Sync {
    /// Uniform value in `[0, 1)`
    fn next_unit(&self) -> f64;

    /// Uniform index in `0..len`; `len` is never zero
    fn choose_index(&self, len: usize) -> usize;
}

/// Thread-local generator, seeded from the OS
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }

    fn choose_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Deterministic generator shared behind a lock
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        self.rng.lock().random::<f64>()
    }

    fn choose_index(&self, len: usize) -> usize {
        self.rng.lock().random_range(0..len)
    }
}
