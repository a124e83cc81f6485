//! A seeded RNG handle, threaded explicitly through every random draw.
//!
//! The core never reads from a process-wide RNG: a fixed seed and a fixed solver must make every
//! selector bitwise deterministic, which requires every call site to share the same handle.

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng as _, SeedableRng};

/// Seeded pseudorandom source shared by a selector invocation.
#[derive(Debug, Clone)]
pub struct Rng(StdRng);

impl Rng {
    /// Build a handle seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Draw a uniform `f64` in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    /// Draw `true` with probability `p` (clamped to `[0, 1]`).
    pub fn coin(&mut self, p: f64) -> bool {
        self.uniform() < p.clamp(0.0, 1.0)
    }

    /// Sample `k` distinct indices in `0..n` uniformly at random, without replacement.
    pub fn choose(&mut self, n: usize, k: usize) -> Vec<usize> {
        sample(&mut self.0, n, k.min(n)).into_vec()
    }

    /// Draw a uniform index in `0..n`.
    pub fn index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }
}
