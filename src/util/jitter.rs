//! Travel-time sampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies a concrete travel time for each admitted request.
pub trait TravelJitter: Send {
    /// A travel time in milliseconds, uniform in `[min_ms, max_ms)`.
    /// An empty range yields `min_ms`.
    fn sample_ms(&mut self, min_ms: u64, max_ms: u64) -> u64;
}

/// Uniform sampler over a seeded PRNG, for reproducible runs.
pub struct UniformJitter {
    rng: StdRng,
}

impl UniformJitter {
    /// Create a sampler from an externally supplied seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TravelJitter for UniformJitter {
    fn sample_ms(&mut self, min_ms: u64, max_ms: u64) -> u64 {
        if max_ms <= min_ms {
            min_ms
        } else {
            self.rng.random_range(min_ms..max_ms)
        }
    }
}

/// Degenerate sampler that always returns the range minimum.
///
/// Used for deterministic replays and tests where timing must be exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedJitter;

impl TravelJitter for FixedJitter {
    fn sample_ms(&mut self, min_ms: u64, _max_ms: u64) -> u64 {
        min_ms
    }
}
