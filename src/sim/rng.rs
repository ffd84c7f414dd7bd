//! Random draws
//!
//! Every random decision in the simulation (conditions, rosters, per-step
//! speed) goes through a caller-supplied [`Rng`]. The game owns a seeded
//! [`RaceRng`] so that one seed replays a whole tournament.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform integer in `[min, max]`. Requires `min <= max`.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    debug_assert!(min <= max, "random_int: min {min} > max {max}");
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Uniform float in `[0, 1)`
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}

/// Shuffled copy of `items` (backward Fisher-Yates). The input is untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Seeded generator plus the seed it was built from
#[derive(Debug, Clone)]
pub struct RaceRng {
    seed: u64,
    inner: Pcg32,
}

impl RaceRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed drawn from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for RaceRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner.fill_bytes(dst)
    }
}
