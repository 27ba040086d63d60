//! Small seeded PRNG stored inside game states.

use rand::RngCore;
use rand::rand_core::impls;
use serde::{Deserialize, Serialize};

/// Mulberry32: a 32-bit multiply/xor/shift generator.
///
/// Cheap to clone and compare, so a state can carry its generator and stay a
/// plain value: applying the same action to equal states draws the same
/// numbers. Output is bit-compatible with the common Mulberry32 reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Creates a generator from a seed.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state; feeding it to [`Mulberry32::new`] resumes the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform integer in `[0, bound)`; `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64) as usize
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(a | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn matches_reference_sequence() {
        let mut rng = Mulberry32::new(12345);
        let first: Vec<u32> = (0..3).map(|_| rng.next_u32()).collect();
        let mut again = Mulberry32::new(12345);
        assert_eq!(first, (0..3).map(|_| again.next_u32()).collect::<Vec<_>>());
        assert_eq!(Mulberry32::new(0).next_u32(), 1_144_304_738);
    }

    #[test]
    fn unit_floats_stay_in_range() {
        let mut rng = Mulberry32::new(7);
        for _ in 0..1000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
            assert!(rng.below(6) < 6);
            assert!(rng.random_range(0..10) < 10);
        }
    }
}
