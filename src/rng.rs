//! Deterministic randomness for board generation.
//!
//! Boards must be reproducible from their seed on every platform, so this uses
//! Mulberry32 with explicit 32-bit wrapping arithmetic rather than a `rand` generator.

use rand::{Error as RandError, RngCore};

const MULBERRY_INCREMENT: u32 = 0x6d2b_79f5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Seeded pseudo-random generator using the Mulberry32 algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Build a generator from a stored seed. Only the low 32 bits are used.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(seed as u32)
    }

    fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in `[0, 1)`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        f64::from(self.next_raw()) / TWO_POW_32
    }

    /// Next integer in `min..max`.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        (self.next() * (max - min) as f64).floor() as i64 + min
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_raw());
        let high = u64::from(self.next_raw());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Fisher-Yates shuffle driven by [`SeededRandom`].
///
/// The input is left untouched; the same input and seed always produce the same order.
pub fn shuffle<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut result = items.to_vec();
    let mut rng = SeededRandom::from_seed(seed);

    for i in (1..result.len()).rev() {
        let j = rng.next_int(0, i as i64 + 1) as usize;
        result.swap(i, j);
    }

    result
}

/// A fresh seed taken from the wall clock, in epoch milliseconds.
pub fn generate_seed() -> u64 {
    chrono::Utc::now().timestamp_millis().unsigned_abs()
}
