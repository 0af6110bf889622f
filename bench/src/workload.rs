//!
//! Random keys and values, bounded by maximum sizes.
//!
//! Lengths are uniform over `[0, max)` and the content comes from a
//! cryptographically secure generator, so bytes carry no meaning and keys
//! do not cluster.
//!

use batchbench_core::{RawKey, RawValue};
use rand::{rngs::ThreadRng, CryptoRng, Rng, RngCore};

pub const MAX_KEY_SIZE: usize = 100;
pub const MAX_VALUE_SIZE: usize = 20000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub key: RawKey,
    pub value: RawValue,
}

pub struct WorkloadGenerator<R = ThreadRng> {
    rng: R,
    max_key: usize,
    max_value: usize,
}

impl WorkloadGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for WorkloadGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> WorkloadGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            max_key: MAX_KEY_SIZE,
            max_value: MAX_VALUE_SIZE,
        }
    }

    /// Replaces the exclusive length bounds of keys and values.
    ///
    /// # Panics
    ///
    /// Both bounds must be positive.
    pub fn with_bounds(mut self, max_key: usize, max_value: usize) -> Self {
        assert!(0 < max_key && 0 < max_value, "length bounds must be positive");
        self.max_key = max_key;
        self.max_value = max_value;
        self
    }

    /// # Panics
    ///
    /// `max_exclusive` must be positive.
    pub fn random_bytes(&mut self, max_exclusive: usize) -> Vec<u8> {
        assert!(0 < max_exclusive, "length bound must be positive");
        let len = self.rng.gen_range(0..max_exclusive);
        let mut buf = vec![0; len];
        self.rng.fill_bytes(&mut buf);
        buf
    }

    #[inline(always)]
    pub fn random_key(&mut self) -> RawKey {
        self.random_bytes(self.max_key)
    }

    #[inline(always)]
    pub fn random_value(&mut self) -> RawValue {
        self.random_bytes(self.max_value)
    }

    pub fn entry(&mut self) -> Entry {
        let key = self.random_key();
        let value = self.random_value();
        Entry { key, value }
    }
}
