//! # DJB2 Hash
//!
//! Daniel J. Bernstein's string hash: start from 5381 and, for every symbol `c`,
//! compute `h = h * 33 + c`. The state is a `u64` and every step wraps on overflow.
//!
//! The Bloom filter in [`super::bloom`] derives its `k` probe positions from a
//! *parameterized* variant: the decimal form of the probe number is prepended to
//! the item before hashing, so `"0apple"`, `"1apple"`, ... all hash differently.
//!
//! **Note**: DJB2 is not cryptographically secure and is not seeded per instance;
//! two hashers always agree on the same input.

use std::hash::{BuildHasher, Hasher};

/// Initial state of every DJB2 hash.
pub const DJB2_SEED: u64 = 5381;

/// Multiplier applied before adding each symbol (`(h << 5) + h`).
const DJB2_MULTIPLIER: u64 = 33;

/// A `std::hash::Hasher` computing DJB2 over the bytes it is fed.
#[derive(Debug, Clone, Copy)]
pub struct Djb2Hasher {
    state: u64,
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self { state: DJB2_SEED }
    }
}

impl Djb2Hasher {
    /// Creates a hasher in the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one symbol value (a byte or a Unicode scalar value).
    #[inline]
    pub fn write_symbol(&mut self, symbol: u64) {
        self.state = self
            .state
            .wrapping_mul(DJB2_MULTIPLIER)
            .wrapping_add(symbol);
    }

    /// Feeds every `char` of `text` as its Unicode scalar value.
    pub fn write_chars(&mut self, text: &str) {
        for ch in text.chars() {
            self.write_symbol(ch as u64);
        }
    }
}

impl Hasher for Djb2Hasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_symbol(b as u64);
        }
    }
}

/// `BuildHasher` producing fresh [`Djb2Hasher`]s, usable with `HashMap`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Djb2BuildHasher;

impl BuildHasher for Djb2BuildHasher {
    type Hasher = Djb2Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Djb2Hasher::new()
    }
}

/// Returns the DJB2 hash of the characters of `text`.
pub fn djb2_hash(text: &str) -> u64 {
    let mut hasher = Djb2Hasher::new();
    hasher.write_chars(text);
    hasher.finish()
}

/// Returns the DJB2 hash of `parameter.to_string() + item`.
///
/// No intermediate string is allocated: the digits of `parameter` are fed
/// first, then the characters of `item`.
pub fn djb2_parameterized(item: &str, parameter: usize) -> u64 {
    let mut hasher = Djb2Hasher::new();
    hasher.write_chars(&parameter.to_string());
    hasher.write_chars(item);
    hasher.finish()
}
