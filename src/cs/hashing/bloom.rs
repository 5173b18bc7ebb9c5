//! # Bloom Filter
//!
//! A fixed-size bit vector with `k` hash probes per item. Membership queries
//! never produce false negatives; false positives occur at a rate close to the
//! configured probability once the filter holds the number of items it was
//! sized for.
//!
//! Sizing follows the usual optimum for `n` expected items and a target
//! false-positive probability `p`:
//!
//! - `m = floor(-n * ln(p) / ln(2)^2)` bits
//! - `k = round(m / n * ln(2))` hash functions
//!
//! Probe `i` of an item lands on `djb2(i.to_string() + item) mod m`
//! (see [`super::djb2::djb2_parameterized`]).
//!
//! The filter only ever sets bits: there is no removal and no reset.
//! `add` takes `&mut self`, so sharing one filter between threads needs a lock.
//!
//! ## Example
//! ```rust
//! use classic_codecs::cs::hashing::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1000).unwrap();
//! filter.add("apple");
//! assert!(filter.might_contain("apple"));
//! ```

use crate::cs::error::{Error, Result};
use crate::cs::hashing::djb2::djb2_parameterized;
use bitvec::prelude::*;
use std::f64::consts::LN_2;

/// Target false-positive probability used by [`BloomFilter::new`].
pub const DEFAULT_FALSE_POSITIVE_PROBABILITY: f64 = 0.01;

/// Builder for a [`BloomFilter`] with a non-default false-positive target.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    expected_num_elements: usize,
    false_positive_probability: f64,
}

impl Default for BloomFilterBuilder {
    fn default() -> Self {
        Self {
            expected_num_elements: 0,
            false_positive_probability: DEFAULT_FALSE_POSITIVE_PROBABILITY,
        }
    }
}

impl BloomFilterBuilder {
    /// Creates a builder with `p = 0.01` and no expected element count yet.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the number of items the filter is sized for.
    pub fn expected_num_elements(mut self, n: usize) -> Self {
        self.expected_num_elements = n;
        self
    }

    /// Sets the target false-positive probability, strictly between 0 and 1.
    pub fn false_positive_probability(mut self, p: f64) -> Self {
        self.false_positive_probability = p;
        self
    }

    /// Validates the parameters and allocates the zeroed bit vector.
    pub fn build(self) -> Result<BloomFilter> {
        let n = self.expected_num_elements;
        let p = self.false_positive_probability;

        if n == 0 {
            return Err(Error::InvalidParameter(
                "expected number of elements must be positive".to_string(),
            ));
        }
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "false positive probability must be in (0, 1), got {}",
                p
            )));
        }

        let len = optimal_filter_length(n, p);
        let num_hashes = optimal_num_hashes(len, n);
        if len == 0 || num_hashes == 0 {
            return Err(Error::InvalidParameter(format!(
                "parameters n={} p={} yield an unusable filter (m={}, k={})",
                n, p, len, num_hashes
            )));
        }

        log::debug!(
            "bloom filter sized for n={} p={}: m={} bits, k={} hashes",
            n,
            p,
            len,
            num_hashes
        );

        Ok(BloomFilter {
            bits: bitvec![u8, Msb0; 0; len],
            num_hashes,
            items_added: 0,
        })
    }
}

/// Optimal bit count `floor(-n * ln(p) / ln(2)^2)`.
pub fn optimal_filter_length(expected_num_elements: usize, p: f64) -> usize {
    (-(expected_num_elements as f64) * p.ln() / (LN_2 * LN_2)).floor() as usize
}

/// Optimal hash count `round(m / n * ln(2))`.
pub fn optimal_num_hashes(filter_len: usize, expected_num_elements: usize) -> usize {
    ((filter_len as f64 / expected_num_elements as f64) * LN_2).round() as usize
}

/// Probabilistic set of strings backed by a bit vector.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    bits: BitVec<u8, Msb0>,
    num_hashes: usize,
    items_added: usize,
}

impl BloomFilter {
    /// Creates a filter sized for `expected_num_elements` items at `p = 0.01`.
    ///
    /// Returns `Error::InvalidParameter` when `expected_num_elements` is zero.
    pub fn new(expected_num_elements: usize) -> Result<Self> {
        BloomFilterBuilder::new()
            .expected_num_elements(expected_num_elements)
            .build()
    }

    /// Returns a builder for custom false-positive targets.
    pub fn builder() -> BloomFilterBuilder {
        BloomFilterBuilder::new()
    }

    /// Number of bits in the filter (`m`).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false: a constructed filter has at least one bit.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of hash probes per item (`k`).
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Number of bits currently set.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of `add` calls so far, duplicates included.
    pub fn items_added(&self) -> usize {
        self.items_added
    }

    #[inline]
    fn probe(&self, item: &str, parameter: usize) -> usize {
        (djb2_parameterized(item, parameter) % self.bits.len() as u64) as usize
    }

    /// Records `item`. Adding the same item twice leaves the bits unchanged.
    pub fn add(&mut self, item: &str) {
        for i in 0..self.num_hashes {
            let idx = self.probe(item, i);
            self.bits.set(idx, true);
        }
        self.items_added += 1;
    }

    /// Returns `false` if `item` was definitely never added, `true` if it
    /// possibly was.
    pub fn might_contain(&self, item: &str) -> bool {
        (0..self.num_hashes).all(|i| self.bits[self.probe(item, i)])
    }

    /// Negation of [`might_contain`](Self::might_contain): `true` means the
    /// item is certainly absent.
    pub fn check_is_not_in_filter(&self, item: &str) -> bool {
        !self.might_contain(item)
    }

    /// Expected false-positive rate after the recorded number of insertions,
    /// `(1 - e^(-k * x / m))^k`.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let k = self.num_hashes as f64;
        let m = self.bits.len() as f64;
        let x = self.items_added as f64;
        (1.0 - (-k * x / m).exp()).powf(k)
    }
}
