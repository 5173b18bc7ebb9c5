//! Hash functions and hash-based structures.
//!
//! - [`djb2`]: Bernstein's multiplicative string hash, plain and parameterized
//! - [`bloom`]: Bloom filter probing with the parameterized DJB2 hash

pub mod bloom;
pub mod djb2;

pub use bloom::{BloomFilter, BloomFilterBuilder, DEFAULT_FALSE_POSITIVE_PROBABILITY};
pub use djb2::{djb2_hash, djb2_parameterized, Djb2BuildHasher, Djb2Hasher};
