//! Error correction code implementations.
//!
//! Error correction codes add redundancy to data so that a receiver can detect and
//! repair transmission or storage errors without asking for a resend.
//!
//! Currently implemented:
//! - Hamming codes (single-bit correction per chunk)
//!
//! # Examples
//!
//! ```rust
//! use classic_codecs::cs::ecc::HammingCoder;
//!
//! let coder = HammingCoder::new(4).unwrap();
//! let chunks = coder.encode("parity");
//! assert_eq!(coder.decode(&chunks).unwrap(), "parity");
//! ```

use crate::cs::error::Error;

/// Result type for error correction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Hamming codes with parity bits at power-of-two positions
pub mod hamming;
pub use hamming::{correct_chunk, encode_chunk, encoded_len, extract_data_bits, HammingCoder};
