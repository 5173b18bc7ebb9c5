//! Compression algorithms implementation.
//!
//! This module provides implementations of classical lossless transforms:
//! - Burrows-Wheeler transform (block permutation, no size change)
//! - Huffman coding (frequency-weighted prefix codes)
//! - LZW coding (adaptive dictionary codes)
//!
//! Each algorithm is self-contained; none of them share state with the others.
//!
//! # Examples
//!
//! ```rust
//! use classic_codecs::cs::compression::{huffman, lzw};
//!
//! let text = "TOBEORNOTTOBEORTOBEORNOT";
//!
//! let encoding = huffman::encode(text);
//! assert_eq!(encoding.decode().unwrap(), text);
//!
//! let codes = lzw::encode(text).unwrap();
//! assert_eq!(lzw::decode(&codes).unwrap(), text);
//! ```

use crate::cs::error::Error;

/// Result type for compression operations
pub type Result<T> = std::result::Result<T, Error>;

pub mod bwt;
pub mod huffman;
pub mod lzw;

pub use huffman::{
    build_frequency_table, build_huffman_tree, HuffmanCoder, HuffmanEncoding, HuffmanNode,
    HuffmanTree,
};
pub use lzw::{LzwLexicon, PRINTABLE};
