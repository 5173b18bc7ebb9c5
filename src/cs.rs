pub mod compression;
pub mod ecc;
pub mod error;
pub mod hashing;

// Re-export the entry points of each family
pub use compression::{bwt, huffman, lzw};
pub use ecc::hamming;
pub use hashing::{bloom, djb2};
