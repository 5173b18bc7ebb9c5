pub mod cs;
pub mod samples;

pub use cs::{bloom, bwt, hamming, huffman, lzw};
pub use cs::error::{Error, Result};
