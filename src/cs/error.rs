//! Error type shared by every algorithm in the crate.

use thiserror::Error;

/// Errors surfaced by the filters and codecs.
///
/// All of them are local and deterministic: the same input always fails the
/// same way, and no operation returns a partial result alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A constructor argument is out of its valid range
    /// (e.g. a zero element count or a zero chunk size).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The data handed to an encoder or decoder cannot be processed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A Huffman decode was requested without a tree from a previous encode.
    #[error("no Huffman tree available, encode something first")]
    NoTreeAvailable,

    /// An operation that needs at least one symbol received none.
    #[error("empty input: {0}")]
    EmptyInput(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::InvalidParameter("chunk size must be positive".to_string()).to_string(),
            "invalid parameter: chunk size must be positive"
        );
        assert_eq!(
            Error::NoTreeAvailable.to_string(),
            "no Huffman tree available, encode something first"
        );
        assert_eq!(
            Error::EmptyInput("nothing to encode".to_string()).to_string(),
            "empty input: nothing to encode"
        );
    }
}
