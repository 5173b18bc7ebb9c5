//! Hamming error correction code implementation.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! Parity bits sit at every power-of-two position (1, 2, 4, 8, ... counting from 1) and data bits
//! fill the remaining positions. The parity bit at position `p` covers every position whose index
//! has bit `p` set: `p` positions covered, `p` skipped, alternating, starting at `p` itself.
//!
//! This implementation provides:
//! - Text encoding in chunks of a configurable number of characters (UTF-8, MSB first)
//! - Decoding with single-bit error correction per chunk
//!
//! Two or more flipped bits in one chunk are neither detected nor corrected: the
//! syndrome then points at the wrong bit (or past the end of the chunk) and the
//! decoded text is silently wrong.
//!
//! # Applications
//!
//! - Computer memory (ECC RAM)
//! - Satellite communications
//! - Data storage systems

use crate::cs::ecc::Result;
use crate::cs::error::Error;
use bitvec::prelude::*;

/// 1-based position `pos` is a parity slot.
#[inline]
fn is_parity_position(pos: usize) -> bool {
    pos.is_power_of_two()
}

/// Parity positions (1-based) that carry a checked parity bit in a chunk of `len` bits.
///
/// A parity slot at position `len` itself, which appears when the data ends exactly
/// before a power of two, is reserved but never set or checked.
fn parity_positions(len: usize) -> impl DoubleEndedIterator<Item = usize> {
    (0..usize::BITS)
        .map(|i| 1usize << i)
        .take_while(move |&p| p < len)
        .collect::<Vec<_>>()
        .into_iter()
}

/// Length of the chunk produced for `data_len` data bits.
///
/// Positions are filled in order, reserving every power of two for parity, until the
/// data runs out at a non-parity position.
pub fn encoded_len(data_len: usize) -> usize {
    let mut placed = 0;
    let mut pos = 1;
    loop {
        if !is_parity_position(pos) {
            if placed == data_len {
                return pos - 1;
            }
            placed += 1;
        }
        pos += 1;
    }
}

/// XOR of the bits covered by parity position `p` (1-based).
fn covered_parity(chunk: &BitSlice<u8, Msb0>, p: usize) -> bool {
    chunk
        .iter()
        .by_vals()
        .enumerate()
        .filter(|&(i, bit)| bit && (i + 1) & p != 0)
        .count()
        % 2
        == 1
}

/// Encodes one chunk of data bits: inserts zeroed parity slots, then sets every
/// checked parity bit from the highest position down.
pub fn encode_chunk(data: &BitSlice<u8, Msb0>) -> BitVec<u8, Msb0> {
    let len = encoded_len(data.len());
    let mut chunk = BitVec::<u8, Msb0>::with_capacity(len);

    let mut data_bits = data.iter().by_vals();
    for pos in 1..=len {
        if is_parity_position(pos) {
            chunk.push(false);
        } else {
            chunk.push(data_bits.next().unwrap_or(false));
        }
    }

    for p in parity_positions(len).rev() {
        let parity = covered_parity(&chunk, p);
        chunk.set(p - 1, parity);
    }

    chunk
}

/// Collects the data bits (every non-power-of-two position) of an encoded chunk.
pub fn extract_data_bits(chunk: &BitSlice<u8, Msb0>) -> BitVec<u8, Msb0> {
    chunk
        .iter()
        .by_vals()
        .enumerate()
        .filter(|&(i, _)| !is_parity_position(i + 1))
        .map(|(_, bit)| bit)
        .collect()
}

/// Checks `chunk` against a fresh encoding of its own data bits and flips the bit the
/// parity mismatches point at.
///
/// Each checked parity position `2^i` whose received value differs from the fresh one
/// adds `2^i` to the syndrome; the bit at 0-based index `syndrome - 1` is flipped.
/// Returns that index, or `None` when every parity bit agrees. A syndrome beyond the
/// chunk (only possible with several flipped bits) is logged and left alone.
///
/// Returns `Error::InvalidInput` when `chunk` does not have the length this code gives
/// to its number of data bits.
pub fn correct_chunk(chunk: &mut BitSlice<u8, Msb0>) -> Result<Option<usize>> {
    let fresh = encode_chunk(&extract_data_bits(chunk));
    if fresh.len() != chunk.len() {
        return Err(Error::InvalidInput(format!(
            "malformed Hamming chunk of {} bits (expected {})",
            chunk.len(),
            fresh.len()
        )));
    }

    let syndrome: usize = parity_positions(chunk.len())
        .filter(|&p| chunk[p - 1] != fresh[p - 1])
        .sum();

    if syndrome == 0 {
        return Ok(None);
    }

    let error_index = syndrome - 1;
    if error_index >= chunk.len() {
        log::warn!(
            "Hamming syndrome {} points outside a {}-bit chunk, leaving it uncorrected",
            syndrome,
            chunk.len()
        );
        return Ok(None);
    }

    log::trace!("flipping bit {} of a {}-bit chunk", error_index, chunk.len());
    let bit = chunk[error_index];
    chunk.set(error_index, !bit);
    Ok(Some(error_index))
}

/// Encodes text as Hamming-protected bit chunks of `num_of_char` characters each.
///
/// # Examples
///
/// ```
/// use classic_codecs::cs::ecc::hamming::HammingCoder;
///
/// let coder = HammingCoder::new(3).unwrap();
/// let mut chunks = coder.encode("Hamming coding.");
/// assert_eq!(chunks.len(), 5);
///
/// // Any single flipped bit per chunk is repaired.
/// let flipped = !chunks[2][6];
/// chunks[2].set(6, flipped);
/// assert_eq!(coder.decode(&chunks).unwrap(), "Hamming coding.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HammingCoder {
    num_of_char: usize,
}

impl HammingCoder {
    /// Creates a coder putting `num_of_char` characters in each chunk.
    ///
    /// Returns `Error::InvalidParameter` when `num_of_char` is zero.
    pub fn new(num_of_char: usize) -> Result<Self> {
        if num_of_char == 0 {
            return Err(Error::InvalidParameter(
                "Hamming chunk size must be at least one character".to_string(),
            ));
        }
        Ok(Self { num_of_char })
    }

    /// Characters per chunk.
    pub fn num_of_char(&self) -> usize {
        self.num_of_char
    }

    /// Splits `text` into chunks of `num_of_char` characters (the last one may be
    /// shorter), turns each into its UTF-8 bits and encodes it.
    pub fn encode(&self, text: &str) -> Vec<BitVec<u8, Msb0>> {
        let chars: Vec<char> = text.chars().collect();
        let chunks: Vec<BitVec<u8, Msb0>> = chars
            .chunks(self.num_of_char)
            .map(|group| {
                let piece: String = group.iter().collect();
                encode_chunk(piece.as_bytes().view_bits::<Msb0>())
            })
            .collect();

        log::debug!(
            "hamming encoded {} chars into {} chunks of up to {} chars",
            chars.len(),
            chunks.len(),
            self.num_of_char
        );
        chunks
    }

    /// Corrects up to one bit per chunk and decodes the data bits back to text.
    ///
    /// Returns `Error::InvalidInput` for a chunk whose length or data bit count does
    /// not come from [`encode`](Self::encode). Bytes that are not valid UTF-8 after
    /// correction are replaced with U+FFFD.
    pub fn decode(&self, chunks: &[BitVec<u8, Msb0>]) -> Result<String> {
        let mut bytes = Vec::new();
        let mut corrected = 0;

        for received in chunks {
            let mut chunk = received.clone();
            if correct_chunk(&mut chunk)?.is_some() {
                corrected += 1;
            }

            let data = extract_data_bits(&chunk);
            if data.len() % 8 != 0 {
                return Err(Error::InvalidInput(format!(
                    "Hamming chunk carries {} data bits, not a whole number of bytes",
                    data.len()
                )));
            }
            bytes.extend(data.chunks(8).map(|byte| {
                byte.iter()
                    .by_vals()
                    .fold(0u8, |acc, bit| (acc << 1) | bit as u8)
            }));
        }

        log::debug!(
            "hamming decoded {} chunks, {} corrected",
            chunks.len(),
            corrected
        );

        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("Hamming output is not valid UTF-8: {}", err);
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        })
    }
}
