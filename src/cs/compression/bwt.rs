//! Burrows-Wheeler Transform implementation.
//!
//! The Burrows-Wheeler Transform (BWT) is a reversible transformation that rearranges
//! characters so that equal symbols cluster together. It does not compress by itself;
//! it prepares a block for run-length or entropy coding.
//!
//! The whole input is treated as a single block. Text is handled per `char`, and since
//! `char` ordering matches the byte order of UTF-8, sorting rotations of chars gives the
//! same order as sorting their encoded bytes.

use crate::cs::compression::Result;
use crate::cs::error::Error;

/// Applies the Burrows-Wheeler Transform to a slice of symbols.
///
/// # Algorithm
///
/// 1. Form all rotations of the input.
/// 2. Sort these rotations lexicographically (stable, so equal rotations keep
///    their starting-offset order).
/// 3. Extract the last column of the sorted matrix.
/// 4. Record the first sorted row equal to the input (needed for decoding).
///
/// Returns `None` for an empty slice.
pub fn transform_symbols<T: Ord + Copy>(input: &[T]) -> Option<(Vec<T>, usize)> {
    if input.is_empty() {
        return None;
    }

    let n = input.len();

    // Every rotation is a length-n window of the doubled input
    let mut circular_input = Vec::with_capacity(2 * n);
    circular_input.extend_from_slice(input);
    circular_input.extend_from_slice(input);

    let mut rotations: Vec<usize> = (0..n).collect();
    rotations.sort_by(|&a, &b| circular_input[a..a + n].cmp(&circular_input[b..b + n]));

    // Periodic inputs have several rotations equal to the original; take the first.
    let orig_index = rotations
        .iter()
        .position(|&start| &circular_input[start..start + n] == input)?;

    let transformed = rotations
        .iter()
        .map(|&start| circular_input[start + n - 1])
        .collect();

    Some((transformed, orig_index))
}

/// One link of the decoding chain: the last-column symbol at a row and the
/// row reached by following it back through the first column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChainLink<T> {
    symbol: T,
    next: usize,
}

/// Builds the LF chain in one pass.
///
/// Sorting row indices stably by their last-column symbol yields the first column
/// with ties resolved by order of appearance, so the `f`-th entry of that order is
/// the row whose symbol lands at first-column position `f`.
fn build_chain<T: Ord + Copy>(transformed: &[T]) -> Vec<ChainLink<T>> {
    let mut first_column_order: Vec<usize> = (0..transformed.len()).collect();
    first_column_order.sort_by_key(|&row| transformed[row]);

    let mut chain: Vec<ChainLink<T>> = transformed
        .iter()
        .map(|&symbol| ChainLink { symbol, next: 0 })
        .collect();
    for (first_pos, &row) in first_column_order.iter().enumerate() {
        chain[row].next = first_pos;
    }
    chain
}

/// Inverts [`transform_symbols`].
///
/// Walks the chain backward from `index` for `transformed.len()` steps and reverses
/// the collected symbols.
pub fn inverse_symbols<T: Ord + Copy>(transformed: &[T], index: usize) -> Result<Vec<T>> {
    if transformed.is_empty() {
        return Err(Error::InvalidInput(
            "cannot invert an empty BWT block".to_string(),
        ));
    }
    if index >= transformed.len() {
        return Err(Error::InvalidInput(format!(
            "BWT index {} out of range for block of length {}",
            index,
            transformed.len()
        )));
    }

    let chain = build_chain(transformed);

    let mut result = Vec::with_capacity(transformed.len());
    let mut pos = index;
    for _ in 0..transformed.len() {
        let link = chain[pos];
        result.push(link.symbol);
        pos = link.next;
    }
    result.reverse();

    Ok(result)
}

/// Encodes `text` and returns `(last column, index of the original rotation)`.
///
/// # Examples
///
/// ```
/// use classic_codecs::cs::compression::bwt;
///
/// let (encoded, index) = bwt::encode("banana").unwrap();
/// assert_eq!(encoded, "nnbaaa");
/// assert_eq!(index, 3);
/// assert_eq!(bwt::decode(&encoded, index).unwrap(), "banana");
/// ```
pub fn encode(text: &str) -> Result<(String, usize)> {
    let chars: Vec<char> = text.chars().collect();
    let (transformed, index) = transform_symbols(&chars)
        .ok_or_else(|| Error::InvalidInput("cannot transform empty text".to_string()))?;

    log::debug!("bwt encoded {} chars, original row {}", chars.len(), index);
    Ok((transformed.into_iter().collect(), index))
}

/// Decodes a last-column string and the original-row index back to the text.
///
/// Returns `Error::InvalidInput` when `index` is not in `[0, encoded.chars().count())`.
pub fn decode(encoded: &str, index: usize) -> Result<String> {
    let chars: Vec<char> = encoded.chars().collect();
    let original = inverse_symbols(&chars, index)?;
    Ok(original.into_iter().collect())
}
