//! LZW coding over the printable ASCII alphabet.
//!
//! Both directions start from the same 100-entry lexicon, one entry per
//! character of [`PRINTABLE`], and add exactly one entry per emitted code.
//! Codes are dense and only ever grow, so the lexicon is an append-only arena
//! where each entry stores its prefix code and final character; a string is
//! recovered by following prefix links back to a seed entry.

use crate::cs::compression::Result;
use crate::cs::error::Error;
use std::collections::HashMap;

/// Seed alphabet: digits, lowercase, uppercase, punctuation, then whitespace.
/// A character's position in this string is its initial code.
pub const PRINTABLE: &str = "0123456789\
abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ \t\n\r\x0b\x0c";

fn seed_code(ch: char) -> Option<u32> {
    PRINTABLE.chars().position(|c| c == ch).map(|pos| pos as u32)
}

#[derive(Debug, Clone, Copy)]
struct LexiconEntry {
    /// `None` for the seeded single-character entries.
    prefix: Option<u32>,
    last: char,
    first: char,
    len: usize,
}

/// Append-only LZW lexicon indexed by code.
///
/// An encoding lexicon also keeps a `(prefix, char) -> code` index so the
/// encoder can extend its current match in constant time. A decoding lexicon
/// only ever looks codes up by position and skips that index.
#[derive(Debug, Clone)]
pub struct LzwLexicon {
    entries: Vec<LexiconEntry>,
    index: Option<HashMap<(Option<u32>, char), u32>>,
}

impl LzwLexicon {
    fn seeded(with_index: bool) -> Self {
        let mut lexicon = Self {
            entries: Vec::with_capacity(PRINTABLE.len() * 2),
            index: if with_index { Some(HashMap::new()) } else { None },
        };
        for ch in PRINTABLE.chars() {
            lexicon.insert(None, ch, ch, 1);
        }
        lexicon
    }

    /// Seeded lexicon with the lookup index used by the encoder.
    pub fn for_encoding() -> Self {
        Self::seeded(true)
    }

    /// Seeded lexicon without the lookup index, used by the decoder.
    pub fn for_decoding() -> Self {
        Self::seeded(false)
    }

    fn insert(&mut self, prefix: Option<u32>, last: char, first: char, len: usize) -> u32 {
        let code = self.entries.len() as u32;
        self.entries.push(LexiconEntry {
            prefix,
            last,
            first,
            len,
        });
        if let Some(index) = self.index.as_mut() {
            index.insert((prefix, last), code);
        }
        code
    }

    /// Adds the string of `prefix` followed by `ch`, returning its new code.
    ///
    /// `prefix` must be a code already in the lexicon.
    fn extend(&mut self, prefix: u32, ch: char) -> u32 {
        let parent = self.entries[prefix as usize];
        self.insert(Some(prefix), ch, parent.first, parent.len + 1)
    }

    /// Number of entries; also the next code to be assigned.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the seed alphabet is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Code of the single character `ch` in the seed alphabet.
    pub fn seed_code(&self, ch: char) -> Option<u32> {
        seed_code(ch)
    }

    /// Code of the string for `prefix` extended by `ch`, if present.
    ///
    /// A `prefix` of `None` asks for the single character. Always `None` on a
    /// decoding lexicon, which carries no lookup index.
    pub fn code_of(&self, prefix: Option<u32>, ch: char) -> Option<u32> {
        self.index.as_ref()?.get(&(prefix, ch)).copied()
    }

    /// First character of the string for `code`.
    pub fn first_char(&self, code: u32) -> Option<char> {
        self.entries.get(code as usize).map(|entry| entry.first)
    }

    /// The full string for `code`.
    pub fn entry(&self, code: u32) -> Option<String> {
        let mut out = String::new();
        self.append_entry(code, &mut out).then_some(out)
    }

    /// Appends the string for `code` to `out`; returns `false` for an unknown code.
    fn append_entry(&self, code: u32, out: &mut String) -> bool {
        let Some(entry) = self.entries.get(code as usize) else {
            return false;
        };
        let mut reversed = Vec::with_capacity(entry.len);
        let mut cursor = Some(code);
        while let Some(c) = cursor {
            let link = self.entries[c as usize];
            reversed.push(link.last);
            cursor = link.prefix;
        }
        out.extend(reversed.iter().rev());
        true
    }
}

/// Compresses `text` into a sequence of lexicon codes.
///
/// Returns `Error::EmptyInput` for empty text and `Error::InvalidInput` for a
/// character outside [`PRINTABLE`].
///
/// # Example
///
/// ```
/// use classic_codecs::cs::compression::lzw;
///
/// let codes = lzw::encode("TOBEORNOTTOBEORTOBEORNOT").unwrap();
/// assert_eq!(codes.len(), 16);
/// assert_eq!(lzw::decode(&codes).unwrap(), "TOBEORNOTTOBEORTOBEORNOT");
/// ```
pub fn encode(text: &str) -> Result<Vec<u32>> {
    let mut lexicon = LzwLexicon::for_encoding();
    let seed = |ch: char| {
        seed_code(ch).ok_or_else(|| {
            Error::InvalidInput(format!(
                "character {:?} is not in the LZW seed alphabet",
                ch
            ))
        })
    };

    let mut chars = text.chars();
    let first = chars
        .next()
        .ok_or_else(|| Error::EmptyInput("LZW cannot encode empty text".to_string()))?;

    let mut codes = Vec::new();
    let mut suffix = seed(first)?;
    for ch in chars {
        match lexicon.code_of(Some(suffix), ch) {
            Some(code) => suffix = code,
            None => {
                let next = seed(ch)?;
                codes.push(suffix);
                lexicon.extend(suffix, ch);
                suffix = next;
            }
        }
    }
    codes.push(suffix);

    log::debug!(
        "lzw encoded {} chars into {} codes, lexicon size {}",
        text.chars().count(),
        codes.len(),
        lexicon.len()
    );
    Ok(codes)
}

/// Decompresses a sequence of codes produced by [`encode`].
///
/// Returns `Error::EmptyInput` for an empty slice and `Error::InvalidInput`
/// when a code is beyond the next code the lexicon could have assigned.
pub fn decode(codes: &[u32]) -> Result<String> {
    let (&first, rest) = codes
        .split_first()
        .ok_or_else(|| Error::EmptyInput("LZW cannot decode an empty code sequence".to_string()))?;

    let mut lexicon = LzwLexicon::for_decoding();
    let mut output = String::new();

    if !lexicon.append_entry(first, &mut output) {
        return Err(Error::InvalidInput(format!(
            "first LZW code {} is not a seed code",
            first
        )));
    }

    let mut prev = first;
    for &code in rest {
        let next_code = lexicon.len() as u32;
        // A code equal to the next free code was created by the encoder in the step
        // that emitted `prev`; its string is prev + prev[0].
        let first_char = match code.cmp(&next_code) {
            std::cmp::Ordering::Less => lexicon.first_char(code),
            std::cmp::Ordering::Equal => lexicon.first_char(prev),
            std::cmp::Ordering::Greater => None,
        }
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "bad LZW code {} (next code would be {})",
                code, next_code
            ))
        })?;

        lexicon.extend(prev, first_char);
        lexicon.append_entry(code, &mut output);
        prev = code;
    }

    Ok(output)
}
