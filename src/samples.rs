//! Sample text sources and round-trip statistics for the codecs.
//!
//! A [`SampleSource`] hands out text by URL; the crate ships no HTTP client,
//! so the provided sources are an in-memory map ([`StaticSource`]) and a
//! seeded generator ([`GeneratedSource`]). [`SamplesStatistic`] compares an
//! original text against its decoded counterpart and reports how much room
//! the encoded form takes, measured through [`EncodedSize`].
//!
//! # Examples
//!
//! ```rust
//! use classic_codecs::cs::compression::lzw;
//! use classic_codecs::samples::{GeneratedSource, ReportOptions, SampleSource, SamplesStatistic};
//!
//! let text = GeneratedSource::new(7, 2_000).fetch("generated://english");
//! let codes = lzw::encode(&text).unwrap();
//! let decoded = lzw::decode(&codes).unwrap();
//!
//! let stat = SamplesStatistic::new(&text, &codes, &decoded);
//! let report = stat.report(ReportOptions { memory: true, show_samples: false });
//! assert!(report.equal);
//! assert!(report.size_ratio.unwrap() > 1.0);
//! ```

use crate::cs::compression::HuffmanEncoding;
use bitvec::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::fmt::Debug;

/// Something that can hand out sample text for a URL.
///
/// Failures are not errors here: an unreachable or unknown URL yields an
/// empty string.
pub trait SampleSource {
    fn fetch(&self, url: &str) -> String;
}

/// Sample source backed by pre-loaded text.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    samples: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `text` under `url`, builder style.
    pub fn with_sample(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(url, text);
        self
    }

    /// Registers `text` under `url`, replacing any previous sample.
    pub fn insert(&mut self, url: impl Into<String>, text: impl Into<String>) {
        self.samples.insert(url.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl SampleSource for StaticSource {
    fn fetch(&self, url: &str) -> String {
        match self.samples.get(url) {
            Some(text) => text.clone(),
            None => {
                log::warn!("no sample registered for {}", url);
                String::new()
            }
        }
    }
}

/// Words ordered from most to least frequent; the generator favours the front.
const VOCABULARY: &[&str] = &[
    "the", "of", "and", "to", "a", "in", "is", "that", "for", "it", "as", "was", "with", "be",
    "by", "on", "not", "he", "this", "are", "or", "his", "from", "at", "which", "but", "have",
    "an", "had", "they", "you", "were", "their", "one", "all", "we", "can", "her", "has",
    "there", "been", "if", "more", "when", "will", "would", "who", "so", "no", "code", "tree",
    "filter", "symbol", "message", "channel", "parity", "lexicon", "rotation", "frequency",
];

/// Deterministic generator of English-like text with a skewed word distribution.
///
/// The same seed and length always produce the same text, and every character
/// is printable ASCII, so the output is accepted by all codecs in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedSource {
    seed: u64,
    len: usize,
}

impl GeneratedSource {
    /// Generator for samples of exactly `len` characters.
    pub fn new(seed: u64, len: usize) -> Self {
        Self { seed, len }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Builds the sample text.
    pub fn generate(&self) -> String {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut text = String::with_capacity(self.len + 16);

        while text.len() < self.len {
            let sentence_words = rng.gen_range(6..14);
            for position in 0..sentence_words {
                // Squaring a uniform sample piles the mass onto low ranks.
                let u: f64 = rng.gen();
                let rank = ((u * u) * VOCABULARY.len() as f64) as usize;
                let word = VOCABULARY[rank.min(VOCABULARY.len() - 1)];

                if position == 0 {
                    let mut chars = word.chars();
                    if let Some(first) = chars.next() {
                        text.push(first.to_ascii_uppercase());
                        text.push_str(chars.as_str());
                    }
                } else {
                    text.push(' ');
                    text.push_str(word);
                }
            }
            text.push_str(if rng.gen_bool(0.2) { ".\n" } else { ". " });
        }

        // ASCII only, so truncating by bytes keeps whole characters.
        text.truncate(self.len);
        text
    }
}

impl SampleSource for GeneratedSource {
    fn fetch(&self, url: &str) -> String {
        log::debug!("generating {} chars for {} (seed {})", self.len, url, self.seed);
        self.generate()
    }
}

/// Size in bits of a value in its encoded representation.
pub trait EncodedSize {
    fn size_in_bits(&self) -> usize;
}

impl EncodedSize for str {
    /// Eight bits per UTF-8 byte.
    fn size_in_bits(&self) -> usize {
        self.len() * 8
    }
}

impl EncodedSize for String {
    fn size_in_bits(&self) -> usize {
        self.as_str().size_in_bits()
    }
}

impl EncodedSize for BitVec<u8, Msb0> {
    fn size_in_bits(&self) -> usize {
        self.len()
    }
}

impl EncodedSize for Vec<u32> {
    /// Codes packed at the fixed width of the largest code present.
    fn size_in_bits(&self) -> usize {
        let width = self
            .iter()
            .max()
            .map_or(0, |&max| (u32::BITS - max.leading_zeros()).max(1) as usize);
        width * self.len()
    }
}

impl EncodedSize for Vec<BitVec<u8, Msb0>> {
    fn size_in_bits(&self) -> usize {
        self.iter().map(|chunk| chunk.len()).sum()
    }
}

impl EncodedSize for (String, usize) {
    /// The transformed text plus the row index as a machine word.
    fn size_in_bits(&self) -> usize {
        self.0.size_in_bits() + usize::BITS as usize
    }
}

impl EncodedSize for HuffmanEncoding {
    /// Code bits only; the tree travels out of band.
    fn size_in_bits(&self) -> usize {
        self.bits.len()
    }
}

impl<T: EncodedSize + ?Sized> EncodedSize for &T {
    fn size_in_bits(&self) -> usize {
        (**self).size_in_bits()
    }
}

/// What [`SamplesStatistic::report`] should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Include sizes and the compression ratio.
    pub memory: bool,
    /// Log the original, encoded and decoded samples.
    pub show_samples: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            memory: false,
            show_samples: true,
        }
    }
}

/// Outcome of a [`SamplesStatistic::report`] call.
///
/// Size fields are only filled when memory statistics were requested and the
/// round trip succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReport {
    pub equal: bool,
    pub original_bits: Option<usize>,
    pub encoded_bits: Option<usize>,
    pub size_ratio: Option<f64>,
}

/// Round-trip statistics for one original/encoded/decoded triple.
#[derive(Debug, Clone, Copy)]
pub struct SamplesStatistic<'a, E: ?Sized> {
    original: &'a str,
    encoded: &'a E,
    decoded: &'a str,
}

impl<'a, E: EncodedSize + Debug + ?Sized> SamplesStatistic<'a, E> {
    pub fn new(original: &'a str, encoded: &'a E, decoded: &'a str) -> Self {
        Self {
            original,
            encoded,
            decoded,
        }
    }

    /// True when the decoded text reproduces the original exactly.
    pub fn equality_check(&self) -> bool {
        let equal = self.original == self.decoded;
        if equal {
            log::info!("original and decoded samples are equal");
        } else {
            log::info!("original and decoded samples are different");
        }
        equal
    }

    /// Original size over encoded size, both in bits.
    ///
    /// `None` when the encoded form is empty.
    pub fn size_ratio(&self) -> Option<f64> {
        let encoded = self.encoded.size_in_bits();
        (encoded > 0).then(|| self.original.size_in_bits() as f64 / encoded as f64)
    }

    /// Checks the round trip and logs the requested statistics.
    pub fn report(&self, options: ReportOptions) -> SampleReport {
        let mut report = SampleReport {
            equal: self.equality_check(),
            original_bits: None,
            encoded_bits: None,
            size_ratio: None,
        };
        if !report.equal {
            log::info!("round trip failed, skipping statistics");
            return report;
        }

        if options.show_samples {
            log::info!("original sample: {}", self.original);
            log::info!("encoded sample: {:?}", self.encoded);
            log::info!("decoded sample: {}", self.decoded);
        }

        if options.memory {
            let original_bits = self.original.size_in_bits();
            let encoded_bits = self.encoded.size_in_bits();
            report.original_bits = Some(original_bits);
            report.encoded_bits = Some(encoded_bits);
            report.size_ratio = self.size_ratio();

            log::info!("original size is {} bits", original_bits);
            log::info!("encoded size is {} bits", encoded_bits);
            if let Some(ratio) = report.size_ratio {
                log::info!("encoded sample takes {:.3} times less memory than original", ratio);
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::compression::{bwt, huffman, lzw};
    use crate::cs::ecc::HammingCoder;

    #[test]
    fn test_static_source() {
        let source = StaticSource::new().with_sample("https://example.org/a", "alpha");
        assert_eq!(source.len(), 1);
        assert_eq!(source.fetch("https://example.org/a"), "alpha");
        assert_eq!(source.fetch("https://example.org/missing"), "");
    }

    #[test]
    fn test_generated_source_length() {
        for len in [0, 1, 17, 1000, 10_000] {
            let text = GeneratedSource::new(999, len).fetch("ignored");
            assert_eq!(text.len(), len);
        }
    }

    #[test]
    fn test_generated_source_determinism() {
        let a = GeneratedSource::new(12345, 5000).fetch("a");
        let b = GeneratedSource::new(12345, 5000).fetch("b");
        assert_eq!(a, b);
        assert_ne!(a, GeneratedSource::new(54321, 5000).fetch("a"));
    }

    #[test]
    fn test_generated_source_is_printable() {
        let text = GeneratedSource::new(3, 4000).generate();
        assert!(text.chars().all(|c| lzw::PRINTABLE.contains(c)));
        assert!(lzw::encode(&text).is_ok());
    }

    #[test]
    fn test_encoded_sizes() {
        assert_eq!("abc".size_in_bits(), 24);
        assert_eq!(String::from("é").size_in_bits(), 16);
        assert_eq!(bitvec![u8, Msb0; 1, 0, 1].size_in_bits(), 3);
        // Largest code 300 needs 9 bits.
        assert_eq!(vec![1u32, 300, 7].size_in_bits(), 27);
        assert_eq!(vec![0u32].size_in_bits(), 1);
        assert_eq!(Vec::<u32>::new().size_in_bits(), 0);
        assert_eq!(
            vec![bitvec![u8, Msb0; 0; 12], bitvec![u8, Msb0; 1; 5]].size_in_bits(),
            17
        );
        assert_eq!(
            (String::from("ab"), 1usize).size_in_bits(),
            16 + usize::BITS as usize
        );
        assert_eq!(huffman::encode("aabccc").size_in_bits(), 9);
    }

    #[test]
    fn test_report_lzw() {
        let text = "Testing phrase for Lempel, Ziv and Welch algorithm.";
        let codes = lzw::encode(text).unwrap();
        let decoded = lzw::decode(&codes).unwrap();
        let stat = SamplesStatistic::new(text, &codes, &decoded);

        assert!(stat.equality_check());
        let quiet = stat.report(ReportOptions::default());
        assert!(quiet.equal);
        assert_eq!(quiet.size_ratio, None);

        let full = stat.report(ReportOptions {
            memory: true,
            show_samples: true,
        });
        assert_eq!(full.original_bits, Some(text.len() * 8));
        assert_eq!(full.encoded_bits, Some(codes.size_in_bits()));
        assert_eq!(full.size_ratio, stat.size_ratio());
    }

    #[test]
    fn test_report_mismatch() {
        let encoded = bwt::encode("banana").unwrap();
        let stat = SamplesStatistic::new("banana", &encoded, "bananas");
        let report = stat.report(ReportOptions {
            memory: true,
            show_samples: true,
        });
        assert!(!report.equal);
        assert_eq!(report.original_bits, None);
        assert_eq!(report.size_ratio, None);
    }

    #[test]
    fn test_size_ratio_of_empty_encoding() {
        let encoded = huffman::encode("");
        let stat = SamplesStatistic::new("", &encoded, "");
        assert!(stat.equality_check());
        assert_eq!(stat.size_ratio(), None);
    }

    #[test]
    fn test_hamming_expands() {
        let coder = HammingCoder::new(4).unwrap();
        let text = "error correction";
        let chunks = coder.encode(text);
        let decoded = coder.decode(&chunks).unwrap();
        let ratio = SamplesStatistic::new(text, &chunks, &decoded)
            .size_ratio()
            .unwrap();
        assert!(ratio < 1.0);
    }
}
