//! Huffman coding.
//!
//! [`encode`] builds a frequency-weighted prefix tree for the input, emits the
//! concatenated codes as a bit vector and hands the tree back to the caller inside a
//! [`HuffmanEncoding`]. [`decode`] needs that tree; there is no hidden state shared
//! between the two calls. [`HuffmanCoder`] wraps the pair for callers that prefer an
//! object remembering the most recent tree.

use crate::cs::compression::Result;
use crate::cs::error::Error;
use bitvec::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node contains a character and its frequency.
    Leaf { ch: char, freq: usize },
    /// An internal node with left (bit 0) and right (bit 1) children and combined frequency.
    Internal {
        freq: usize,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the frequency of the node.
    pub fn freq(&self) -> usize {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Heap entry. Lower frequency wins, then the node created first.
#[derive(Debug)]
struct QueueEntry {
    seq: usize,
    node: Box<HuffmanNode>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .node
            .freq()
            .cmp(&self.node.freq())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build a frequency table mapping each character in `input` to its frequency.
///
/// The table is ordered by character, which fixes the order leaves enter the queue.
pub fn build_frequency_table(input: &str) -> BTreeMap<char, usize> {
    let mut freq = BTreeMap::new();
    for ch in input.chars() {
        *freq.entry(ch).or_insert(0) += 1;
    }
    freq
}

/// Build the Huffman tree given a frequency table.
///
/// Ties are broken by creation order: leaves in ascending character order first,
/// then merged nodes as they are created. Of the two nodes merged at each step, the
/// one popped first becomes the left child.
///
/// Returns `None` if the frequency table is empty.
pub fn build_huffman_tree(freq_table: &BTreeMap<char, usize>) -> Option<HuffmanTree> {
    let mut heap = BinaryHeap::with_capacity(freq_table.len());
    let mut seq = 0;
    for (&ch, &freq) in freq_table {
        heap.push(QueueEntry {
            seq,
            node: Box::new(HuffmanNode::Leaf { ch, freq }),
        });
        seq += 1;
    }

    // Combine nodes until only one tree remains.
    loop {
        let first = heap.pop()?;
        let Some(second) = heap.pop() else {
            return Some(HuffmanTree { root: first.node });
        };
        let internal = HuffmanNode::Internal {
            freq: first.node.freq() + second.node.freq(),
            left: first.node,
            right: second.node,
        };
        heap.push(QueueEntry {
            seq,
            node: Box::new(internal),
        });
        seq += 1;
    }
}

/// A Huffman tree produced by [`encode`] and required by [`decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Box<HuffmanNode>,
}

impl HuffmanTree {
    /// The root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total number of symbols the tree was built from.
    pub fn total_frequency(&self) -> usize {
        self.root.freq()
    }

    /// Builds the code table mapping characters to their codes (left = 0, right = 1).
    ///
    /// If the tree consists of a single leaf (one unique symbol), the code "1" is assigned.
    pub fn code_table(&self) -> HashMap<char, BitVec<u8, Msb0>> {
        let mut table = HashMap::new();
        let mut stack: Vec<(&HuffmanNode, BitVec<u8, Msb0>)> =
            vec![(self.root.as_ref(), BitVec::new())];

        while let Some((node, prefix)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { ch, .. } => {
                    let code = if prefix.is_empty() {
                        bitvec![u8, Msb0; 1]
                    } else {
                        prefix
                    };
                    table.insert(*ch, code);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut left_prefix = prefix.clone();
                    left_prefix.push(false);
                    let mut right_prefix = prefix;
                    right_prefix.push(true);
                    stack.push((right.as_ref(), right_prefix));
                    stack.push((left.as_ref(), left_prefix));
                }
            }
        }

        table
    }

    /// Decodes `bits` by walking the tree from the root for every symbol.
    ///
    /// A single-leaf tree emits its symbol once per bit.
    pub fn decode(&self, bits: &BitSlice<u8, Msb0>) -> Result<String> {
        if let HuffmanNode::Leaf { ch, .. } = self.root.as_ref() {
            return Ok(std::iter::repeat(*ch).take(bits.len()).collect());
        }

        let mut result = String::new();
        let mut current: &HuffmanNode = &self.root;
        for bit in bits.iter().by_vals() {
            if let HuffmanNode::Internal { left, right, .. } = current {
                current = if bit { right.as_ref() } else { left.as_ref() };
            }
            if let HuffmanNode::Leaf { ch, .. } = current {
                result.push(*ch);
                current = self.root.as_ref();
            }
        }

        if !std::ptr::eq(current, self.root.as_ref()) {
            return Err(Error::InvalidInput(
                "bit sequence ends in the middle of a Huffman code".to_string(),
            ));
        }

        Ok(result)
    }
}

/// Output of [`encode`]: the packed code bits and the tree needed to read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanEncoding {
    /// Concatenated codes, most significant bit first in each byte.
    pub bits: BitVec<u8, Msb0>,
    /// `None` only when the encoded text was empty.
    pub tree: Option<HuffmanTree>,
}

impl HuffmanEncoding {
    /// Decodes the bits with the tree they were produced with.
    pub fn decode(&self) -> Result<String> {
        match &self.tree {
            Some(tree) => tree.decode(&self.bits),
            None if self.bits.is_empty() => Ok(String::new()),
            None => Err(Error::NoTreeAvailable),
        }
    }
}

/// Builds a tree for `text` and encodes it.
///
/// Empty text yields no tree and no bits.
pub fn encode(text: &str) -> HuffmanEncoding {
    let freq_table = build_frequency_table(text);
    let Some(tree) = build_huffman_tree(&freq_table) else {
        return HuffmanEncoding {
            bits: BitVec::new(),
            tree: None,
        };
    };

    let code_table = tree.code_table();
    let mut bits = BitVec::new();
    for ch in text.chars() {
        // Every char of `text` is in the table it was built from.
        if let Some(code) = code_table.get(&ch) {
            bits.extend_from_bitslice(code.as_bitslice());
        }
    }

    log::debug!(
        "huffman encoded {} chars ({} distinct) into {} bits",
        tree.total_frequency(),
        freq_table.len(),
        bits.len()
    );

    HuffmanEncoding {
        bits,
        tree: Some(tree),
    }
}

/// Decodes `bits` with `tree`.
///
/// Returns `Error::NoTreeAvailable` when `tree` is `None`.
pub fn decode(bits: &BitSlice<u8, Msb0>, tree: Option<&HuffmanTree>) -> Result<String> {
    tree.ok_or(Error::NoTreeAvailable)?.decode(bits)
}

/// Encoder/decoder pair that keeps the tree from its most recent `encode`.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCoder {
    tree: Option<HuffmanTree>,
}

impl HuffmanCoder {
    /// Creates a coder with no tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes `text`, replacing the retained tree.
    pub fn encode(&mut self, text: &str) -> BitVec<u8, Msb0> {
        let HuffmanEncoding { bits, tree } = encode(text);
        self.tree = tree;
        bits
    }

    /// Decodes with the tree from the latest `encode`.
    ///
    /// Returns `Error::NoTreeAvailable` before the first encode, or after encoding
    /// empty text.
    pub fn decode(&self, bits: &BitSlice<u8, Msb0>) -> Result<String> {
        decode(bits, self.tree.as_ref())
    }

    /// The retained tree, if any.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_to_string(bits: &BitSlice<u8, Msb0>) -> String {
        bits.iter()
            .by_vals()
            .map(|b| if b { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_frequency_table() {
        let input = "aabccc";
        let freq = build_frequency_table(input);
        assert_eq!(freq.get(&'a'), Some(&2));
        assert_eq!(freq.get(&'b'), Some(&1));
        assert_eq!(freq.get(&'c'), Some(&3));
    }

    #[test]
    fn test_huffman_tree_and_code_table() {
        let input = "this is an example for huffman encoding";
        let freq = build_frequency_table(input);
        let tree = build_huffman_tree(&freq).expect("Tree should be built");
        assert_eq!(tree.total_frequency(), input.len());
        let code_table = tree.code_table();
        // Each character in input must have a code.
        for ch in input.chars() {
            assert!(code_table.contains_key(&ch), "Missing code for '{}'", ch);
        }
    }

    #[test]
    fn test_codes_are_prefix_free() {
        let freq = build_frequency_table("the quick brown fox jumps over the lazy dog");
        let table = build_huffman_tree(&freq).unwrap().code_table();
        let codes: Vec<String> = table.values().map(|c| bits_to_string(c)).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a.as_str()), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_deterministic_tie_break() {
        // b(1) and a(2) merge first; c(3) was queued before the merged node.
        let encoding = encode("aabccc");
        let table = encoding.tree.as_ref().unwrap().code_table();
        assert_eq!(bits_to_string(&table[&'c']), "0");
        assert_eq!(bits_to_string(&table[&'b']), "10");
        assert_eq!(bits_to_string(&table[&'a']), "11");
        assert_eq!(bits_to_string(&encoding.bits), "111110000");
    }

    #[test]
    fn test_encode_decode() {
        let input = "huffman coding in rust is fun!";
        let encoding = encode(input);
        let decoded = decode(&encoding.bits, encoding.tree.as_ref()).unwrap();
        assert_eq!(decoded, input);
        assert_eq!(encoding.decode().unwrap(), input);
    }

    #[test]
    fn test_single_character() {
        let input = "aaaa";
        let encoding = encode(input);
        // With a single symbol, the assigned code is "1" for each occurrence.
        assert_eq!(bits_to_string(&encoding.bits), "1111");
        assert_eq!(encoding.decode().unwrap(), input);
    }

    #[test]
    fn test_empty_input() {
        let encoding = encode("");
        assert!(encoding.bits.is_empty());
        assert!(encoding.tree.is_none());
        assert_eq!(encoding.decode().unwrap(), "");
        assert_eq!(
            decode(&encoding.bits, encoding.tree.as_ref()),
            Err(Error::NoTreeAvailable)
        );
    }

    #[test]
    fn test_truncated_bits_rejected() {
        // Codes for "aabccc": c = 0, b = 10, a = 11.
        let encoding = encode("aabccc");
        let tree = encoding.tree.as_ref().unwrap();
        let mut bits = encoding.bits.clone();
        bits.push(true);
        assert!(matches!(tree.decode(&bits), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_non_ascii() {
        let input = "这是一段测试 ✓ ünïcödé";
        let encoding = encode(input);
        assert_eq!(encoding.decode().unwrap(), input);
    }

    #[test]
    fn test_coder_requires_encode_first() {
        let mut coder = HuffmanCoder::new();
        assert_eq!(coder.decode(&BitVec::<u8, Msb0>::new()), Err(Error::NoTreeAvailable));

        let bits = coder.encode("mississippi");
        assert_eq!(coder.decode(&bits).unwrap(), "mississippi");

        let bits = coder.encode("banana");
        assert_eq!(coder.decode(&bits).unwrap(), "banana");
        assert_eq!(coder.tree().unwrap().total_frequency(), 6);
    }

    #[test]
    fn test_compresses_skewed_text() {
        let input = "aaaaaaaabbbbccd".repeat(50);
        let encoding = encode(&input);
        assert!(encoding.bits.len() < input.len() * 8);
        assert_eq!(encoding.decode().unwrap(), input);
    }
}
