//! Huffman coding over byte alphabets.
//!
//! The tree is built bottom-up from a min-heap keyed by frequency and stored
//! as an arena of nodes addressed by index. Codes are read off root-to-leaf
//! paths (`0` = left, `1` = right) and are not canonicalized, so the exact
//! code map depends on the merge order:
//!
//! - leaves enter the heap in ascending byte order;
//! - ties on frequency are broken by arena index, i.e. insertion order;
//! - the first node popped becomes the left child.
//!
//! A single distinct byte produces a one-leaf tree whose code is `0`.

use log::debug;
use oxipack_core::bitstream::{BitReader, BitWriter};
use oxipack_core::error::{OxiPackError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

/// Occurrence count of every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte in `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Add `count` occurrences of `byte`.
    pub fn add(&mut self, byte: u8, count: u64) {
        self.counts[byte as usize] += count;
    }

    /// Occurrences of `byte`.
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of byte values with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Whether no byte has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Non-zero `(byte, count)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(b, &c)| (b as u8, c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (byte, count) in iter {
            table.add(byte, count);
        }
        table
    }
}

/// A node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Leaf { byte: u8, freq: u64 },
    Internal { left: usize, right: usize, freq: u64 },
}

impl Node {
    fn freq(&self) -> u64 {
        match *self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => freq,
        }
    }
}

/// Huffman tree stored as an index arena.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let mut nodes = Vec::with_capacity(frequencies.distinct() * 2);
        let mut heap = BinaryHeap::new();

        for (byte, freq) in frequencies.iter() {
            heap.push(Reverse((freq, nodes.len())));
            nodes.push(Node::Leaf { byte, freq });
        }

        while heap.len() > 1 {
            let (Some(Reverse((left_freq, left))), Some(Reverse((right_freq, right)))) =
                (heap.pop(), heap.pop())
            else {
                break;
            };
            let freq = left_freq + right_freq;
            heap.push(Reverse((freq, nodes.len())));
            nodes.push(Node::Internal { left, right, freq });
        }

        let root = heap.pop().map(|Reverse((_, index))| index);
        Self { nodes, root }
    }

    /// Whether the tree has no symbols.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Frequency at the root (total symbol count).
    pub fn total_frequency(&self) -> u64 {
        self.root.map_or(0, |r| self.nodes[r].freq())
    }

    /// Decode `symbol_count` bytes from an MSB-first packed bitstream.
    ///
    /// Trailing padding bits after the last symbol are ignored.
    pub fn decode(&self, packed: &[u8], symbol_count: usize) -> Result<Vec<u8>> {
        let Some(root) = self.root else {
            if symbol_count == 0 {
                return Ok(Vec::new());
            }
            return Err(OxiPackError::invalid_huffman(0));
        };

        let mut reader = BitReader::new(packed);
        // Every symbol takes at least one bit.
        let mut output = Vec::with_capacity(symbol_count.min(packed.len() * 8));

        for _ in 0..symbol_count {
            let mut index = root;
            if let Node::Leaf { byte, .. } = self.nodes[root] {
                // One-leaf tree: every symbol is the single bit `0`.
                if reader.read_bit()? {
                    return Err(OxiPackError::invalid_huffman(reader.bit_position() - 1));
                }
                output.push(byte);
                continue;
            }

            loop {
                match self.nodes[index] {
                    Node::Internal { left, right, .. } => {
                        index = if reader.read_bit()? { right } else { left };
                    }
                    Node::Leaf { byte, .. } => {
                        output.push(byte);
                        break;
                    }
                }
            }
        }

        Ok(output)
    }
}

/// A variable-length code as a sequence of bits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code(Vec<bool>);

impl Code {
    /// The bits of this code, root first.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Code length in bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the code has no bits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Byte-to-code mapping read off a [`HuffmanTree`].
#[derive(Debug, Clone)]
pub struct CodeMap {
    codes: [Option<Code>; 256],
}

impl CodeMap {
    /// Derive codes from the tree's root-to-leaf paths.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes: [Option<Code>; 256] = std::array::from_fn(|_| None);

        if let Some(root) = tree.root {
            match tree.nodes[root] {
                Node::Leaf { byte, .. } => {
                    codes[byte as usize] = Some(Code(vec![false]));
                }
                Node::Internal { .. } => {
                    Self::walk(tree, root, &mut Vec::new(), &mut codes);
                }
            }
        }

        Self { codes }
    }

    fn walk(
        tree: &HuffmanTree,
        index: usize,
        path: &mut Vec<bool>,
        codes: &mut [Option<Code>; 256],
    ) {
        match tree.nodes[index] {
            Node::Leaf { byte, .. } => {
                codes[byte as usize] = Some(Code(path.clone()));
            }
            Node::Internal { left, right, .. } => {
                path.push(false);
                Self::walk(tree, left, path, codes);
                path.pop();
                path.push(true);
                Self::walk(tree, right, path, codes);
                path.pop();
            }
        }
    }

    /// Code assigned to `byte`.
    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// Number of bytes with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Whether no byte has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(byte, code)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(b, c)| c.as_ref().map(|c| (b as u8, c)))
    }

    /// Longest code length.
    pub fn max_code_length(&self) -> usize {
        self.codes.iter().flatten().map(Code::len).max().unwrap_or(0)
    }

    /// Total encoded bits for the given frequencies (sum of `freq * len`).
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .map(|(byte, freq)| freq * self.get(byte).map_or(0, |c| c.len() as u64))
            .sum()
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.iter().flatten().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

/// Concatenate the code of every byte and pack MSB-first, zero-padded.
pub fn encode(data: &[u8], codes: &CodeMap) -> Result<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(data.len());
    for &byte in data {
        let code = codes
            .get(byte)
            .ok_or_else(|| OxiPackError::unmapped_symbol(byte))?;
        writer.write_all(code.bits());
    }
    Ok(writer.finish())
}

/// Output of [`huffman_compress`].
#[derive(Debug, Clone)]
pub struct HuffmanEncoded {
    /// Packed bitstream.
    pub data: Vec<u8>,
    /// Frequencies the tree was built from.
    pub frequencies: FrequencyTable,
    /// Meaningful bits in `data` (padding excluded).
    pub bit_len: u64,
}

/// Count frequencies, build the tree and code map, and encode `data`.
pub fn huffman_compress(data: &[u8]) -> Result<HuffmanEncoded> {
    let frequencies = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::build(&frequencies);
    let codes = CodeMap::from_tree(&tree);
    let bit_len = codes.weighted_length(&frequencies);
    let packed = encode(data, &codes)?;

    debug!(
        "huffman: {} bytes, {} symbols, {} bits, longest code {}",
        data.len(),
        codes.len(),
        bit_len,
        codes.max_code_length()
    );

    Ok(HuffmanEncoded {
        data: packed,
        frequencies,
        bit_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(u8, u64)]) -> FrequencyTable {
        pairs.iter().copied().collect()
    }

    /// Optimal weighted length by repeatedly merging the two smallest weights.
    fn reference_cost(weights: &[u64]) -> u64 {
        let mut weights = weights.to_vec();
        let mut cost = 0;
        while weights.len() > 1 {
            weights.sort_unstable_by(|a, b| b.cmp(a));
            let a = weights.pop().unwrap_or(0);
            let b = weights.pop().unwrap_or(0);
            cost += a + b;
            weights.push(a + b);
        }
        cost
    }

    #[test]
    fn test_frequency_table() {
        let freqs = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(freqs.get(b'a'), 5);
        assert_eq!(freqs.get(b'b'), 2);
        assert_eq!(freqs.get(b'z'), 0);
        assert_eq!(freqs.distinct(), 5);
        assert_eq!(freqs.total(), 11);
        let bytes: Vec<u8> = freqs.iter().map(|(b, _)| b).collect();
        assert_eq!(bytes, b"abcdr");
    }

    #[test]
    fn test_merge_order_codes() {
        // a and b tie at 1 and merge first (a popped first, so left);
        // c then ties with that subtree and, being older, becomes the left child.
        let tree = HuffmanTree::build(&table(&[(b'a', 1), (b'b', 1), (b'c', 2)]));
        let codes = CodeMap::from_tree(&tree);
        assert_eq!(codes.get(b'c').map(Code::to_string), Some("0".into()));
        assert_eq!(codes.get(b'a').map(Code::to_string), Some("10".into()));
        assert_eq!(codes.get(b'b').map(Code::to_string), Some("11".into()));
    }

    #[test]
    fn test_textbook_frequencies() {
        let freqs = table(&[
            (b'A', 5),
            (b'B', 9),
            (b'C', 12),
            (b'D', 13),
            (b'E', 16),
            (b'F', 45),
        ]);
        let tree = HuffmanTree::build(&freqs);
        let codes = CodeMap::from_tree(&tree);

        assert_eq!(tree.total_frequency(), 100);
        assert_eq!(tree.leaf_count(), 6);
        assert_eq!(codes.weighted_length(&freqs), 224);
        assert_eq!(reference_cost(&[5, 9, 12, 13, 16, 45]), 224);
        assert_eq!(codes.get(b'F').map(Code::len), Some(1));
        assert_eq!(codes.get(b'A').map(Code::to_string), Some("1100".into()));
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_optimal_against_reference() {
        let inputs: [&[u8]; 4] = [
            b"the quick brown fox jumps over the lazy dog",
            b"aaaaaaaaaaaaaaaabbbbbbbbccccddef",
            b"mississippi river",
            &[0, 1, 1, 2, 2, 2, 3, 3, 3, 3, 255],
        ];
        for input in inputs {
            let freqs = FrequencyTable::from_bytes(input);
            let codes = CodeMap::from_tree(&HuffmanTree::build(&freqs));
            let weights: Vec<u64> = freqs.iter().map(|(_, f)| f).collect();
            assert_eq!(codes.weighted_length(&freqs), reference_cost(&weights));
            assert!(codes.is_prefix_free());
        }
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let freqs = FrequencyTable::from_bytes(b"zzzzzzzzzz");
        let tree = HuffmanTree::build(&freqs);
        let codes = CodeMap::from_tree(&tree);
        assert_eq!(codes.get(b'z').map(Code::to_string), Some("0".into()));

        let packed = encode(b"zzzzzzzzzz", &codes).unwrap();
        assert_eq!(packed, vec![0x00, 0x00]);
        assert_eq!(tree.decode(&packed, 10).unwrap(), b"zzzzzzzzzz");
    }

    #[test]
    fn test_empty_tree() {
        let tree = HuffmanTree::build(&FrequencyTable::new());
        assert!(tree.is_empty());
        let codes = CodeMap::from_tree(&tree);
        assert!(codes.is_empty());
        assert!(encode(b"", &codes).unwrap().is_empty());
        assert!(tree.decode(&[], 0).unwrap().is_empty());
        assert!(tree.decode(&[0xFF], 1).is_err());
    }

    #[test]
    fn test_encode_packs_msb_first() {
        let tree = HuffmanTree::build(&table(&[(b'a', 1), (b'b', 1), (b'c', 2)]));
        let codes = CodeMap::from_tree(&tree);
        // c a b c -> 0 10 11 0 -> 0101_1000
        assert_eq!(encode(b"cabc", &codes).unwrap(), vec![0b0101_1000]);
    }

    #[test]
    fn test_unmapped_symbol() {
        let codes = CodeMap::from_tree(&HuffmanTree::build(&FrequencyTable::from_bytes(b"ab")));
        assert!(matches!(
            encode(b"abc", &codes),
            Err(OxiPackError::UnmappedSymbol { byte: b'c' })
        ));
    }

    #[test]
    fn test_compress_decode_roundtrip() {
        let input = b"She sells sea shells by the sea shore".repeat(3);
        let encoded = huffman_compress(&input).unwrap();
        assert_eq!(encoded.data.len() as u64, encoded.bit_len.div_ceil(8));

        let tree = HuffmanTree::build(&encoded.frequencies);
        assert_eq!(tree.decode(&encoded.data, input.len()).unwrap(), input);
    }

    #[test]
    fn test_decode_truncated() {
        let input = b"abcdefgh";
        let encoded = huffman_compress(input).unwrap();
        let tree = HuffmanTree::build(&encoded.frequencies);
        let truncated = &encoded.data[..encoded.data.len() - 1];
        assert!(matches!(
            tree.decode(truncated, input.len()),
            Err(OxiPackError::UnexpectedEof { .. })
        ));
    }
}
