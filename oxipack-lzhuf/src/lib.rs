//! # OxiPack LZHuf
//!
//! Pure Rust LZ77 tokenizer feeding a Huffman entropy coder.
//!
//! The pipeline is:
//!
//! 1. [`lz77`]: greedy longest-match tokenizer (window 256, lookahead 15 by default)
//! 2. [`token`]: 4-byte token records
//! 3. [`huffman`]: optimal prefix code over the record bytes, packed MSB-first
//! 4. [`frame`]: optional header that makes the artifact decodable on its own
//!
//! ## Example
//!
//! ```rust
//! use oxipack_lzhuf::{ArtifactFormat, Lz77Config, decode_lzhuf, detokenize, encode_lzhuf};
//!
//! let input = b"aaaaaaaaaaaaaaaaabc";
//! let output = encode_lzhuf(input, &Lz77Config::default(), ArtifactFormat::Framed).unwrap();
//!
//! // In-memory reconstruction from the token list.
//! assert_eq!(detokenize(&output.tokens).unwrap(), input);
//!
//! // Reconstruction from the framed artifact alone.
//! assert_eq!(decode_lzhuf(&output.compressed).unwrap(), input);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;
pub mod frame;
pub mod huffman;
pub mod lz77;
pub mod token;

// Re-exports
pub use decode::decode_lzhuf;
pub use encode::{ArtifactFormat, LzHufEncoder, LzHufOutput, encode_lzhuf};
pub use frame::{FrameHeader, is_framed};
pub use huffman::{Code, CodeMap, FrequencyTable, HuffmanTree, huffman_compress};
pub use lz77::{Lz77Config, Lz77Token, Lz77Tokenizer, detokenize, tokenize};
pub use token::{decode_tokens, encode_tokens};
