//! # OxiPack
//!
//! Pure Rust LZ77 + Huffman and RLE compression.
//!
//! This crate ties the codecs together behind a single [`Pipeline`]:
//!
//! - **LZ77 + Huffman**: greedy LZ77 tokens, serialized and Huffman-coded
//! - **RLE**: byte + decimal run length text
//!
//! ## Example
//!
//! ```rust
//! use oxipack::{Method, Outcome, Pipeline};
//!
//! let pipeline = Pipeline::default();
//! match pipeline.compress(Method::Rle, b"aaabbbccd").unwrap() {
//!     Outcome::Completed(artifacts) => {
//!         assert_eq!(artifacts.compressed, b"a3b3c2d1");
//!         assert_eq!(artifacts.decompressed, b"aaabbbccd");
//!     }
//!     Outcome::Exit => unreachable!(),
//! }
//! ```
//!
//! ## Decoding artifacts
//!
//! The default LZ77 + Huffman artifact is a bare bitstream and cannot be
//! decoded on its own. Set [`PipelineOptions::artifact`] to
//! [`ArtifactFormat::Framed`] to get an artifact that
//! [`Pipeline::decompress`] accepts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod pipeline;

// Re-exports
pub use oxipack_core::{CompressionReport, Method, OxiPackError, Result};
pub use oxipack_lzhuf::{ArtifactFormat, Lz77Config};
pub use oxipack_rle::RlePolicy;
pub use pipeline::{
    Artifacts, Outcome, Pipeline, PipelineOptions, RLE_RECONSTRUCTION_FACTOR,
    RLE_RECONSTRUCTION_FLOOR, rle_reconstruction_limit,
};
