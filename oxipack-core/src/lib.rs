//! # OxiPack Core
//!
//! Core components shared by the OxiPack codecs.
//!
//! - [`bitstream`]: MSB-first bit packer used by the Huffman coder
//! - [`method`]: Method selection (`lz77huffman`, `rle`, `exit`)
//! - [`report`]: Compression ratio reporting
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Host                                                │
//! │     CLI, interactive menu, file I/O                     │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Pipeline                                            │
//! │     Method dispatch, artifacts, framed container        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Codec                                               │
//! │     LZ77 tokenizer, token codec, Huffman, RLE           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L0: Core (this crate)                                   │
//! │     Bit packer, errors, method, report                  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipack_core::{BitWriter, CompressionReport, Method};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b1, 1);
//! assert_eq!(writer.finish(), vec![0x80]);
//!
//! let method: Method = "rle".parse().unwrap();
//! assert_eq!(method, Method::Rle);
//!
//! let report = CompressionReport::new(100, 40).unwrap();
//! assert_eq!(report.reduction_percent().round(), 60.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod method;
pub mod report;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiPackError, Result};
pub use method::Method;
pub use report::CompressionReport;
