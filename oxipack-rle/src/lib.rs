//! # OxiPack RLE
//!
//! Pure Rust textual run-length coder.
//!
//! ## Example
//!
//! ```rust
//! use oxipack_rle::{decode, encode};
//!
//! let text = encode(b"aaabbbccd");
//! assert_eq!(text, b"a3b3c2d1");
//! assert_eq!(decode(&text).unwrap(), b"aaabbbccd");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod policy;

// Re-exports
pub use codec::{check_round_trippable, decode, decode_with_limit, encode};
pub use policy::{RleEncoder, RlePolicy};
