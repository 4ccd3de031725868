//! Compression method selection.
//!
//! The host (CLI flag, interactive menu) picks a [`Method`] and hands it to
//! the pipeline as a plain value.

use crate::error::{OxiPackError, Result};
use std::fmt;
use std::str::FromStr;

/// Method chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// LZ77 tokenizer followed by Huffman coding.
    Lz77Huffman,
    /// Run-length coding into a decimal text stream.
    Rle,
    /// Leave the interactive loop.
    Exit,
}

impl Method {
    /// All methods, in menu order.
    pub const ALL: [Method; 3] = [Method::Lz77Huffman, Method::Rle, Method::Exit];

    /// Machine-readable tag (`lz77huffman`, `rle`, `exit`).
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Lz77Huffman => "lz77huffman",
            Self::Rle => "rle",
            Self::Exit => "exit",
        }
    }

    /// Human-readable label for menus and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Lz77Huffman => "LZ77 + Huffman",
            Self::Rle => "RLE",
            Self::Exit => "Exit",
        }
    }

    /// Number shown for this method in the numbered menu.
    pub fn menu_choice(&self) -> u32 {
        match self {
            Self::Lz77Huffman => 1,
            Self::Rle => 2,
            Self::Exit => 0,
        }
    }

    /// Map a numbered menu entry to a method.
    pub fn from_menu_choice(choice: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.menu_choice() == choice)
            .ok_or_else(|| OxiPackError::invalid_method(choice.to_string()))
    }

    /// Whether this method runs a codec.
    pub fn is_codec(&self) -> bool {
        !matches!(self, Self::Exit)
    }
}

impl FromStr for Method {
    type Err = OxiPackError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.tag() == normalized)
            .ok_or_else(|| OxiPackError::invalid_method(s))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
