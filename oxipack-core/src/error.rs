//! Error types for OxiPack operations.
//!
//! Every crate in the workspace reports failures through [`OxiPackError`].
//! Codec errors are local and recoverable: they carry enough context
//! (offending offset, position, operation name) to diagnose the input
//! without aborting the host process.

use std::io;
use thiserror::Error;

/// The main error type for OxiPack operations.
#[derive(Debug, Error)]
pub enum OxiPackError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source buffer could not be obtained or is empty.
    #[error("Input unavailable ({source_name}): {reason}")]
    IoUnavailable {
        /// Name of the source (usually a file path).
        source_name: String,
        /// Why the input could not be used.
        reason: String,
    },

    /// Unrecognized method tag or menu choice.
    #[error("Invalid method selection: {selection:?} (expected lz77huffman, rle or exit)")]
    InvalidMethodSelection {
        /// The rejected selection, verbatim.
        selection: String,
    },

    /// A token references history that has not been produced yet.
    #[error(
        "Malformed token stream: token {index} copies {length} bytes from offset {offset}, \
         but only {available} bytes of history exist"
    )]
    MalformedTokenStream {
        /// Index of the offending token.
        index: usize,
        /// Backward distance requested by the token.
        offset: usize,
        /// Copy length requested by the token.
        length: usize,
        /// Bytes of output produced before the token.
        available: usize,
    },

    /// RLE input contains an ASCII digit, which the text format cannot
    /// distinguish from a run length.
    #[error("Input is not RLE round-trippable: digit byte {byte:#04x} at position {position}")]
    NonRoundTrippableRleInput {
        /// Position of the first digit byte.
        position: usize,
        /// The digit byte.
        byte: u8,
    },

    /// Malformed RLE text stream.
    #[error("Malformed RLE stream at position {position}: {message}")]
    MalformedRleStream {
        /// Byte position in the encoded text.
        position: usize,
        /// Description of the problem.
        message: String,
    },

    /// The requested decode path does not exist for this artifact.
    #[error("Missing decode path: {operation} is not supported (artifact carries no decoding metadata)")]
    MissingDecodePath {
        /// Name of the unsupported operation.
        operation: String,
    },

    /// A byte has no entry in the Huffman code map.
    #[error("Byte {byte:#04x} has no Huffman code")]
    UnmappedSymbol {
        /// The unmapped byte.
        byte: u8,
    },

    /// Invalid Huffman code encountered while decoding.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// Invalid magic number in an artifact header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Invalid header format.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Unexpected end of data.
    #[error("Unexpected end of data: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Corrupted data in an artifact.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where corruption was detected.
        offset: u64,
        /// Description of the corruption.
        message: String,
    },

    /// Invalid codec configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Sizes passed to the compression report are not positive.
    #[error("Cannot compute compression ratio: original {original} bytes, compressed {compressed} bytes")]
    InvalidSizes {
        /// Original size in bytes.
        original: u64,
        /// Compressed size in bytes.
        compressed: u64,
    },
}

/// Result type alias for OxiPack operations.
pub type Result<T> = std::result::Result<T, OxiPackError>;

impl OxiPackError {
    /// Create an input unavailable error.
    pub fn io_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::IoUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid method selection error.
    pub fn invalid_method(selection: impl Into<String>) -> Self {
        Self::InvalidMethodSelection {
            selection: selection.into(),
        }
    }

    /// Create a malformed token stream error.
    pub fn malformed_tokens(index: usize, offset: usize, length: usize, available: usize) -> Self {
        Self::MalformedTokenStream {
            index,
            offset,
            length,
            available,
        }
    }

    /// Create a non-round-trippable RLE input error.
    pub fn rle_digit(position: usize, byte: u8) -> Self {
        Self::NonRoundTrippableRleInput { position, byte }
    }

    /// Create a malformed RLE stream error.
    pub fn malformed_rle(position: usize, message: impl Into<String>) -> Self {
        Self::MalformedRleStream {
            position,
            message: message.into(),
        }
    }

    /// Create a missing decode path error.
    pub fn missing_decode_path(operation: impl Into<String>) -> Self {
        Self::MissingDecodePath {
            operation: operation.into(),
        }
    }

    /// Create an unmapped symbol error.
    pub fn unmapped_symbol(byte: u8) -> Self {
        Self::UnmappedSymbol { byte }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: u64, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid sizes error.
    pub fn invalid_sizes(original: u64, compressed: u64) -> Self {
        Self::InvalidSizes {
            original,
            compressed,
        }
    }
}
