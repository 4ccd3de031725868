//! LZ77 + Huffman encoder.
//!
//! Input bytes are tokenized, the tokens serialized into 4-byte records, and
//! the record bytes Huffman-coded. The caller keeps the token list so it can
//! reconstruct the input without touching the compressed artifact.

use crate::frame::FrameHeader;
use crate::huffman::huffman_compress;
use crate::lz77::{Lz77Config, Lz77Token, Lz77Tokenizer};
use crate::token::encode_tokens;
use log::debug;
use oxipack_core::error::{OxiPackError, Result};

/// Shape of the compressed artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactFormat {
    /// Packed Huffman bitstream only. Cannot be decoded on its own.
    #[default]
    Bare,
    /// Bitstream preceded by a [`FrameHeader`].
    Framed,
}

/// Result of encoding one buffer.
#[derive(Debug, Clone)]
pub struct LzHufOutput {
    /// Compressed artifact in the requested format.
    pub compressed: Vec<u8>,
    /// Tokens produced by the tokenizer.
    pub tokens: Vec<Lz77Token>,
}

/// LZ77 + Huffman encoder.
#[derive(Debug, Clone, Default)]
pub struct LzHufEncoder {
    tokenizer: Lz77Tokenizer,
    format: ArtifactFormat,
}

impl LzHufEncoder {
    /// Create an encoder.
    pub fn new(config: Lz77Config, format: ArtifactFormat) -> Result<Self> {
        Ok(Self {
            tokenizer: Lz77Tokenizer::new(config)?,
            format,
        })
    }

    /// Artifact format produced by this encoder.
    pub fn format(&self) -> ArtifactFormat {
        self.format
    }

    /// Encode a buffer.
    pub fn encode(&self, input: &[u8]) -> Result<LzHufOutput> {
        let tokens = self.tokenizer.tokenize(input);
        let records = encode_tokens(&tokens);
        let huffman = huffman_compress(&records)?;

        let compressed = match self.format {
            ArtifactFormat::Bare => huffman.data,
            ArtifactFormat::Framed => {
                let token_count = u32::try_from(tokens.len()).map_err(|_| {
                    OxiPackError::invalid_header(format!(
                        "{} tokens do not fit in a frame",
                        tokens.len()
                    ))
                })?;
                let header = FrameHeader {
                    original_len: input.len() as u64,
                    token_count,
                    final_without_literal: tokens.last().is_some_and(|t| t.literal.is_none()),
                    frequencies: huffman.frequencies,
                };
                let mut out = Vec::with_capacity(header.encoded_len() + huffman.data.len());
                header.write(&mut out)?;
                out.extend_from_slice(&huffman.data);
                out
            }
        };

        debug!(
            "lz77+huffman: {} bytes -> {} tokens -> {} record bytes -> {} bytes ({:?})",
            input.len(),
            tokens.len(),
            records.len(),
            compressed.len(),
            self.format
        );

        Ok(LzHufOutput { compressed, tokens })
    }
}

/// Encode `input` with the given configuration and artifact format.
pub fn encode_lzhuf(
    input: &[u8],
    config: &Lz77Config,
    format: ArtifactFormat,
) -> Result<LzHufOutput> {
    LzHufEncoder::new(*config, format)?.encode(input)
}
