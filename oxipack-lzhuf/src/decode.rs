//! LZ77 + Huffman decoder for framed artifacts.

use crate::frame::{FrameHeader, is_framed};
use crate::huffman::HuffmanTree;
use crate::lz77::detokenize;
use crate::token::{decode_tokens, encoded_len};
use log::debug;
use oxipack_core::error::{OxiPackError, Result};

/// Reconstruct the original bytes from a framed artifact.
///
/// A bare artifact carries neither the tree nor the lengths needed to
/// decode it and is rejected with [`OxiPackError::MissingDecodePath`]. So is
/// a bare bitstream that happens to begin with the frame magic: anything
/// whose header does not parse is treated as bare.
pub fn decode_lzhuf(artifact: &[u8]) -> Result<Vec<u8>> {
    if !is_framed(artifact) {
        return Err(OxiPackError::missing_decode_path(
            "decoding a bare LZ77+Huffman artifact",
        ));
    }

    let (header, payload_offset) = FrameHeader::parse(artifact).map_err(|err| {
        OxiPackError::missing_decode_path(format!(
            "decoding an LZ77+Huffman artifact without a valid frame header ({err})"
        ))
    })?;
    let record_len = encoded_len(header.token_count as usize);

    let tree = HuffmanTree::build(&header.frequencies);
    let records = tree.decode(&artifact[payload_offset..], record_len)?;

    let mut tokens = decode_tokens(&records);
    if let Some(last) = tokens.last_mut() {
        if header.final_without_literal {
            last.literal = None;
        } else if last.literal.is_none() {
            // Record decoding guessed a sentinel; the header says it is a real 0x00.
            last.literal = Some(0);
        }
    }

    let output = detokenize(&tokens)?;
    if output.len() as u64 != header.original_len {
        return Err(OxiPackError::corrupted(
            payload_offset as u64,
            format!(
                "decoded {} bytes, header records {}",
                output.len(),
                header.original_len
            ),
        ));
    }

    debug!(
        "decoded framed artifact: {} tokens -> {} bytes",
        tokens.len(),
        output.len()
    );
    Ok(output)
}
