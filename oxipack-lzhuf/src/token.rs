//! Fixed-width token serialization.
//!
//! Each [`Lz77Token`] is written as a 4-byte record:
//!
//! ```text
//! +-------------+------------+--------+---------+
//! | offset high | offset low | length | literal |
//! +-------------+------------+--------+---------+
//! ```
//!
//! The "no literal" sentinel is written as `0x00`. When reading, a `0x00`
//! literal is taken as the sentinel only on the final record and only if
//! that record is a back-reference, which is the one place the tokenizer
//! produces a sentinel. Trailing bytes that do not form a whole record are
//! dropped.

use crate::lz77::Lz77Token;
use log::debug;

/// Size of one serialized token in bytes.
pub const RECORD_SIZE: usize = 4;

/// Serialize tokens into 4-byte records.
pub fn encode_tokens(tokens: &[Lz77Token]) -> Vec<u8> {
    let mut data = Vec::with_capacity(encoded_len(tokens.len()));
    for token in tokens {
        data.extend_from_slice(&token.offset.to_be_bytes());
        data.push(token.length);
        data.push(token.literal.unwrap_or(0));
    }
    data
}

/// Deserialize tokens from 4-byte records, ignoring a partial trailing record.
pub fn decode_tokens(data: &[u8]) -> Vec<Lz77Token> {
    let records = data.chunks_exact(RECORD_SIZE);
    if !records.remainder().is_empty() {
        debug!(
            "dropping {} trailing bytes that do not form a token record",
            records.remainder().len()
        );
    }

    let count = data.len() / RECORD_SIZE;
    records
        .enumerate()
        .map(|(i, record)| {
            let offset = u16::from_be_bytes([record[0], record[1]]);
            let length = record[2];
            let is_reference = offset != 0 || length != 0;
            let literal = if i + 1 == count && is_reference && record[3] == 0 {
                None
            } else {
                Some(record[3])
            };
            Lz77Token::reference(offset, length, literal)
        })
        .collect()
}

/// Number of bytes [`encode_tokens`] produces for `token_count` tokens.
pub fn encoded_len(token_count: usize) -> usize {
    token_count * RECORD_SIZE
}
