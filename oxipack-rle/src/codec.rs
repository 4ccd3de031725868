//! Textual run-length coding.
//!
//! Each maximal run of identical bytes becomes the byte itself followed by
//! the run length in ASCII decimal, with no separator:
//!
//! ```text
//! "aaabbbccd" -> "a3b3c2d1"
//! ```
//!
//! The format cannot tell a digit run byte apart from its count, so inputs
//! containing ASCII digits do not survive a round trip. See
//! [`check_round_trippable`].

use oxipack_core::error::{OxiPackError, Result};

/// Encode data as RLE text.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        let mut run_len = 1;

        // Count consecutive identical bytes
        while i + run_len < data.len() && data[i + run_len] == byte {
            run_len += 1;
        }

        result.push(byte);
        result.extend_from_slice(run_len.to_string().as_bytes());
        i += run_len;
    }

    result
}

/// Decode RLE text.
///
/// The first byte of each pair is taken as the run byte even when it is a
/// digit; every ASCII digit after it belongs to the count.
pub fn decode(text: &[u8]) -> Result<Vec<u8>> {
    decode_with_limit(text, usize::MAX)
}

/// Decode RLE text, refusing to produce more than `max_len` bytes.
///
/// A run that would push the output past `max_len` is reported as
/// [`OxiPackError::MalformedRleStream`] before any of it is written.
pub fn decode_with_limit(text: &[u8], max_len: usize) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(text.len().min(max_len));
    let mut i = 0;

    while i < text.len() {
        let byte = text[i];
        i += 1;

        let digits_start = i;
        let mut count: usize = 0;
        while i < text.len() && text[i].is_ascii_digit() {
            count = count
                .checked_mul(10)
                .and_then(|c| c.checked_add(usize::from(text[i] - b'0')))
                .ok_or_else(|| OxiPackError::malformed_rle(digits_start, "run length overflows"))?;
            i += 1;
        }

        if i == digits_start {
            return Err(OxiPackError::malformed_rle(
                digits_start,
                format!("missing run length after byte {byte:#04x}"),
            ));
        }

        if count > max_len - result.len() {
            return Err(OxiPackError::malformed_rle(
                digits_start,
                format!("run length {count} exceeds the {max_len}-byte output limit"),
            ));
        }

        result.try_reserve(count).map_err(|_| {
            OxiPackError::malformed_rle(digits_start, format!("run length {count} is too large"))
        })?;
        result.resize(result.len() + count, byte);
    }

    Ok(result)
}

/// Check that `data` survives an encode/decode round trip.
///
/// Fails with [`OxiPackError::NonRoundTrippableRleInput`] at the first ASCII
/// digit.
pub fn check_round_trippable(data: &[u8]) -> Result<()> {
    match data.iter().position(u8::is_ascii_digit) {
        Some(position) => Err(OxiPackError::rle_digit(position, data[position])),
        None => Ok(()),
    }
}
