//! Self-describing container for LZ77+Huffman artifacts.
//!
//! The bare artifact is only the packed Huffman bitstream and cannot be
//! decoded on its own. A framed artifact prefixes the bitstream with the
//! metadata needed to rebuild the tree and the token stream.
//!
//! # Layout
//!
//! ```text
//! Offset  Size  Field
//! 0       4     Magic "OXPK"
//! 4       1     Version (1)
//! 5       1     Flags (bit 0: final token carries no literal)
//! 6       8     Original length (big-endian)
//! 14      4     Token count (big-endian)
//! 18      2     Frequency entry count N (big-endian, 0..=256)
//! 20      5*N   Entries: byte value, frequency (big-endian u32)
//! 20+5N   ...   Packed Huffman bitstream
//! ```

use crate::huffman::FrequencyTable;
use crate::token::RECORD_SIZE;
use oxipack_core::error::{OxiPackError, Result};

/// Magic bytes at the start of a framed artifact.
pub const FRAME_MAGIC: [u8; 4] = *b"OXPK";

/// Current frame version.
pub const FRAME_VERSION: u8 = 1;

/// Size of the fixed part of the header.
pub const FIXED_HEADER_LEN: usize = 20;

/// Size of one frequency entry.
const ENTRY_LEN: usize = 5;

/// Flag: the last token ends the input without a literal.
const FLAG_FINAL_WITHOUT_LITERAL: u8 = 0x01;

/// Metadata stored in front of the packed bitstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    /// Length of the original input.
    pub original_len: u64,
    /// Number of LZ77 tokens in the bitstream.
    pub token_count: u32,
    /// Whether the last token has no trailing literal.
    pub final_without_literal: bool,
    /// Frequencies of the token-record bytes the tree was built from.
    pub frequencies: FrequencyTable,
}

impl FrameHeader {
    /// Encoded size of this header.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_LEN + self.frequencies.distinct() * ENTRY_LEN
    }

    /// Append the header to `out`.
    pub fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        out.reserve(self.encoded_len());
        out.extend_from_slice(&FRAME_MAGIC);
        out.push(FRAME_VERSION);
        out.push(if self.final_without_literal {
            FLAG_FINAL_WITHOUT_LITERAL
        } else {
            0
        });
        out.extend_from_slice(&self.original_len.to_be_bytes());
        out.extend_from_slice(&self.token_count.to_be_bytes());
        out.extend_from_slice(&(self.frequencies.distinct() as u16).to_be_bytes());

        for (byte, freq) in self.frequencies.iter() {
            let freq = u32::try_from(freq).map_err(|_| {
                OxiPackError::invalid_header(format!(
                    "frequency {freq} of byte {byte:#04x} does not fit in 32 bits"
                ))
            })?;
            out.push(byte);
            out.extend_from_slice(&freq.to_be_bytes());
        }

        Ok(())
    }

    /// Parse a header, returning it and the offset of the bitstream.
    pub fn parse(data: &[u8]) -> Result<(Self, usize)> {
        if !is_framed(data) {
            let found = &data[..data.len().min(FRAME_MAGIC.len())];
            return Err(OxiPackError::invalid_magic(FRAME_MAGIC, found));
        }
        if data.len() < FIXED_HEADER_LEN {
            return Err(OxiPackError::unexpected_eof(FIXED_HEADER_LEN - data.len()));
        }

        let version = data[4];
        if version != FRAME_VERSION {
            return Err(OxiPackError::invalid_header(format!(
                "unsupported frame version {version}"
            )));
        }

        let flags = data[5];
        if flags & !FLAG_FINAL_WITHOUT_LITERAL != 0 {
            return Err(OxiPackError::invalid_header(format!(
                "unknown flags {flags:#04x}"
            )));
        }

        let original_len = u64::from_be_bytes(read_array(data, 6)?);
        let token_count = u32::from_be_bytes(read_array(data, 14)?);
        let entry_count = u16::from_be_bytes(read_array(data, 18)?) as usize;
        if entry_count > 256 {
            return Err(OxiPackError::invalid_header(format!(
                "{entry_count} frequency entries, at most 256 allowed"
            )));
        }

        let entries_end = FIXED_HEADER_LEN + entry_count * ENTRY_LEN;
        if data.len() < entries_end {
            return Err(OxiPackError::unexpected_eof(entries_end - data.len()));
        }

        let mut frequencies = FrequencyTable::new();
        for entry in data[FIXED_HEADER_LEN..entries_end].chunks_exact(ENTRY_LEN) {
            let byte = entry[0];
            let freq = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]);
            if freq == 0 || frequencies.get(byte) != 0 {
                return Err(OxiPackError::invalid_header(format!(
                    "bad frequency entry for byte {byte:#04x}"
                )));
            }
            frequencies.add(byte, freq as u64);
        }

        let expected_symbols = token_count as u64 * RECORD_SIZE as u64;
        if frequencies.total() != expected_symbols {
            return Err(OxiPackError::invalid_header(format!(
                "frequencies sum to {}, expected {} for {} tokens",
                frequencies.total(),
                expected_symbols,
                token_count
            )));
        }

        let header = Self {
            original_len,
            token_count,
            final_without_literal: flags & FLAG_FINAL_WITHOUT_LITERAL != 0,
            frequencies,
        };
        Ok((header, entries_end))
    }
}

/// Whether `data` starts with the frame magic.
pub fn is_framed(data: &[u8]) -> bool {
    data.starts_with(&FRAME_MAGIC)
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    data.get(offset..offset + N)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| OxiPackError::unexpected_eof(N))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> FrameHeader {
        let frequencies: FrequencyTable = [(0u8, 5u64), (b'a', 2), (1, 1)].into_iter().collect();
        FrameHeader {
            original_len: 9,
            token_count: 2,
            final_without_literal: true,
            frequencies,
        }
    }

    #[test]
    fn test_header_layout() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();

        assert_eq!(&out[..4], b"OXPK");
        assert_eq!(out[4], FRAME_VERSION);
        assert_eq!(out[5], 0x01);
        assert_eq!(&out[6..14], &9u64.to_be_bytes());
        assert_eq!(&out[14..18], &2u32.to_be_bytes());
        assert_eq!(&out[18..20], &3u16.to_be_bytes());
        assert_eq!(&out[20..25], &[0, 0, 0, 0, 5]);
        assert_eq!(out.len(), sample_header().encoded_len());
    }

    #[test]
    fn test_header_parse() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();
        out.extend_from_slice(&[0xAA, 0xBB]);

        let (header, offset) = FrameHeader::parse(&out).unwrap();
        assert_eq!(header, sample_header());
        assert_eq!(&out[offset..], &[0xAA, 0xBB]);
    }

    #[test]
    fn test_bad_magic() {
        assert!(matches!(
            FrameHeader::parse(b"PK\x03\x04rest"),
            Err(OxiPackError::InvalidMagic { .. })
        ));
        assert!(!is_framed(b"OXP"));
    }

    #[test]
    fn test_bad_version_and_flags() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();

        let mut bad_version = out.clone();
        bad_version[4] = 9;
        assert!(matches!(
            FrameHeader::parse(&bad_version),
            Err(OxiPackError::InvalidHeader { .. })
        ));

        let mut bad_flags = out;
        bad_flags[5] = 0x80;
        assert!(FrameHeader::parse(&bad_flags).is_err());
    }

    #[test]
    fn test_truncated_header() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();
        assert!(matches!(
            FrameHeader::parse(&out[..12]),
            Err(OxiPackError::UnexpectedEof { .. })
        ));
        assert!(matches!(
            FrameHeader::parse(&out[..out.len() - 1]),
            Err(OxiPackError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_frequency_sum_checked() {
        let mut header = sample_header();
        header.token_count = 3;
        let mut out = Vec::new();
        header.write(&mut out).unwrap();
        assert!(matches!(
            FrameHeader::parse(&out),
            Err(OxiPackError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();
        // Make the second entry repeat the first byte value.
        out[25] = out[20];
        assert!(FrameHeader::parse(&out).is_err());
    }
}
