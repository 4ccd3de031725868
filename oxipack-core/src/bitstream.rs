//! Bit packing for Huffman bitstreams.
//!
//! OxiPack packs bits MSB-first: the first bit written lands in the most
//! significant bit of the first byte, so a bit string such as `"01000001"`
//! becomes the byte `0x41`. The final byte is padded with zero bits.
//!
//! # Example
//!
//! ```
//! use oxipack_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3);
//! writer.write_bits(0b1100, 4);
//! let data = writer.finish();
//! assert_eq!(data, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&data);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{OxiPackError, Result};

/// MSB-first bit writer backed by a `Vec<u8>`.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Completed bytes.
    output: Vec<u8>,
    /// Pending bits, left-aligned at bit 7.
    current: u8,
    /// Number of pending bits in `current`.
    bits_in_current: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.current |= (bit as u8) << (7 - self.bits_in_current);
        self.bits_in_current += 1;
        self.total_bits_written += 1;

        if self.bits_in_current == 8 {
            self.output.push(self.current);
            self.current = 0;
            self.bits_in_current = 0;
        }
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    /// Write a sequence of bits in order.
    pub fn write_all(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.write_bit(bit);
        }
    }

    /// Number of zero bits [`finish`](Self::finish) will append.
    pub fn padding_bits(&self) -> u8 {
        if self.bits_in_current == 0 {
            0
        } else {
            8 - self.bits_in_current
        }
    }

    /// Pad the final byte with zeros and return the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_in_current > 0 {
            self.output.push(self.current);
        }
        self.output
    }
}

/// MSB-first bit reader over a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Total bits read (also the read position).
    position: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current bit position.
    pub fn bit_position(&self) -> u64 {
        self.position
    }

    /// Bits left in the input, padding included.
    pub fn bits_remaining(&self) -> u64 {
        self.data.len() as u64 * 8 - self.position
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte_index = (self.position / 8) as usize;
        let byte = *self
            .data
            .get(byte_index)
            .ok_or_else(|| OxiPackError::unexpected_eof(1))?;
        let bit = (byte >> (7 - (self.position % 8) as u8)) & 1 == 1;
        self.position += 1;
        Ok(bit)
    }

    /// Read `count` bits (at most 32), most significant first.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if self.bits_remaining() < count as u64 {
            return Err(OxiPackError::unexpected_eof(
                (count as u64 - self.bits_remaining()).div_ceil(8) as usize,
            ));
        }

        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }
}

/// Pack a bit sequence into bytes, zero-padding the last byte.
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(bits.len().div_ceil(8));
    writer.write_all(bits);
    writer.finish()
}

/// Unpack the first `count` bits of `data`.
pub fn unpack_bits(data: &[u8], count: usize) -> Result<Vec<bool>> {
    let mut reader = BitReader::new(data);
    let mut bits = Vec::with_capacity(count);
    for _ in 0..count {
        bits.push(reader.read_bit()?);
    }
    Ok(bits)
}
