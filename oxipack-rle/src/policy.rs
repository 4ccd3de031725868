//! Handling of inputs the RLE text format cannot represent.

use crate::codec::{check_round_trippable, encode};
use log::{debug, warn};
use oxipack_core::error::{OxiPackError, Result};

/// What to do with input that contains ASCII digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RlePolicy {
    /// Encode anyway and log a warning. The decoded text will differ.
    #[default]
    Lenient,
    /// Refuse to encode.
    Strict,
}

/// RLE encoder with a digit policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RleEncoder {
    policy: RlePolicy,
}

impl RleEncoder {
    /// Create an encoder with the given policy.
    pub fn new(policy: RlePolicy) -> Self {
        Self { policy }
    }

    /// Policy used by this encoder.
    pub fn policy(&self) -> RlePolicy {
        self.policy
    }

    /// Encode `data` as RLE text, applying the digit policy first.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        if let Err(err) = check_round_trippable(data) {
            match self.policy {
                RlePolicy::Strict => return Err(err),
                RlePolicy::Lenient => {
                    if let OxiPackError::NonRoundTrippableRleInput { position, byte } = err {
                        warn!(
                            "RLE input has digit {:?} at position {}; decoded output will not match",
                            byte as char, position
                        );
                    }
                }
            }
        }

        let encoded = encode(data);
        debug!("rle: {} bytes -> {} bytes", data.len(), encoded.len());
        Ok(encoded)
    }
}
