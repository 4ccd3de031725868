//! Method dispatch over the codecs.
//!
//! A [`Pipeline`] takes one input buffer and a [`Method`] and produces two
//! artifacts: the compressed form and a reconstruction of the input.
//!
//! For LZ77 + Huffman the reconstruction comes from the in-memory token
//! list, not from the compressed artifact; the two are produced side by
//! side. For RLE the reconstruction is the decode of the RLE text, capped at
//! [`rle_reconstruction_limit`] bytes.

use log::{debug, info};
use oxipack_core::error::{OxiPackError, Result};
use oxipack_core::method::Method;
use oxipack_lzhuf::{ArtifactFormat, LzHufEncoder, Lz77Config, decode_lzhuf, detokenize};
use oxipack_rle::{RleEncoder, RlePolicy, check_round_trippable};

/// Minimum output cap for the RLE reconstruction.
pub const RLE_RECONSTRUCTION_FLOOR: usize = 1 << 20;

/// Maximum RLE reconstruction size as a multiple of the input size.
pub const RLE_RECONSTRUCTION_FACTOR: usize = 16;

/// Largest RLE reconstruction [`Pipeline::compress`] will produce for an
/// input of `input_len` bytes.
///
/// Digit-free input reconstructs to exactly `input_len` bytes and is never
/// affected. Input with digits can decode to far larger runs.
pub fn rle_reconstruction_limit(input_len: usize) -> usize {
    input_len
        .saturating_mul(RLE_RECONSTRUCTION_FACTOR)
        .max(RLE_RECONSTRUCTION_FLOOR)
}

/// Pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineOptions {
    /// LZ77 window and lookahead.
    pub lz77: Lz77Config,
    /// Shape of the LZ77 + Huffman artifact.
    pub artifact: ArtifactFormat,
    /// Handling of digit bytes in RLE input.
    pub rle_policy: RlePolicy,
}

impl PipelineOptions {
    /// Check the options.
    pub fn validate(&self) -> Result<()> {
        self.lz77.validate()
    }
}

/// The two artifacts of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Compressed artifact.
    pub compressed: Vec<u8>,
    /// Reconstructed input.
    pub decompressed: Vec<u8>,
}

/// Result of [`Pipeline::compress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A codec ran.
    Completed(Artifacts),
    /// [`Method::Exit`] was selected; nothing was produced.
    Exit,
}

impl Outcome {
    /// Artifacts of a completed run.
    pub fn artifacts(&self) -> Option<&Artifacts> {
        match self {
            Self::Completed(artifacts) => Some(artifacts),
            Self::Exit => None,
        }
    }
}

/// Compression pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    lzhuf: LzHufEncoder,
    rle: RleEncoder,
}

impl Pipeline {
    /// Create a pipeline, validating the options.
    pub fn new(options: PipelineOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            lzhuf: LzHufEncoder::new(options.lz77, options.artifact)?,
            rle: RleEncoder::new(options.rle_policy),
        })
    }

    /// Run `method` over `input`.
    ///
    /// An empty input fails with [`OxiPackError::IoUnavailable`] whatever
    /// the method. An RLE reconstruction that would overrun
    /// [`rle_reconstruction_limit`] fails with
    /// [`OxiPackError::NonRoundTrippableRleInput`] at the first digit.
    pub fn compress(&self, method: Method, input: &[u8]) -> Result<Outcome> {
        if input.is_empty() {
            return Err(OxiPackError::io_unavailable("input", "input is empty"));
        }

        let artifacts = match method {
            Method::Exit => return Ok(Outcome::Exit),
            Method::Lz77Huffman => {
                let output = self.lzhuf.encode(input)?;
                let decompressed = detokenize(&output.tokens)?;
                Artifacts {
                    compressed: output.compressed,
                    decompressed,
                }
            }
            Method::Rle => {
                let compressed = self.rle.encode(input)?;
                let limit = rle_reconstruction_limit(input.len());
                let decompressed = oxipack_rle::decode_with_limit(&compressed, limit)
                    .map_err(|err| check_round_trippable(input).err().unwrap_or(err))?;
                Artifacts {
                    compressed,
                    decompressed,
                }
            }
        };

        info!(
            "{}: {} bytes -> {} bytes compressed, {} bytes reconstructed",
            method,
            input.len(),
            artifacts.compressed.len(),
            artifacts.decompressed.len()
        );
        Ok(Outcome::Completed(artifacts))
    }

    /// Reconstruct the input from a compressed artifact alone.
    ///
    /// Only framed LZ77 + Huffman artifacts can be decoded; a bare one fails
    /// with [`OxiPackError::MissingDecodePath`].
    pub fn decompress(&self, method: Method, artifact: &[u8]) -> Result<Vec<u8>> {
        let output = match method {
            Method::Lz77Huffman => decode_lzhuf(artifact)?,
            Method::Rle => oxipack_rle::decode(artifact)?,
            Method::Exit => return Err(OxiPackError::invalid_method(method.tag())),
        };
        debug!(
            "{}: {} byte artifact -> {} bytes",
            method,
            artifact.len(),
            output.len()
        );
        Ok(output)
    }
}
