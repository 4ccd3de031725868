//! LZ77 tokenizer.
//!
//! Every step emits one `(offset, length, literal)` triple: a back-reference
//! into already-seen input followed by the byte that broke the match.
//!
//! # Algorithm
//!
//! At cursor `i` the tokenizer scans every backward offset in
//! `1..=min(i, window)` in ascending order and measures how many bytes match,
//! capped at `lookahead` and at the end of the input. The match source may
//! run past the cursor, which lets a single token describe a run. Only a
//! strictly longer match replaces the current best, so among equal lengths
//! the smallest offset wins. The cursor then advances by `length + 1`.

use log::trace;
use oxipack_core::error::{OxiPackError, Result};

/// Default search window in bytes.
pub const DEFAULT_WINDOW: usize = 256;

/// Default maximum match length.
pub const DEFAULT_LOOKAHEAD: usize = 15;

/// Largest window the 16-bit token offset can address.
pub const MAX_WINDOW: usize = u16::MAX as usize;

/// Largest lookahead the 8-bit token length can hold.
pub const MAX_LOOKAHEAD: usize = u8::MAX as usize;

/// A token produced by the LZ77 tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz77Token {
    /// Backward distance into already-decoded output (0 for a pure literal).
    pub offset: u16,
    /// Number of bytes to copy from `offset`.
    pub length: u8,
    /// Byte emitted after the copy; `None` when the copy reaches the end of input.
    pub literal: Option<u8>,
}

impl Lz77Token {
    /// A pure-literal token.
    pub fn literal(byte: u8) -> Self {
        Self {
            offset: 0,
            length: 0,
            literal: Some(byte),
        }
    }

    /// A back-reference followed by an optional literal.
    pub fn reference(offset: u16, length: u8, literal: Option<u8>) -> Self {
        Self {
            offset,
            length,
            literal,
        }
    }

    /// Whether this token carries no back-reference.
    pub fn is_literal(&self) -> bool {
        self.offset == 0 && self.length == 0
    }

    /// Number of output bytes this token produces.
    pub fn decoded_len(&self) -> usize {
        self.length as usize + usize::from(self.literal.is_some())
    }
}

/// Tokenizer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz77Config {
    /// Maximum backward distance searched for a match.
    pub window: usize,
    /// Maximum match length per token.
    pub lookahead: usize,
}

impl Lz77Config {
    /// Create a configuration. Call [`validate`](Self::validate) before use.
    pub fn new(window: usize, lookahead: usize) -> Self {
        Self { window, lookahead }
    }

    /// Check that the parameters fit the 4-byte token record.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 || self.window > MAX_WINDOW {
            return Err(OxiPackError::invalid_config(format!(
                "window must be in 1..={}, got {}",
                MAX_WINDOW, self.window
            )));
        }
        if self.lookahead == 0 || self.lookahead > MAX_LOOKAHEAD {
            return Err(OxiPackError::invalid_config(format!(
                "lookahead must be in 1..={}, got {}",
                MAX_LOOKAHEAD, self.lookahead
            )));
        }
        Ok(())
    }
}

impl Default for Lz77Config {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_LOOKAHEAD)
    }
}

/// Greedy longest-match LZ77 tokenizer.
#[derive(Debug, Clone)]
pub struct Lz77Tokenizer {
    config: Lz77Config,
}

impl Lz77Tokenizer {
    /// Create a tokenizer, rejecting out-of-range parameters.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &Lz77Config {
        &self.config
    }

    /// Find the longest match at `pos`, returning `(offset, length)`.
    fn find_match(&self, input: &[u8], pos: usize) -> (usize, usize) {
        let max_len = self.config.lookahead.min(input.len() - pos);
        let mut best_len = 0;
        let mut best_offset = 0;

        for offset in 1..=pos.min(self.config.window) {
            let start = pos - offset;
            let mut len = 0;
            while len < max_len && input[start + len] == input[pos + len] {
                len += 1;
            }

            if len > best_len {
                best_len = len;
                best_offset = offset;
                if len == max_len {
                    break;
                }
            }
        }

        (best_offset, best_len)
    }

    /// Tokenize the whole input.
    pub fn tokenize(&self, input: &[u8]) -> Vec<Lz77Token> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < input.len() {
            let (offset, length) = self.find_match(input, pos);
            let literal = input.get(pos + length).copied();

            // Lz77Config::validate bounds offset and length to the field widths.
            tokens.push(Lz77Token::reference(offset as u16, length as u8, literal));
            pos += length + 1;
        }

        trace!(
            "tokenized {} bytes into {} tokens (window {}, lookahead {})",
            input.len(),
            tokens.len(),
            self.config.window,
            self.config.lookahead
        );
        tokens
    }
}

impl Default for Lz77Tokenizer {
    fn default() -> Self {
        Self {
            config: Lz77Config::default(),
        }
    }
}

/// Tokenize `input` with the given configuration.
pub fn tokenize(input: &[u8], config: &Lz77Config) -> Result<Vec<Lz77Token>> {
    Ok(Lz77Tokenizer::new(*config)?.tokenize(input))
}

/// Rebuild the original bytes from a token sequence.
///
/// Copies run one byte at a time so a token may read bytes it has just
/// produced. A token whose offset points before the start of the output
/// (or a zero offset with a non-zero length) is rejected with
/// [`OxiPackError::MalformedTokenStream`].
pub fn detokenize(tokens: &[Lz77Token]) -> Result<Vec<u8>> {
    let capacity = tokens.iter().map(Lz77Token::decoded_len).sum();
    let mut output = Vec::with_capacity(capacity);

    for (index, token) in tokens.iter().enumerate() {
        if !token.is_literal() {
            let offset = token.offset as usize;
            let length = token.length as usize;
            if offset == 0 || offset > output.len() {
                return Err(OxiPackError::malformed_tokens(
                    index,
                    offset,
                    length,
                    output.len(),
                ));
            }

            let start = output.len() - offset;
            for i in 0..length {
                let byte = output[start + i];
                output.push(byte);
            }
        }

        if let Some(byte) = token.literal {
            output.push(byte);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_tokens(input: &[u8]) -> Vec<Lz77Token> {
        Lz77Tokenizer::default().tokenize(input)
    }

    #[test]
    fn test_literals_only() {
        let tokens = default_tokens(b"abc");
        assert_eq!(
            tokens,
            vec![
                Lz77Token::literal(b'a'),
                Lz77Token::literal(b'b'),
                Lz77Token::literal(b'c'),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(default_tokens(b"").is_empty());
        assert!(detokenize(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_overlapping_run() {
        // "a" then a self-overlapping copy of 4 bytes, then 'b'.
        let tokens = default_tokens(b"aaaaab");
        assert_eq!(
            tokens,
            vec![
                Lz77Token::literal(b'a'),
                Lz77Token::reference(1, 4, Some(b'b')),
            ]
        );
        assert_eq!(detokenize(&tokens).unwrap(), b"aaaaab");
    }

    #[test]
    fn test_match_reaching_end_has_no_literal() {
        let tokens = default_tokens(b"abab");
        assert_eq!(tokens.last(), Some(&Lz77Token::reference(2, 2, None)));
        assert_eq!(detokenize(&tokens).unwrap(), b"abab");
    }

    #[test]
    fn test_ties_keep_smallest_offset() {
        // At position 6 both offset 3 and offset 6 match "xy"; offset 3 is
        // scanned first and a later equal-length match does not replace it.
        let tokens = default_tokens(b"xyQxyRxy!");
        assert_eq!(tokens[3], Lz77Token::reference(3, 2, Some(b'R')));
        assert_eq!(tokens.last(), Some(&Lz77Token::reference(3, 2, Some(b'!'))));
    }

    #[test]
    fn test_window_limits_search() {
        let tokenizer = Lz77Tokenizer::new(Lz77Config::new(2, 15)).unwrap();
        // The repeat of "abc" is 3 bytes back, outside a 2-byte window.
        let tokens = tokenizer.tokenize(b"abcabc");
        assert!(tokens.iter().all(Lz77Token::is_literal));
    }

    #[test]
    fn test_lookahead_caps_length() {
        let input = vec![b'z'; 40];
        let tokenizer = Lz77Tokenizer::new(Lz77Config::new(256, 4)).unwrap();
        let tokens = tokenizer.tokenize(&input);
        assert!(tokens.iter().all(|t| t.length <= 4));
        assert_eq!(detokenize(&tokens).unwrap(), input);
    }

    #[test]
    fn test_detokenize_rejects_offset_beyond_history() {
        let tokens = [
            Lz77Token::literal(b'a'),
            Lz77Token::reference(5, 3, Some(b'b')),
        ];
        let err = detokenize(&tokens).unwrap_err();
        assert!(matches!(
            err,
            OxiPackError::MalformedTokenStream {
                index: 1,
                offset: 5,
                length: 3,
                available: 1,
            }
        ));
    }

    #[test]
    fn test_detokenize_rejects_zero_offset_copy() {
        let tokens = [Lz77Token::reference(0, 2, Some(b'x'))];
        assert!(matches!(
            detokenize(&tokens),
            Err(OxiPackError::MalformedTokenStream { offset: 0, .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        assert!(Lz77Config::default().validate().is_ok());
        assert!(Lz77Config::new(0, 15).validate().is_err());
        assert!(Lz77Config::new(65_536, 15).validate().is_err());
        assert!(Lz77Config::new(65_535, 255).validate().is_ok());
        assert!(Lz77Config::new(256, 0).validate().is_err());
        assert!(Lz77Config::new(256, 256).validate().is_err());
        assert!(tokenize(b"abc", &Lz77Config::new(256, 300)).is_err());
    }

    #[test]
    fn test_decoded_len() {
        assert_eq!(Lz77Token::literal(1).decoded_len(), 1);
        assert_eq!(Lz77Token::reference(3, 5, None).decoded_len(), 5);
        assert_eq!(Lz77Token::reference(3, 5, Some(0)).decoded_len(), 6);
    }
}
