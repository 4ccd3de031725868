//! LZ77 + Huffman integration tests.

use oxipack_core::bitstream::unpack_bits;
use oxipack_lzhuf::{
    ArtifactFormat, CodeMap, FrequencyTable, HuffmanTree, Lz77Config, Lz77Token, Lz77Tokenizer,
    decode_lzhuf, decode_tokens, detokenize, encode_lzhuf, encode_tokens, huffman::encode,
};

fn generate_random(size: usize, seed: u32) -> Vec<u8> {
    // Simple LCG random number generator
    let mut data = Vec::with_capacity(size);
    let mut seed = seed;
    for _ in 0..size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((seed >> 16) as u8);
    }
    data
}

fn generate_text_like(size: usize) -> Vec<u8> {
    let words: &[&[u8]] = &[
        b"the", b"quick", b"brown", b"fox", b"jumps", b"over", b"lazy", b"dog", b"and", b"runs",
    ];
    let mut data = Vec::with_capacity(size);
    let mut seed = 42u32;
    while data.len() < size {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        data.extend_from_slice(words[(seed as usize) % words.len()]);
        data.push(b' ');
    }
    data.truncate(size);
    data
}

fn corpus() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        b"A".to_vec(),
        b"abcabcabcabc".to_vec(),
        vec![0u8; 1000],
        vec![b'X'; 777],
        (0..=255).collect(),
        generate_random(4096, 12345),
        generate_random(300, 7),
        generate_text_like(8192),
        b"ab\0\0ab\0\0ab\0".to_vec(),
    ]
}

#[test]
fn test_capped_run_scenario() {
    let mut input = vec![b'a'; 17];
    input.extend_from_slice(b"bc");

    let tokens = Lz77Tokenizer::default().tokenize(&input);
    assert_eq!(
        tokens,
        vec![
            Lz77Token::literal(b'a'),
            Lz77Token::reference(1, 15, Some(b'a')),
            Lz77Token::literal(b'b'),
            Lz77Token::literal(b'c'),
        ]
    );
    assert_eq!(detokenize(&tokens).unwrap(), input);
}

#[test]
fn test_tokenize_roundtrip() {
    for config in [
        Lz77Config::default(),
        Lz77Config::new(1, 1),
        Lz77Config::new(4096, 255),
    ] {
        let tokenizer = Lz77Tokenizer::new(config).unwrap();
        for input in corpus() {
            let tokens = tokenizer.tokenize(&input);
            assert_eq!(detokenize(&tokens).unwrap(), input, "config {config:?}");
        }
    }
}

#[test]
fn test_token_count_bound() {
    let tokenizer = Lz77Tokenizer::default();
    for input in corpus() {
        let tokens = tokenizer.tokenize(&input);
        assert!(tokens.len() <= input.len());
        assert!(tokens.iter().all(|t| t.length as usize <= 15));
        assert!(tokens.iter().all(|t| t.offset as usize <= 256));
    }
}

#[test]
fn test_repetitive_input_compresses() {
    let input = vec![b'X'; 5000];
    let tokens = Lz77Tokenizer::default().tokenize(&input);
    // Every token after the first covers 16 bytes.
    assert_eq!(tokens.len(), 1 + (4999usize).div_ceil(16));
}

#[test]
fn test_token_records_roundtrip() {
    for input in corpus() {
        let tokens = Lz77Tokenizer::default().tokenize(&input);
        // Records alone cannot tell a trailing 0x00 after a match from "no literal".
        if tokens
            .last()
            .is_some_and(|t| !t.is_literal() && t.literal == Some(0))
        {
            continue;
        }
        let records = encode_tokens(&tokens);
        assert_eq!(records.len(), tokens.len() * 4);

        let decoded = decode_tokens(&records);
        assert_eq!(decoded, tokens);
        assert_eq!(detokenize(&decoded).unwrap(), input);
    }
}

#[test]
fn test_code_maps_are_prefix_free() {
    for input in corpus() {
        let records = encode_tokens(&Lz77Tokenizer::default().tokenize(&input));
        let codes = CodeMap::from_tree(&HuffmanTree::build(&FrequencyTable::from_bytes(&records)));
        assert!(codes.is_prefix_free());
    }
}

#[test]
fn test_degenerate_alphabet_unpacks_to_original_count() {
    let input = vec![0x42u8; 21];
    let codes = CodeMap::from_tree(&HuffmanTree::build(&FrequencyTable::from_bytes(&input)));
    let code = codes.get(0x42).unwrap();
    assert!(!code.is_empty());

    let packed = encode(&input, &codes).unwrap();
    assert_eq!(packed.len(), (21 * code.len()).div_ceil(8));

    let bits = unpack_bits(&packed, 21 * code.len()).unwrap();
    let symbols = bits.chunks(code.len()).filter(|c| *c == code.bits()).count();
    assert_eq!(symbols, 21);
}

#[test]
fn test_framed_roundtrip() {
    for input in corpus() {
        let output = encode_lzhuf(&input, &Lz77Config::default(), ArtifactFormat::Framed).unwrap();
        assert_eq!(decode_lzhuf(&output.compressed).unwrap(), input);
    }
}

#[test]
fn test_bare_and_framed_share_bitstream() {
    let input = generate_text_like(2048);
    let bare = encode_lzhuf(&input, &Lz77Config::default(), ArtifactFormat::Bare).unwrap();
    let framed = encode_lzhuf(&input, &Lz77Config::default(), ArtifactFormat::Framed).unwrap();

    assert_eq!(bare.tokens, framed.tokens);
    assert!(framed.compressed.ends_with(&bare.compressed));
    assert!(framed.compressed.len() > bare.compressed.len());
}

#[test]
fn test_text_compresses_below_original() {
    let input = generate_text_like(16 * 1024);
    let output = encode_lzhuf(&input, &Lz77Config::default(), ArtifactFormat::Bare).unwrap();
    assert!(
        output.compressed.len() < input.len(),
        "{} >= {}",
        output.compressed.len(),
        input.len()
    );
}
