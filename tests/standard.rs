////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use std::iter;

use lzmatch::CompressionLevel::{Best, Default, Fast, Fastest};
use lzmatch::{expand, parse, CompressionLevel, ParseOptions, Parser, Token};
use paste::paste;
use rand::prelude::*;

const SAMPLE_LENGTH: usize = 64 * 1024;

fn random_sample() -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    iter::repeat_with(|| rng.gen::<u8>())
        .take(SAMPLE_LENGTH)
        .collect()
}

fn repeating_sample() -> Vec<u8> {
    (0..=255).cycle().take(SAMPLE_LENGTH).collect()
}

fn zeros_sample() -> Vec<u8> {
    vec![0; SAMPLE_LENGTH]
}

// words drawn from a small vocabulary, roughly the redundancy of prose
fn text_sample() -> Vec<u8> {
    const WORDS: [&str; 12] = [
        "the ", "match ", "finder ", "hash ", "chain ", "of ", "positions ", "and ", "a ",
        "longest ", "offset ", "buffer ",
    ];
    let mut rng = StdRng::seed_from_u64(0x7E47);
    let mut out = Vec::with_capacity(SAMPLE_LENGTH);
    while out.len() < SAMPLE_LENGTH {
        out.extend_from_slice(WORDS[rng.gen_range(0..WORDS.len())].as_bytes());
    }
    out.truncate(SAMPLE_LENGTH);
    out
}

fn test_sample_symmetrical(input: &[u8], level: CompressionLevel) {
    let tokens = parse(input, level.into()).expect("Failed to parse sample");
    let expanded = expand(&tokens).expect("Failed to expand tokens");
    assert!(
        expanded == input,
        "Expanded output didn't match pre-parse input"
    );
}

fn test_sample_matches_are_valid(input: &[u8], level: CompressionLevel) {
    let options: ParseOptions = level.into();
    let tokens = parse(input, options).expect("Failed to parse sample");
    let mut position = 0;
    for token in &tokens {
        if let Token::Match { length, offset } = *token {
            let length = length as usize;
            let matched = position - offset as usize;
            assert!(length >= 3 && length <= options.max_match_len as usize);
            assert_eq!(
                input[position..position + length],
                input[matched..matched + length]
            );
        }
        position += token.len();
    }
    assert_eq!(position, input.len());
}

fn test_sample_deterministic(input: &[u8], level: CompressionLevel) {
    let mut parser = Parser::new(input.len());
    let first = parser.parse(input, level.into()).expect("Failed to parse sample");
    let second = parser.parse(input, level.into()).expect("Failed to parse sample");
    assert!(first == second, "Repeated parse produced different tokens");
}

macro_rules! sample_test_final {
    ($name:ident, $level:ident) => {
        paste! {
            #[test]
            #[allow(nonstandard_style)]
            fn [<integration_ $name _ $level _symmetrically_parses>]() {
                test_sample_symmetrical(&[<$name _sample>](), $level);
            }

            #[test]
            #[allow(nonstandard_style)]
            fn [<integration_ $name _ $level _matches_are_valid>]() {
                test_sample_matches_are_valid(&[<$name _sample>](), $level);
            }

            #[test]
            #[allow(nonstandard_style)]
            fn [<integration_ $name _ $level _is_deterministic>]() {
                test_sample_deterministic(&[<$name _sample>](), $level);
            }
        }
    };
}

macro_rules! sample_test {
    ($name:ident) => {
        sample_test_final!($name, Fastest);
        sample_test_final!($name, Fast);
        sample_test_final!($name, Default);
        sample_test_final!($name, Best);
    };
}

sample_test!(random);
sample_test!(repeating);
sample_test!(zeros);
sample_test!(text);

#[test]
fn redundant_input_parses_to_few_tokens() {
    let tokens = parse(&zeros_sample(), Best.into()).unwrap();
    // one literal, maximum length matches, and a tail too short to search
    assert_eq!(tokens.len(), 1 + SAMPLE_LENGTH / 258 + 3);

    let tokens = parse(&text_sample(), Default.into()).unwrap();
    assert!(tokens.len() < SAMPLE_LENGTH / 4);
}
