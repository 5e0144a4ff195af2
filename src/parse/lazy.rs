////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use crate::matchfinder::MatchFinder;
use crate::parse::{ParseOptions, Token, MIN_MATCH_LEN};

/// Before taking a match, check whether the next position has a longer one.
///
/// If it does, the current byte becomes a literal and the later match is
/// considered in turn, until the next position no longer improves on it or
/// the match reaches the nice length.
pub(crate) fn parse(finder: &mut MatchFinder, options: &ParseOptions, tokens: &mut Vec<Token>) {
    let buffer = finder.buffer();

    let mut i = 0;
    while i < buffer.len() {
        let (max_len, nice_len) = options.limits(buffer.len() - i);
        let found = finder
            .longest_match(i, MIN_MATCH_LEN - 1, max_len, nice_len, options.max_depth)
            .found(MIN_MATCH_LEN - 1);

        let Some(mut current) = found else {
            tokens.push(Token::Literal(buffer[i]));
            i += 1;
            continue;
        };

        let mut start = i;
        // first position after `start` that has not been visited
        let mut next = start + 1;
        while next < buffer.len() && current.length < options.limits(buffer.len() - start).1 {
            let (max_len, nice_len) = options.limits(buffer.len() - next);
            let later = finder
                .longest_match(next, current.length, max_len, nice_len, options.max_depth)
                .found(current.length);
            next += 1;

            match later {
                Some(later) => {
                    tokens.push(Token::Literal(buffer[start]));
                    start += 1;
                    current = later;
                }
                None => break,
            }
        }

        tokens.push(Token::Match {
            length: current.length,
            offset: current.offset,
        });
        let end = start + current.length as usize;
        if end > next {
            finder.skip_positions(next, end - next);
        }
        i = end;
    }
}

#[cfg(test)]
mod test {
    use crate::parse::{parse, CompressionLevel, ParseOptions, Strategy, Token};

    // "xabc" at 14 matches 4 bytes at 0, "abcdefgh" at 15 matches 8 bytes at 5
    const DEFERRED_MATCH: &[u8] = b"xabcQabcdefgh_xabcdefgh";

    fn options(strategy: Strategy) -> ParseOptions {
        ParseOptions {
            strategy,
            ..CompressionLevel::Default.into()
        }
    }

    #[test]
    fn greedy_takes_shorter_match() {
        let tokens = parse(DEFERRED_MATCH, options(Strategy::Greedy)).unwrap();
        assert_eq!(
            &tokens[tokens.len() - 2..],
            &[
                Token::Match {
                    length: 4,
                    offset: 14,
                },
                Token::Match {
                    length: 5,
                    offset: 10,
                },
            ]
        );
    }

    #[test]
    fn lazy_defers_to_longer_match() {
        let tokens = parse(DEFERRED_MATCH, options(Strategy::Lazy)).unwrap();
        assert_eq!(
            &tokens[tokens.len() - 2..],
            &[
                Token::Literal(b'x'),
                Token::Match {
                    length: 8,
                    offset: 10,
                },
            ]
        );
    }

    #[test]
    fn lazy_and_greedy_agree_without_better_match() {
        let input = b"abcdefgh_abcdefgh_abcdefgh";
        assert_eq!(
            parse(input, options(Strategy::Lazy)).unwrap(),
            parse(input, options(Strategy::Greedy)).unwrap()
        );
    }

    #[test]
    fn lazy_chain_of_improvements() {
        // at 16, 17 and 18 the matches are 3, 4 and 5 bytes long
        let input = b"pqr!qrst!rstuv!_pqrstuvw";
        let tokens = parse(input, options(Strategy::Lazy)).unwrap();
        assert_eq!(
            &tokens[tokens.len() - 4..],
            &[
                Token::Literal(b'p'),
                Token::Literal(b'q'),
                Token::Match {
                    length: 5,
                    offset: 9,
                },
                Token::Literal(b'w'),
            ]
        );
    }
}
