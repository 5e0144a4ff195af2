////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use crate::matchfinder::MatchFinder;
use crate::parse::{ParseOptions, Token, MIN_MATCH_LEN};

/// Take the longest match available at every position
pub(crate) fn parse(finder: &mut MatchFinder, options: &ParseOptions, tokens: &mut Vec<Token>) {
    let buffer = finder.buffer();

    let mut i = 0;
    while i < buffer.len() {
        let (max_len, nice_len) = options.limits(buffer.len() - i);
        let found = finder
            .longest_match(i, MIN_MATCH_LEN - 1, max_len, nice_len, options.max_depth)
            .found(MIN_MATCH_LEN - 1);

        if let Some(found) = found {
            tokens.push(Token::Match {
                length: found.length,
                offset: found.offset,
            });
            let match_length = found.length as usize;
            finder.skip_positions(i + 1, match_length - 1);
            i += match_length;
        } else {
            tokens.push(Token::Literal(buffer[i]));
            i += 1;
        }
    }
}
