////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use crate::matchfinder::extend::extend;
use crate::matchfinder::hash::{load_u24, load_u32, u32_to_u24, Hashes};
use crate::matchfinder::{Match, MatchFinder, MIN_LOOKAHEAD, NO_POSITION};

impl MatchFinder<'_> {
    /// Find the longest match at `pos` that is longer than `best_len` bytes.
    ///
    /// `pos` is inserted into the index whether or not a match is found,
    /// unless fewer than 5 bytes remain from it, in which case nothing is
    /// searched or inserted.
    ///
    /// - `best_len`: only matches longer than this are reported
    /// - `max_len`: the longest permissible match at `pos`, at most the number
    ///   of bytes remaining
    /// - `nice_len`: stop searching once a match at least this long is found
    /// - `max_depth`: the number of chain nodes that may be inspected
    ///
    /// Returns the best length and its offset, or `best_len` with an offset
    /// of 0 if nothing longer was found.
    ///
    /// # Panics
    /// - `pos` was already visited by an earlier call
    /// - `max_len` reaches past the end of the buffer
    /// - `nice_len > max_len` or `max_depth == 0`
    pub fn longest_match(
        &mut self,
        pos: usize,
        mut best_len: u32,
        max_len: u32,
        nice_len: u32,
        max_depth: u32,
    ) -> Match {
        assert!(max_depth >= 1, "Search depth must be at least 1");
        assert!(
            nice_len <= max_len,
            "Nice length `{nice_len}` exceeds max length `{max_len}`"
        );
        assert!(
            pos + max_len as usize <= self.buffer.len(),
            "Max length `{max_len}` at position `{pos}` reaches past the end of the buffer"
        );

        let precomputed = self.advance(pos, 1);
        let buffer = self.buffer;
        let no_match = |best_len| Match {
            length: best_len,
            offset: 0,
        };

        // can we read 4 bytes from `pos + 1`?
        if max_len < MIN_LOOKAHEAD {
            return no_match(best_len);
        }

        let hashes = precomputed.unwrap_or_else(|| Hashes::at(buffer, pos));
        let (cur_node3, cur_node4) = self.index.insert(hashes, pos as u32);
        self.next_hashes = Some(Hashes::at(buffer, pos + 1));

        let mut best_pos = pos;
        let mut candidates = self
            .index
            .chain_from(cur_node4)
            .take(max_depth as usize)
            .map(|candidate| candidate as usize);

        if best_len < 4 {
            // every 4 byte match also shares the 3 byte bucket
            if cur_node3 == NO_POSITION {
                return no_match(best_len);
            }

            let seq4 = load_u32(buffer, pos);

            if best_len < 3 && load_u24(buffer, cur_node3 as usize) == u32_to_u24(seq4) {
                best_len = 3;
                best_pos = cur_node3 as usize;
            }

            let Some(matched) = candidates.find(|&candidate| load_u32(buffer, candidate) == seq4)
            else {
                return finish(pos, best_pos, best_len);
            };

            best_len = extend(buffer, pos, matched, 4, max_len);
            best_pos = matched;
            if best_len >= nice_len {
                return finish(pos, best_pos, best_len);
            }
        } else if best_len >= nice_len {
            return no_match(best_len);
        }

        // Already have a length 4+ match. A candidate can only be longer if
        // the byte that would extend the current best also matches, so check
        // that along with the first 4 bytes before extending.
        let seq4 = load_u32(buffer, pos);
        loop {
            let limit = best_len as usize;
            let Some(matched) = candidates.find(|&candidate| {
                buffer[candidate + limit] == buffer[pos + limit]
                    && load_u32(buffer, candidate) == seq4
            }) else {
                break;
            };

            let len = extend(buffer, pos, matched, 4, max_len);
            if len > best_len {
                best_len = len;
                best_pos = matched;
                if best_len >= nice_len {
                    break;
                }
            }
        }

        finish(pos, best_pos, best_len)
    }
}

#[inline(always)]
fn finish(pos: usize, best_pos: usize, best_len: u32) -> Match {
    Match {
        length: best_len,
        offset: (pos - best_pos) as u32,
    }
}
