////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use crate::matchfinder::hash::Hashes;
use crate::matchfinder::{MatchFinder, MIN_LOOKAHEAD};

impl MatchFinder<'_> {
    /// Insert `count` positions starting at `pos` without searching them.
    ///
    /// This is meant for the positions covered by a match the caller has
    /// already decided to take. Positions with fewer than 5 bytes remaining
    /// are not inserted, exactly as [`MatchFinder::longest_match`] would leave
    /// them out.
    ///
    /// # Panics
    /// - `count` is 0
    /// - `pos` was already visited by an earlier call
    /// - the range reaches past the end of the buffer
    pub fn skip_positions(&mut self, pos: usize, count: usize) {
        assert!(count > 0, "Skip count must be at least 1");
        let end_pos = self.buffer.len();
        assert!(
            pos + count <= end_pos,
            "Skipping `{count}` positions from `{pos}` reaches past the end of the buffer"
        );

        let precomputed = self.advance(pos, count);
        let buffer = self.buffer;

        // positions from here on cannot be hashed along with their successor
        let stop = (pos + count).min((end_pos + 1).saturating_sub(MIN_LOOKAHEAD as usize));
        if pos >= stop {
            return;
        }

        let mut hashes = precomputed.unwrap_or_else(|| Hashes::at(buffer, pos));
        for cur_pos in pos..stop {
            self.index.insert(hashes, cur_pos as u32);
            hashes = Hashes::at(buffer, cur_pos + 1);
        }

        if stop == pos + count {
            self.next_hashes = Some(hashes);
        }
    }
}
