////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! Hash chain matchfinding.
//!
//! Every position of the input is identified by its offset into the buffer.
//! The hash of the first 4 bytes at a position selects a bucket of the head
//! table, and the bucket holds the most recent position with that hash. The
//! link table stores, for each position, the head that was replaced when it
//! was inserted, so following links from a head visits all earlier positions
//! in the same bucket from newest to oldest. Since positions are only ever
//! prepended in increasing order, each chain is sorted by decreasing position
//! and a search always finds the closest candidates first.
//!
//! Length 3 matches are handled by a separate table without chains that only
//! remembers the most recent position for each 3 byte hash. Short matches
//! are usually only worth encoding at small offsets, so a single close
//! candidate is enough.
//!
//! A position can only be inserted when at least 5 bytes remain from it:
//! the 4 byte window at the position itself is hashed, and the window at the
//! next position is hashed ahead of time for the next call.

mod extend;
pub mod hash;
mod search;
mod skip;

use log::{debug, trace};

use crate::matchfinder::hash::{Hashes, HASH3_ORDER, HASH4_ORDER};

/// Marks an empty bucket or the end of a chain
pub(crate) const NO_POSITION: u32 = u32::MAX;

/// Number of bytes that must remain from a position for it to be inserted
pub const MIN_LOOKAHEAD: u32 = 5;

/// Result of [`MatchFinder::longest_match`]
///
/// If the search did not find anything longer than the `best_len` it was
/// given, `length` is that `best_len` and `offset` is 0. An offset of 0 is not
/// a valid match; use [`Match::found`] to tell the two cases apart.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Match {
    pub length: u32,
    pub offset: u32,
}

impl Match {
    /// Whether this result is a real match longer than `best_len`
    #[must_use]
    pub fn improves_on(self, best_len: u32) -> bool {
        self.length > best_len && self.offset != 0
    }

    /// This result as an option, `None` when it did not improve on `best_len`
    #[must_use]
    pub fn found(self, best_len: u32) -> Option<Match> {
        self.improves_on(best_len).then_some(self)
    }
}

/// The tables of a hash chain matchfinder, sized for buffers up to a fixed
/// capacity.
///
/// The index is allocated once and reused: [`MatchIndex::scan`] clears it and
/// binds it to the next input.
pub struct MatchIndex {
    /// most recent position for each 3 byte hash
    hash3_tab: Box<[u32]>,
    /// first node of the chain for each 4 byte hash
    hash4_tab: Box<[u32]>,
    /// next (older) node of the chain containing each position
    next_tab: Box<[u32]>,
}

impl MatchIndex {
    /// Allocate an index for buffers of up to `max_bufsize` bytes.
    ///
    /// # Panics
    /// Panics if `max_bufsize` is not below `u32::MAX`, since positions are
    /// stored as `u32` and `u32::MAX` is reserved as the end of chain marker.
    #[must_use]
    pub fn new(max_bufsize: usize) -> Self {
        assert!(
            max_bufsize < NO_POSITION as usize,
            "Match index capacity `{max_bufsize}` does not fit in a u32 position"
        );

        let index = Self {
            hash3_tab: vec![NO_POSITION; 1 << HASH3_ORDER].into_boxed_slice(),
            hash4_tab: vec![NO_POSITION; 1 << HASH4_ORDER].into_boxed_slice(),
            next_tab: vec![NO_POSITION; max_bufsize].into_boxed_slice(),
        };
        debug!(
            "allocated match index for {max_bufsize} bytes ({} bytes of tables)",
            index.memory_usage()
        );
        index
    }

    /// Largest buffer this index can be bound to
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.next_tab.len()
    }

    /// Number of bytes held by the tables
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        (self.hash3_tab.len() + self.hash4_tab.len() + self.next_tab.len())
            * std::mem::size_of::<u32>()
    }

    /// Clear every bucket and link
    pub fn reset(&mut self) {
        trace!("resetting match index");
        self.hash3_tab.fill(NO_POSITION);
        self.hash4_tab.fill(NO_POSITION);
        self.next_tab.fill(NO_POSITION);
    }

    /// Reset the index and bind it to `buffer` for one forward scan.
    ///
    /// # Panics
    /// Panics if `buffer` is longer than [`MatchIndex::capacity`].
    pub fn scan<'a>(&'a mut self, buffer: &'a [u8]) -> MatchFinder<'a> {
        assert!(
            buffer.len() <= self.capacity(),
            "Buffer of `{}` bytes exceeds match index capacity of `{}` bytes",
            buffer.len(),
            self.capacity()
        );
        self.reset();
        MatchFinder {
            index: self,
            buffer,
            next_pos: 0,
            next_hashes: None,
        }
    }

    /// Positions in the chain of the length 4+ bucket `bucket`, newest first
    ///
    /// # Panics
    /// Panics if `bucket` is not below `1 << HASH4_ORDER`.
    #[must_use]
    pub fn chain(&self, bucket: usize) -> ChainIter<'_> {
        self.chain_from(self.hash4_tab[bucket])
    }

    pub(crate) fn chain_from(&self, head: u32) -> ChainIter<'_> {
        ChainIter {
            next_tab: &self.next_tab,
            cur_position: head,
        }
    }

    /// Record `pos` as the newest entry of both of its buckets.
    ///
    /// Returns the previous occupants of the length 3 bucket and the length 4
    /// head bucket.
    #[inline(always)]
    pub(crate) fn insert(&mut self, hashes: Hashes, pos: u32) -> (u32, u32) {
        let cur_node3 = self.hash3_tab[hashes.hash3];
        let cur_node4 = self.hash4_tab[hashes.hash4];

        self.hash3_tab[hashes.hash3] = pos;
        self.hash4_tab[hashes.hash4] = pos;
        self.next_tab[pos as usize] = cur_node4;

        (cur_node3, cur_node4)
    }
}

impl std::fmt::Debug for MatchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchIndex")
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

/// Iterator over the positions of one hash chain, newest to oldest
#[derive(Clone)]
pub struct ChainIter<'a> {
    next_tab: &'a [u32],
    cur_position: u32,
}

impl Iterator for ChainIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur_position == NO_POSITION {
            return None;
        }
        let position = self.cur_position;
        self.cur_position = self.next_tab[position as usize];
        Some(position)
    }
}

/// A [`MatchIndex`] bound to one input buffer.
///
/// Positions must be visited in strictly increasing order, each one either
/// searched with [`MatchFinder::longest_match`] or inserted with
/// [`MatchFinder::skip_positions`].
pub struct MatchFinder<'a> {
    index: &'a mut MatchIndex,
    buffer: &'a [u8],
    /// first position that has not been visited yet
    next_pos: usize,
    /// hashes computed ahead of time for the position `next_pos`
    next_hashes: Option<Hashes>,
}

impl<'a> MatchFinder<'a> {
    #[must_use]
    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    #[must_use]
    pub fn index(&self) -> &MatchIndex {
        self.index
    }

    /// Claim `count` positions starting at `pos` and take the hashes for `pos`
    /// if they were computed ahead of time.
    fn advance(&mut self, pos: usize, count: usize) -> Option<Hashes> {
        assert!(
            pos >= self.next_pos,
            "Position `{pos}` was already visited; positions must be strictly increasing"
        );
        let hashes = self.next_hashes.take().filter(|_| pos == self.next_pos);
        self.next_pos = pos + count;
        hashes
    }
}

impl std::fmt::Debug for MatchFinder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchFinder")
            .field("index", &self.index)
            .field("buffer_len", &self.buffer.len())
            .field("next_pos", &self.next_pos)
            .finish_non_exhaustive()
    }
}
