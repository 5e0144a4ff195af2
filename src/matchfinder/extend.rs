////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use byteorder::{ByteOrder, LittleEndian};

const WORD_BYTES: usize = 8;

/// index of the first differing byte of two little endian words, if any
#[inline(always)]
fn first_difference(src: u64, cmp: u64) -> Option<usize> {
    let xor = src ^ cmp;

    if xor == 0 {
        None
    } else {
        Some((xor.trailing_zeros() / 8) as usize)
    }
}

/// Extend a match between `source` and the earlier `matched_pos`.
///
/// The first `len` bytes are already known to match. Returns the total number
/// of equal bytes, never more than `max_len`. Bytes are compared a word at a
/// time while a full word fits under `max_len`, then one by one.
#[inline]
pub fn extend(buffer: &[u8], source: usize, matched_pos: usize, len: u32, max_len: u32) -> u32 {
    debug_assert!(matched_pos < source);
    debug_assert!(len <= max_len);
    debug_assert!(source + max_len as usize <= buffer.len());

    let max_len = max_len as usize;
    let mut len = len as usize;

    while len + WORD_BYTES <= max_len {
        let src = LittleEndian::read_u64(&buffer[source + len..]);
        let cmp = LittleEndian::read_u64(&buffer[matched_pos + len..]);
        if let Some(found) = first_difference(src, cmp) {
            return (len + found) as u32;
        }
        len += WORD_BYTES;
    }

    len += buffer[source + len..source + max_len]
        .iter()
        .zip(&buffer[matched_pos + len..])
        .take_while(|(a, b)| a == b)
        .count();

    len as u32
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    fn naive(buffer: &[u8], source: usize, matched_pos: usize, max_len: usize) -> u32 {
        (0..max_len)
            .take_while(|&i| buffer[source + i] == buffer[matched_pos + i])
            .count() as u32
    }

    #[test]
    fn stops_at_first_difference() {
        let buffer = b"abcdefgh_abcdefgX_";
        assert_eq!(extend(buffer, 9, 0, 0, 9), 7);
    }

    #[test]
    fn respects_known_prefix() {
        let buffer = b"abcdabcd";
        assert_eq!(extend(buffer, 4, 0, 2, 4), 4);
    }

    #[test]
    fn bounded_by_max_len() {
        let buffer = [7u8; 64];
        assert_eq!(extend(&buffer, 1, 0, 0, 63), 63);
        assert_eq!(extend(&buffer, 20, 3, 4, 17), 17);
        assert_eq!(extend(&buffer, 20, 3, 9, 9), 9);
    }

    #[test]
    fn overlapping_run() {
        // an offset of 1 compares the run with itself shifted by a byte
        let buffer = b"aaaaaaaaaaaaaaaaaaaab";
        assert_eq!(extend(buffer, 1, 0, 0, 20), 19);
    }

    #[proptest]
    fn matches_bytewise_comparison(
        #[strategy(proptest::collection::vec(0..=2u8, 2..=200))] buffer: Vec<u8>,
        #[strategy(1..#buffer.len())] source: usize,
        #[strategy(0..#source)] matched_pos: usize,
    ) {
        let max_len = buffer.len() - source;
        let expected = naive(&buffer, source, matched_pos, max_len);
        prop_assert_eq!(extend(&buffer, source, matched_pos, 0, max_len as u32), expected);
    }
}
