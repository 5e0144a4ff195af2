////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use byteorder::{ByteOrder, LittleEndian};

/// log2 of the number of buckets in the length 3 table
pub const HASH3_ORDER: u32 = 15;
/// log2 of the number of buckets in the length 4+ head table
pub const HASH4_ORDER: u32 = 16;

const HASH_MULTIPLIER: u32 = 0x1E35_A7BD;

/// Multiplicative hash of `seq`, reduced to `order` bits.
#[inline(always)]
pub fn lz_hash(seq: u32, order: u32) -> u32 {
    debug_assert!(order > 0 && order <= 32);
    seq.wrapping_mul(HASH_MULTIPLIER) >> (32 - order)
}

/// The 4 bytes at `pos` as a little endian integer
#[inline(always)]
pub(crate) fn load_u32(buffer: &[u8], pos: usize) -> u32 {
    LittleEndian::read_u32(&buffer[pos..pos + 4])
}

/// The 3 bytes at `pos` as a little endian integer
#[inline(always)]
pub(crate) fn load_u24(buffer: &[u8], pos: usize) -> u32 {
    LittleEndian::read_u24(&buffer[pos..pos + 3])
}

/// Truncate a loaded 4 byte window to its first 3 bytes
#[inline(always)]
pub(crate) fn u32_to_u24(seq: u32) -> u32 {
    seq & 0x00FF_FFFF
}

/// Bucket indices of the 3 and 4 byte windows beginning at one position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Hashes {
    pub hash3: usize,
    pub hash4: usize,
}

impl Hashes {
    /// Requires 4 readable bytes at `pos`.
    #[inline(always)]
    pub fn at(buffer: &[u8], pos: usize) -> Self {
        let seq4 = load_u32(buffer, pos);
        Self {
            hash3: lz_hash(u32_to_u24(seq4), HASH3_ORDER) as usize,
            hash4: lz_hash(seq4, HASH4_ORDER) as usize,
        }
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    #[proptest]
    fn hash_fits_order(seq: u32, #[strategy(1..=32u32)] order: u32) {
        let hash = u64::from(lz_hash(seq, order));
        prop_assert!(hash < 1u64 << order);
    }

    #[proptest]
    fn hash3_ignores_fourth_byte(
        #[strategy(proptest::collection::vec(any::<u8>(), 4..=4))] window: Vec<u8>,
        other: u8,
    ) {
        let mut changed = window.clone();
        changed[3] = other;
        prop_assert_eq!(Hashes::at(&window, 0).hash3, Hashes::at(&changed, 0).hash3);
    }

    #[test]
    fn loads_are_little_endian() {
        let buffer = [0x01, 0x02, 0x03, 0x04, 0x05];
        assert_eq!(load_u32(&buffer, 0), 0x0403_0201);
        assert_eq!(load_u32(&buffer, 1), 0x0504_0302);
        assert_eq!(load_u24(&buffer, 2), 0x0005_0403);
        assert_eq!(u32_to_u24(load_u32(&buffer, 0)), load_u24(&buffer, 0));
    }

    #[test]
    fn known_bucket_values() {
        // "ABC" and "ABCX" windows
        let buffer = b"ABCXABCYZ";
        assert_eq!(
            Hashes::at(buffer, 0),
            Hashes {
                hash3: 13226,
                hash4: 24405,
            }
        );
        assert_eq!(Hashes::at(buffer, 4).hash3, Hashes::at(buffer, 0).hash3);
        assert_ne!(Hashes::at(buffer, 4).hash4, Hashes::at(buffer, 0).hash4);
    }
}
