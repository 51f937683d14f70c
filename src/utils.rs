//! A collection of utilities for handling bit widths and packed sizes.

/// Returns a word with the lowest 'bits' bits set.
#[inline]
pub fn mask(bits: u32) -> u64 {
    if bits >= 64 {
        return u64::MAX;
    }
    (1u64 << bits) - 1
}

/// Returns the largest 32-bit value that fits in 'bits' bits. Widths above
/// 32 saturate, because every u32 fits in them.
#[inline]
pub fn value_mask(bits: u32) -> u32 {
    mask(bits).min(u32::MAX as u64) as u32
}

/// Returns the exact number of bytes needed to store 'count' values of
/// 'bits' bits each, when the values are placed back to back.
#[inline]
pub fn packed_len(bits: u32, count: usize) -> usize {
    let total_bits = bits as u64 * count as u64;
    (total_bits / 8 + u64::from(total_bits % 8 > 0)) as usize
}

/// Return true if 'len' is a whole number of blocks of 'granularity' items.
#[inline]
pub fn is_multiple_of(len: usize, granularity: usize) -> bool {
    granularity != 0 && len % granularity == 0
}

#[test]
fn test_mask() {
    assert_eq!(mask(0), 0);
    assert_eq!(mask(1), 1);
    assert_eq!(mask(3), 0b111);
    assert_eq!(mask(56), 0x00ff_ffff_ffff_ffff);
    assert_eq!(mask(64), u64::MAX);
}

#[test]
fn test_value_mask() {
    assert_eq!(value_mask(1), 1);
    assert_eq!(value_mask(31), 0x7fff_ffff);
    assert_eq!(value_mask(32), u32::MAX);
    assert_eq!(value_mask(56), u32::MAX);
}

#[test]
fn test_packed_len() {
    assert_eq!(packed_len(4, 16), 8);
    assert_eq!(packed_len(3, 8), 3);
    assert_eq!(packed_len(3, 5), 2);
    assert_eq!(packed_len(1, 1), 1);
    assert_eq!(packed_len(56, 1 << 25), 56 << 22);
    assert_eq!(packed_len(7, 0), 0);
}
