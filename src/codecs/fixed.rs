//! Fixed-width bit packing.
//!
//! Every value is stored using exactly 'bits' bits, back to back, with no
//! padding other than the unused high bits of the final byte. The packed size
//! of N values is therefore exactly ceil(bits * N / 8) bytes.
//!
//! Decoding works on blocks of eight values. Eight values of 'bits' bits
//! occupy exactly 'bits' bytes, so every block starts on a byte boundary and
//! can be decoded by a routine that is specialized for its width. The
//! routines live in a static table that is indexed once, when the codec is
//! created, which keeps the per-element loop free of width branches.

use crate::bitstream::{BitWriter, MAX_BITS};
use crate::error::BenchError;
use crate::utils::{is_multiple_of, packed_len};
use crate::{Codec, Semantics};
use std::ops::RangeInclusive;

/// Number of values decoded by one call to a block routine.
pub const BLOCK_LEN: usize = 8;

/// The widths supported by the fixed-width layout.
pub const WIDTHS: RangeInclusive<u32> = 1..=MAX_BITS;

/// Decodes one block of BLOCK_LEN values from 'input' into 'output'.
pub type BlockUnpackFn = fn(input: &[u8], output: &mut [u32]);

/// Decode eight values of BITS bits each from the first BITS bytes of
/// 'input'.
fn unpack_block<const BITS: usize>(input: &[u8], output: &mut [u32]) {
    let input = &input[..BITS];
    let mask = (1u64 << BITS) - 1;
    let mut window: u64 = 0;
    let mut avail = 0;
    let mut pos = 0;

    for slot in output[..BLOCK_LEN].iter_mut() {
        // Refill whole bytes. 'avail' stays below 64 because BITS <= 56.
        while avail < BITS {
            window |= (input[pos] as u64) << avail;
            pos += 1;
            avail += 8;
        }
        *slot = (window & mask) as u32;
        window >>= BITS;
        avail -= BITS;
    }
    debug_assert_eq!(avail, 0);
}

macro_rules! block_unpackers {
    ($($bits:literal)*) => {
        [$(unpack_block::<$bits> as BlockUnpackFn,)*]
    };
}

/// Maps 'bits - 1' to the block routine for that width.
static BLOCK_UNPACKERS: [BlockUnpackFn; MAX_BITS as usize] = block_unpackers!(
    1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27
    28 29 30 31 32 33 34 35 36 37 38 39 40 41 42 43 44 45 46 47 48 49 50 51
    52 53 54 55 56
);

/// Returns the block routine specialized for 'bits', or None if the width is
/// not supported.
pub fn block_unpacker(bits: u32) -> Option<BlockUnpackFn> {
    BLOCK_UNPACKERS
        .get((bits as usize).wrapping_sub(1))
        .copied()
}

fn check_width(bits: u32) -> Result<BlockUnpackFn, BenchError> {
    block_unpacker(bits).ok_or(BenchError::UnsupportedWidth {
        codec: FixedWidthPacker::NAME,
        bits,
    })
}

fn check_granularity(len: usize) -> Result<(), BenchError> {
    if !is_multiple_of(len, BLOCK_LEN) {
        return Err(BenchError::GranularityError {
            codec: FixedWidthPacker::NAME,
            len,
            granularity: BLOCK_LEN,
        });
    }
    Ok(())
}

/// Write 'src' into 'output' using 'bits' bits per value, and return the
/// number of bytes written. Any number of values is accepted.
pub(crate) fn pack_values(src: &[u32], bits: u32, output: &mut Vec<u8>) -> usize {
    output.clear();
    output.reserve(packed_len(bits, src.len()));
    let mut writer = BitWriter::new(output);
    for val in src {
        writer.push(*val as u64, bits);
    }
    writer.finish()
}

/// Decode the full blocks of 'input' with 'unpacker' into 'output'. The
/// number of decoded values is 'output.len()', which must be a multiple of
/// BLOCK_LEN.
pub(crate) fn unpack_blocks(
    unpacker: BlockUnpackFn,
    bits: u32,
    input: &[u8],
    output: &mut [u32],
) -> Result<(), BenchError> {
    let stride = bits as usize;
    debug_assert!(output.len() % BLOCK_LEN == 0);
    let needed = output.len() / BLOCK_LEN * stride;
    if input.len() < needed {
        return Err(BenchError::TruncatedInput {
            codec: FixedWidthPacker::NAME,
            needed,
            actual: input.len(),
        });
    }
    for (block, packed) in output
        .chunks_exact_mut(BLOCK_LEN)
        .zip(input.chunks_exact(stride))
    {
        unpacker(packed, block);
    }
    Ok(())
}

/// Pack 'src' into 'output' with 'bits' bits per value. Returns the number of
/// bytes written, which is exactly ceil(bits * src.len() / 8).
pub fn pack(
    src: &[u32],
    bits: u32,
    output: &mut Vec<u8>,
) -> Result<usize, BenchError> {
    check_width(bits)?;
    check_granularity(src.len())?;
    Ok(pack_values(src, bits, output))
}

/// Decode 'count' values of 'bits' bits from 'input' into 'output',
/// replacing its previous content.
pub fn unpack(
    input: &[u8],
    bits: u32,
    count: usize,
    output: &mut Vec<u32>,
) -> Result<(), BenchError> {
    let unpacker = check_width(bits)?;
    check_granularity(count)?;
    output.resize(count, 0);
    unpack_blocks(unpacker, bits, input, output)
}

/// A codec instance that packs values with a fixed width.
pub struct FixedWidthPacker {
    bits: u32,
    /// The block routine for 'bits', picked at construction.
    unpacker: BlockUnpackFn,
    /// The packed stream.
    compressed: Vec<u8>,
    /// The output of the last unpack.
    decoded: Vec<u32>,
}

impl FixedWidthPacker {
    pub const NAME: &'static str = "sserialize";

    pub fn new(bits: u32) -> Result<Self, BenchError> {
        Ok(Self {
            bits,
            unpacker: check_width(bits)?,
            compressed: Vec::new(),
            decoded: Vec::new(),
        })
    }

    /// The packed stream written by the last call to 'pack'.
    pub fn compressed(&self) -> &[u8] {
        &self.compressed
    }
}

impl Codec for FixedWidthPacker {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bits(&self) -> u32 {
        self.bits
    }

    fn supported_widths(&self) -> RangeInclusive<u32> {
        WIDTHS
    }

    fn granularity(&self) -> usize {
        BLOCK_LEN
    }

    fn semantics(&self) -> Semantics {
        Semantics::Identity
    }

    fn exact_len(&self, count: usize) -> Option<usize> {
        Some(packed_len(self.bits, count))
    }

    fn pack(&mut self, src: &[u32]) -> Result<usize, BenchError> {
        check_granularity(src.len())?;
        Ok(pack_values(src, self.bits, &mut self.compressed))
    }

    fn unpack(&mut self, count: usize) -> Result<(), BenchError> {
        check_granularity(count)?;
        self.decoded.resize(count, 0);
        unpack_blocks(self.unpacker, self.bits, &self.compressed, &mut self.decoded)
    }

    fn compressed_len(&self) -> usize {
        self.compressed.len()
    }

    fn decoded(&self) -> &[u32] {
        &self.decoded
    }
}

#[test]
fn test_block_table_covers_all_widths() {
    assert!(block_unpacker(0).is_none());
    assert!(block_unpacker(57).is_none());
    for bits in WIDTHS {
        assert!(block_unpacker(bits).is_some());
    }
}
