//! A frame-of-reference block for delta coded lists.
//!
//! Posting lists hold strictly increasing ids, which are stored as the small
//! differences between neighbours. The block keeps those deltas bit-packed
//! with the fixed-width layout and reconstructs the absolute values with a
//! running sum while decoding. 'update' decodes the whole block once into a
//! materialized array, so that 'at' is a plain lookup.

use crate::bitstream::BitReader;
use crate::codecs::fixed::{self, BlockUnpackFn, BLOCK_LEN, WIDTHS};
use crate::error::BenchError;
use crate::utils::packed_len;
use crate::{Codec, Semantics};
use std::ops::RangeInclusive;

pub struct ForBlock {
    bits: u32,
    /// The fixed-width block routine for 'bits'.
    unpacker: BlockUnpackFn,
    /// The packed deltas.
    compressed: Vec<u8>,
    /// The absolute values materialized by the last 'update'.
    values: Vec<u32>,
}

impl ForBlock {
    pub const NAME: &'static str = "forblock";

    pub fn new(bits: u32) -> Result<Self, BenchError> {
        let unpacker = fixed::block_unpacker(bits).ok_or(
            BenchError::UnsupportedWidth {
                codec: Self::NAME,
                bits,
            },
        )?;
        Ok(Self {
            bits,
            unpacker,
            compressed: Vec::new(),
            values: Vec::new(),
        })
    }

    /// Pack the deltas in 'src'. This invalidates the materialized values
    /// until the next call to 'update'.
    pub fn pack(&mut self, src: &[u32]) -> usize {
        self.values.clear();
        fixed::pack_values(src, self.bits, &mut self.compressed)
    }

    /// Decode the first 'count' deltas and materialize their running sum.
    /// Fails if fewer than 'count' deltas were packed.
    pub fn update(&mut self, count: usize) -> Result<(), BenchError> {
        let bits = self.bits;
        let stride = bits as usize;
        let needed = packed_len(bits, count);
        if self.compressed.len() < needed {
            return Err(BenchError::TruncatedInput {
                codec: Self::NAME,
                needed,
                actual: self.compressed.len(),
            });
        }
        self.values.resize(count, 0);

        let full = count - count % BLOCK_LEN;
        let (head, tail) = self.values.split_at_mut(full);
        let mut prev: u32 = 0;

        // Decode whole blocks with the specialized routine and fold the
        // running sum in while the block is still hot.
        for (block, packed) in head
            .chunks_exact_mut(BLOCK_LEN)
            .zip(self.compressed.chunks_exact(stride))
        {
            (self.unpacker)(packed, block);
            for val in block.iter_mut() {
                prev = prev.wrapping_add(*val);
                *val = prev;
            }
        }

        // The tail starts on a byte boundary, right after the last block.
        let mut reader = BitReader::new(&self.compressed[full / BLOCK_LEN * stride..]);
        for val in tail.iter_mut() {
            prev = prev.wrapping_add(reader.read(bits) as u32);
            *val = prev;
        }
        Ok(())
    }

    /// Returns the absolute value at 'idx'. Requires a prior 'update'.
    #[inline]
    pub fn at(&self, idx: usize) -> u32 {
        self.values[idx]
    }

    /// Returns the number of materialized values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn compressed(&self) -> &[u8] {
        &self.compressed
    }
}

impl Codec for ForBlock {
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
        1
    }

    fn semantics(&self) -> Semantics {
        Semantics::PrefixSum
    }

    fn exact_len(&self, count: usize) -> Option<usize> {
        Some(packed_len(self.bits, count))
    }

    fn pack(&mut self, src: &[u32]) -> Result<usize, BenchError> {
        Ok(ForBlock::pack(self, src))
    }

    fn unpack(&mut self, count: usize) -> Result<(), BenchError> {
        self.update(count)
    }

    fn compressed_len(&self) -> usize {
        self.compressed.len()
    }

    fn decoded(&self) -> &[u32] {
        &self.values
    }
}
