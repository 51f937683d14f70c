//! Mini-block aligned packing.
//!
//! Values are packed in mini-blocks of 16. Two mini-blocks form a frame of 32
//! values, which at 'bits' bits per value fills exactly 'bits' 32-bit words.
//! The first mini-block of a frame is packed into the low 16-bit lanes of
//! those words and the second into the high lanes, so each mini-block is
//! shifted independently and the two lanes can be decoded side by side:
//!
//! word j = [ lane1[j] (16 bits) | lane0[j] (16 bits) ]
//!
//! There is no global bit cursor. The output buffer is allocated with the
//! size of the uncompressed input plus one word per mini-block of a frame,
//! and the codec does not report a tight compressed size.

use crate::error::BenchError;
use crate::utils::is_multiple_of;
use crate::{Codec, Semantics};
use std::ops::RangeInclusive;

/// Number of values in one mini-block.
pub const MINI_BLOCK_LEN: usize = 16;

/// Number of mini-blocks that share one run of words.
pub const MINI_BLOCKS_PER_FRAME: usize = 2;

/// Number of values processed per frame. Element counts must be a multiple
/// of this.
pub const FRAME_LEN: usize = MINI_BLOCK_LEN * MINI_BLOCKS_PER_FRAME;

/// The widths supported by the 32-bit lanes.
pub const WIDTHS: RangeInclusive<u32> = 1..=32;

/// Decodes one frame of FRAME_LEN values from 'words' into 'output'.
pub type FrameUnpackFn = fn(words: &[u32], output: &mut [u32]);

/// Pack the 16 values of one mini-block into 'bits' 16-bit lanes.
fn pack_mini_block(values: &[u32], bits: u32, lanes: &mut [u16]) {
    let mut window: u64 = 0;
    let mut filled = 0;
    let mut idx = 0;
    for val in values {
        window |= (*val as u64) << filled;
        filled += bits;
        while filled >= 16 {
            lanes[idx] = window as u16;
            idx += 1;
            window >>= 16;
            filled -= 16;
        }
    }
    // 16 values of 'bits' bits are exactly 'bits' lanes.
    debug_assert_eq!(filled, 0);
    debug_assert_eq!(idx, bits as usize);
}

/// Pack one frame of FRAME_LEN values into the first 'bits' words of
/// 'words'.
fn pack_frame(input: &[u32], bits: u32, words: &mut [u32]) {
    let mut low = [0u16; 32];
    let mut high = [0u16; 32];
    let (first, second) = input[..FRAME_LEN].split_at(MINI_BLOCK_LEN);
    pack_mini_block(first, bits, &mut low);
    pack_mini_block(second, bits, &mut high);

    for (j, word) in words[..bits as usize].iter_mut().enumerate() {
        *word = low[j] as u32 | (high[j] as u32) << 16;
    }
}

/// Decode one frame of BITS-wide values from the first BITS words.
fn unpack_frame<const BITS: usize>(words: &[u32], output: &mut [u32]) {
    let words = &words[..BITS];
    let mask = (1u64 << BITS) - 1;

    for (lane, out) in output[..FRAME_LEN]
        .chunks_exact_mut(MINI_BLOCK_LEN)
        .enumerate()
    {
        let shift = 16 * lane;
        let mut window: u64 = 0;
        let mut avail = 0;
        let mut idx = 0;
        for slot in out.iter_mut() {
            // 'avail' stays below 48 because BITS <= 32.
            while avail < BITS {
                let half = (words[idx] >> shift) & 0xffff;
                window |= (half as u64) << avail;
                idx += 1;
                avail += 16;
            }
            *slot = (window & mask) as u32;
            window >>= BITS;
            avail -= BITS;
        }
    }
}

macro_rules! frame_unpackers {
    ($($bits:literal)*) => {
        [$(unpack_frame::<$bits> as FrameUnpackFn,)*]
    };
}

/// Maps 'bits - 1' to the frame routine for that width.
static FRAME_UNPACKERS: [FrameUnpackFn; 32] = frame_unpackers!(
    1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27
    28 29 30 31 32
);

/// Returns the frame routine specialized for 'bits', or None if the width is
/// not supported.
pub fn frame_unpacker(bits: u32) -> Option<FrameUnpackFn> {
    FRAME_UNPACKERS
        .get((bits as usize).wrapping_sub(1))
        .copied()
}

pub struct MiniBlockPacker {
    bits: u32,
    /// The frame routine for 'bits', picked at construction.
    unpacker: FrameUnpackFn,
    /// The packed frames followed by unused slack.
    words: Vec<u32>,
    /// The output of the last unpack.
    decoded: Vec<u32>,
    /// Number of values packed by the last call to 'pack'.
    packed: usize,
}

impl MiniBlockPacker {
    pub const NAME: &'static str = "fastpfor";

    pub fn new(bits: u32) -> Result<Self, BenchError> {
        let unpacker =
            frame_unpacker(bits).ok_or(BenchError::UnsupportedWidth {
                codec: Self::NAME,
                bits,
            })?;
        Ok(Self {
            bits,
            unpacker,
            words: Vec::new(),
            decoded: Vec::new(),
            packed: 0,
        })
    }

    fn check_granularity(len: usize) -> Result<(), BenchError> {
        if !is_multiple_of(len, FRAME_LEN) {
            return Err(BenchError::GranularityError {
                codec: Self::NAME,
                len,
                granularity: FRAME_LEN,
            });
        }
        Ok(())
    }

    /// Returns the number of words that hold packed frames. The rest of the
    /// buffer is slack.
    pub fn used_words(&self) -> usize {
        self.packed / FRAME_LEN * self.bits as usize
    }

    /// The whole word buffer, including the slack.
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

impl Codec for MiniBlockPacker {
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
        FRAME_LEN
    }

    fn semantics(&self) -> Semantics {
        Semantics::Identity
    }

    fn exact_len(&self, _count: usize) -> Option<usize> {
        None
    }

    fn pack(&mut self, src: &[u32]) -> Result<usize, BenchError> {
        Self::check_granularity(src.len())?;
        let stride = self.bits as usize;
        self.words.clear();
        self.words.resize(src.len() + MINI_BLOCKS_PER_FRAME, 0);

        for (frame, words) in src
            .chunks_exact(FRAME_LEN)
            .zip(self.words.chunks_exact_mut(stride))
        {
            pack_frame(frame, self.bits, words);
        }
        self.packed = src.len();
        Ok(self.compressed_len())
    }

    fn unpack(&mut self, count: usize) -> Result<(), BenchError> {
        Self::check_granularity(count)?;
        let stride = self.bits as usize;
        let needed = count / FRAME_LEN * stride;
        if needed > self.used_words() {
            return Err(BenchError::TruncatedInput {
                codec: Self::NAME,
                needed: needed * 4,
                actual: self.used_words() * 4,
            });
        }
        self.decoded.resize(count, 0);

        for (out, words) in self
            .decoded
            .chunks_exact_mut(FRAME_LEN)
            .zip(self.words.chunks_exact(stride))
        {
            (self.unpacker)(words, out);
        }
        Ok(())
    }

    fn compressed_len(&self) -> usize {
        self.words.len() * 4
    }

    fn decoded(&self) -> &[u32] {
        &self.decoded
    }
}

#[test]
fn test_frame_layout() {
    // With 16-bit values every lane holds exactly one value.
    let input: Vec<u32> = (0..FRAME_LEN as u32).map(|i| i * 1000).collect();
    let mut words = vec![0u32; 16];
    pack_frame(&input, 16, &mut words);
    for j in 0..16 {
        assert_eq!(words[j] & 0xffff, input[j]);
        assert_eq!(words[j] >> 16, input[j + MINI_BLOCK_LEN]);
    }

    let mut output = vec![0u32; FRAME_LEN];
    unpack_frame::<16>(&words, &mut output);
    assert_eq!(output, input);
}
