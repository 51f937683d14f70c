//! Bit-granular writer and reader over byte buffers.
//!
//! Values are laid out LSB-first: the first value pushed occupies the lowest
//! bits of the first byte, and a value that straddles a byte boundary
//! continues in the low bits of the next byte. Both sides keep a 64-bit
//! window and flush or refill whole bytes, so a single push or read may be up
//! to 56 bits wide without overflowing the window.

use crate::utils::mask;

/// The widest value that can be pushed or read in a single call.
pub const MAX_BITS: u32 = 56;

/// Appends fixed-width values to a byte vector.
pub struct BitWriter<'a> {
    /// The output stream.
    output: &'a mut Vec<u8>,
    /// Pending bits that did not fill a whole byte yet.
    /// The bits are packed to the right [xxxxx543210]. Bits above 'filled'
    /// are zero.
    window: u64,
    /// Number of valid bits in 'window' (always below 8 between calls).
    filled: u32,
}

impl<'a> BitWriter<'a> {
    pub fn new(output: &'a mut Vec<u8>) -> Self {
        Self {
            output,
            window: 0,
            filled: 0,
        }
    }

    /// Push the lowest 'bits' bits of 'value' into the stream.
    #[inline]
    pub fn push(&mut self, value: u64, bits: u32) {
        debug_assert!(bits <= MAX_BITS, "Pushing too many bits");
        debug_assert!(self.filled < 8);
        self.window |= (value & mask(bits)) << self.filled;
        self.filled += bits;

        // Flush every byte that is complete.
        while self.filled >= 8 {
            self.output.push(self.window as u8);
            self.window >>= 8;
            self.filled -= 8;
        }
    }

    /// Flush the trailing partial byte, if any, and return the total length
    /// of the output stream in bytes.
    pub fn finish(self) -> usize {
        if self.filled > 0 {
            self.output.push(self.window as u8);
        }
        self.output.len()
    }
}

/// Reads fixed-width values from a byte slice written by [`BitWriter`].
pub struct BitReader<'a> {
    /// The packed input.
    input: &'a [u8],
    /// The next byte to load into the window.
    pos: usize,
    /// Loaded bits that were not consumed yet, packed to the right.
    window: u64,
    /// Number of valid bits in 'window'.
    avail: u32,
    /// Number of bits handed out so far.
    consumed: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            window: 0,
            avail: 0,
            consumed: 0,
        }
    }

    /// Extract the next 'bits' bits. Reading past the end of the input
    /// yields zero bits.
    #[inline]
    #[must_use]
    pub fn read(&mut self, bits: u32) -> u64 {
        debug_assert!(bits <= MAX_BITS, "Reading too many bits");
        while self.avail < bits {
            let byte = self.input.get(self.pos).copied().unwrap_or(0);
            self.window |= (byte as u64) << self.avail;
            self.pos += 1;
            self.avail += 8;
        }
        let val = self.window & mask(bits);
        // 'bits' may be zero, and 'avail' is at most 63, so the shift is
        // always in range.
        self.window >>= bits;
        self.avail -= bits;
        self.consumed += bits as usize;
        val
    }

    /// Returns the number of bits that were read so far.
    #[must_use]
    pub fn consumed_bits(&self) -> usize {
        self.consumed
    }
}
