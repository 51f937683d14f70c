pub mod bitstream;
pub mod codecs;
pub mod config;
pub mod driver;
pub mod error;
pub mod generator;
pub mod report;
pub mod utils;
pub mod validator;

use error::BenchError;
use std::ops::RangeInclusive;

/// Describes how the decoded values relate to the packed input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Semantics {
    /// Decoding reproduces the input element by element.
    Identity,
    /// Decoding produces the running (wrapping) sum of the input, as used for
    /// delta coded posting lists.
    PrefixSum,
}

/// A trait that defines the interface of the benchmarked codecs.
///
/// A codec instance is created for a single bit width. It owns its compressed
/// and decoded buffers and reuses them across calls, so repeated pack and
/// unpack calls on the same instance do not allocate.
pub trait Codec {
    /// The name used to select the codec on the command line.
    fn name(&self) -> &'static str;

    /// The bit width the instance was created for.
    fn bits(&self) -> u32;

    /// The widths the codec can be created for.
    fn supported_widths(&self) -> RangeInclusive<u32>;

    /// Element counts passed to 'pack' and 'unpack' must be a multiple of
    /// this value.
    fn granularity(&self) -> usize;

    /// How the decoded values relate to the packed input.
    fn semantics(&self) -> Semantics;

    /// Returns the exact compressed size in bytes of 'count' values, or None
    /// if the codec does not guarantee a tight size.
    fn exact_len(&self, count: usize) -> Option<usize>;

    /// Pack 'src' into the internal compressed buffer and return the length
    /// of the buffer in bytes.
    fn pack(&mut self, src: &[u32]) -> Result<usize, BenchError>;

    /// Decode 'count' values from the internal compressed buffer into the
    /// internal decoded buffer.
    fn unpack(&mut self, count: usize) -> Result<(), BenchError>;

    /// The length in bytes of the compressed buffer.
    #[must_use]
    fn compressed_len(&self) -> usize;

    /// The values produced by the last call to 'unpack'.
    #[must_use]
    fn decoded(&self) -> &[u32];
}
