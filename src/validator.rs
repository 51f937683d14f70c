//! Checks that a codec reproduced its input and honored its size law.
//!
//! The checks run once per codec and width, before any timing. Any failure is
//! fatal for the whole run.

use crate::error::BenchError;
use crate::{Codec, Semantics};

/// Returns the values a codec with 'semantics' must decode for 'src'.
pub fn expected_values(
    semantics: Semantics,
    src: &[u32],
) -> impl Iterator<Item = u32> + '_ {
    let mut prev: u32 = 0;
    src.iter().map(move |val| match semantics {
        Semantics::Identity => *val,
        Semantics::PrefixSum => {
            prev = prev.wrapping_add(*val);
            prev
        }
    })
}

/// Check the compressed length of 'len' packed values, for codecs that
/// guarantee an exact size.
pub fn check_size(codec: &dyn Codec, len: usize) -> Result<(), BenchError> {
    if let Some(expected) = codec.exact_len(len) {
        let actual = codec.compressed_len();
        if actual != expected {
            return Err(BenchError::SizeLawViolation {
                codec: codec.name(),
                bits: codec.bits(),
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Compare the decoded buffer of 'codec' with the values expected for 'src'.
pub fn check_values(codec: &dyn Codec, src: &[u32]) -> Result<(), BenchError> {
    let decoded = codec.decoded();
    if decoded.len() != src.len() {
        return Err(BenchError::DecodedLengthMismatch {
            codec: codec.name(),
            bits: codec.bits(),
            expected: src.len(),
            actual: decoded.len(),
        });
    }

    let expected = expected_values(codec.semantics(), src);
    for (index, (expected, actual)) in expected.zip(decoded).enumerate() {
        if expected != *actual {
            return Err(BenchError::RoundTripMismatch {
                codec: codec.name(),
                bits: codec.bits(),
                index,
                expected,
                actual: *actual,
            });
        }
    }
    Ok(())
}

/// Run all of the checks on a codec that packed and unpacked 'src'.
pub fn check(codec: &dyn Codec, src: &[u32]) -> Result<(), BenchError> {
    check_size(codec, src.len())?;
    check_values(codec, src)
}

#[test]
fn test_expected_prefix_sum() {
    let src = [0, 1, 2, 3, 4, 5, 6, 7];
    let sums: Vec<u32> = expected_values(Semantics::PrefixSum, &src).collect();
    assert_eq!(sums, vec![0, 1, 3, 6, 10, 15, 21, 28]);
    let same: Vec<u32> = expected_values(Semantics::Identity, &src).collect();
    assert_eq!(same, src.to_vec());

    let wrap: Vec<u32> =
        expected_values(Semantics::PrefixSum, &[u32::MAX, 2]).collect();
    assert_eq!(wrap, vec![u32::MAX, 1]);
}
