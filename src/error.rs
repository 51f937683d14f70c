//! Errors reported by the codecs, the validator and the benchmark driver.

use thiserror::Error;

/// Error type for the whole harness.
///
/// The variants fall into two tiers. Fatal errors mean that a codec or the
/// harness is broken and no timing may be reported for the run. Recoverable
/// errors come from bad user input and are reported before any benchmarking
/// starts. Use [`BenchError::is_fatal`] to tell them apart.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("{codec} ({bits} bits): decoded[{index}]={actual} != {expected}")]
    RoundTripMismatch {
        codec: &'static str,
        bits: u32,
        index: usize,
        expected: u32,
        actual: u32,
    },

    #[error("{codec} ({bits} bits): decoded {actual} values, expected {expected}")]
    DecodedLengthMismatch {
        codec: &'static str,
        bits: u32,
        expected: usize,
        actual: usize,
    },

    #[error("{codec} ({bits} bits): compressed size is {actual} bytes, expected {expected}")]
    SizeLawViolation {
        codec: &'static str,
        bits: u32,
        expected: usize,
        actual: usize,
    },

    #[error("{codec}: {len} elements is not a multiple of the block granularity {granularity}")]
    GranularityError {
        codec: &'static str,
        len: usize,
        granularity: usize,
    },

    #[error("{codec}: compressed buffer holds {actual} bytes, {needed} needed")]
    TruncatedInput {
        codec: &'static str,
        needed: usize,
        actual: usize,
    },

    #[error("{codec} does not support {bits}-bit values")]
    UnsupportedWidth { codec: &'static str, bits: u32 },

    #[error("unknown codec selector '{0}'")]
    UnknownCodecSelector(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BenchError {
    /// Returns true if the error indicates a defect in a codec or in the
    /// harness, in which case the run must stop without reporting timings.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BenchError::RoundTripMismatch { .. }
                | BenchError::DecodedLengthMismatch { .. }
                | BenchError::SizeLawViolation { .. }
                | BenchError::GranularityError { .. }
                | BenchError::TruncatedInput { .. }
                | BenchError::UnsupportedWidth { .. }
                | BenchError::Io(_)
        )
    }
}

#[test]
fn test_error_tiers() {
    let err = BenchError::GranularityError {
        codec: "fastpfor",
        len: 48,
        granularity: 32,
    };
    assert!(err.is_fatal());
    let err = BenchError::TruncatedInput {
        codec: "sserialize",
        needed: 4,
        actual: 3,
    };
    assert!(err.is_fatal());
    assert!(!BenchError::UnknownCodecSelector("xyz".into()).is_fatal());
    assert!(!BenchError::InvalidArgument("-r 0".into()).is_fatal());
}
