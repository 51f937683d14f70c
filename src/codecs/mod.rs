//! The benchmarked codecs and the registry that selects them.

pub mod fixed;
pub mod forblock;
pub mod miniblock;

pub use fixed::FixedWidthPacker;
pub use forblock::ForBlock;
pub use miniblock::MiniBlockPacker;

use crate::error::BenchError;
use crate::utils::is_multiple_of;
use crate::Codec;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Identifies one of the codecs that the harness knows how to build.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CodecKind {
    Fixed,
    ForBlock,
    MiniBlock,
}

impl CodecKind {
    /// All codecs, in report order.
    pub const ALL: [CodecKind; 3] =
        [CodecKind::Fixed, CodecKind::ForBlock, CodecKind::MiniBlock];

    /// The name used on the command line and in report headers.
    pub fn selector(self) -> &'static str {
        match self {
            CodecKind::Fixed => FixedWidthPacker::NAME,
            CodecKind::ForBlock => ForBlock::NAME,
            CodecKind::MiniBlock => MiniBlockPacker::NAME,
        }
    }

    pub fn supported_widths(self) -> RangeInclusive<u32> {
        match self {
            CodecKind::Fixed | CodecKind::ForBlock => fixed::WIDTHS,
            CodecKind::MiniBlock => miniblock::WIDTHS,
        }
    }

    /// Element counts must be a multiple of this value.
    pub fn granularity(self) -> usize {
        match self {
            CodecKind::Fixed => fixed::BLOCK_LEN,
            CodecKind::ForBlock => 1,
            CodecKind::MiniBlock => miniblock::FRAME_LEN,
        }
    }

    /// Fail with a GranularityError if the codec cannot process 'len'
    /// elements in one call.
    pub fn check_len(self, len: usize) -> Result<(), BenchError> {
        if !is_multiple_of(len, self.granularity()) {
            return Err(BenchError::GranularityError {
                codec: self.selector(),
                len,
                granularity: self.granularity(),
            });
        }
        Ok(())
    }

    /// Return true if the codec can be created for 'bits'.
    pub fn supports(self, bits: u32) -> bool {
        self.supported_widths().contains(&bits)
    }

    /// Create a codec instance for values of 'bits' bits.
    pub fn create(self, bits: u32) -> Result<Box<dyn Codec>, BenchError> {
        Ok(match self {
            CodecKind::Fixed => Box::new(FixedWidthPacker::new(bits)?),
            CodecKind::ForBlock => Box::new(ForBlock::new(bits)?),
            CodecKind::MiniBlock => Box::new(MiniBlockPacker::new(bits)?),
        })
    }

    fn flag(self) -> u8 {
        match self {
            CodecKind::Fixed => 1,
            CodecKind::ForBlock => 2,
            CodecKind::MiniBlock => 4,
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for CodecKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CodecKind::ALL
            .into_iter()
            .find(|kind| kind.selector() == s)
            .ok_or_else(|| BenchError::UnknownCodecSelector(s.to_string()))
    }
}

/// A set of codecs, stored as a bitmask.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CodecSet(u8);

impl CodecSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        CodecKind::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, kind: CodecKind) {
        self.0 |= kind.flag();
    }

    pub fn contains(&self, kind: CodecKind) -> bool {
        self.0 & kind.flag() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the selected codecs in report order.
    pub fn iter(&self) -> impl Iterator<Item = CodecKind> + '_ {
        CodecKind::ALL.into_iter().filter(|kind| self.contains(*kind))
    }
}

impl FromIterator<CodecKind> for CodecSet {
    fn from_iter<T: IntoIterator<Item = CodecKind>>(iter: T) -> Self {
        let mut set = CodecSet::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

#[test]
fn test_selectors() {
    for kind in CodecKind::ALL {
        assert_eq!(kind.selector().parse::<CodecKind>().unwrap(), kind);
    }
    assert!(matches!(
        "xyz".parse::<CodecKind>(),
        Err(BenchError::UnknownCodecSelector(_))
    ));
}

#[test]
fn test_codec_set() {
    let mut set = CodecSet::empty();
    assert!(set.is_empty());
    set.insert(CodecKind::MiniBlock);
    set.insert(CodecKind::Fixed);
    set.insert(CodecKind::MiniBlock);
    assert_eq!(set.len(), 2);
    assert!(!set.contains(CodecKind::ForBlock));
    let order: Vec<_> = set.iter().collect();
    assert_eq!(order, vec![CodecKind::Fixed, CodecKind::MiniBlock]);
    assert_eq!(CodecSet::all().len(), 3);
}

#[test]
fn test_width_ranges() {
    assert!(CodecKind::Fixed.supports(56));
    assert!(CodecKind::ForBlock.supports(1));
    assert!(CodecKind::MiniBlock.supports(32));
    assert!(!CodecKind::MiniBlock.supports(33));
    assert!(!CodecKind::Fixed.supports(0));
    assert!(CodecKind::MiniBlock.create(40).is_err());
}

#[test]
fn test_granularity() {
    for kind in CodecKind::ALL {
        let codec = kind.create(7).unwrap();
        assert_eq!(kind.granularity(), codec.granularity());
    }
    assert!(CodecKind::ForBlock.check_len(3).is_ok());
    assert!(CodecKind::Fixed.check_len(64).is_ok());
    assert!(matches!(
        CodecKind::MiniBlock.check_len(16),
        Err(BenchError::GranularityError {
            codec: "fastpfor",
            len: 16,
            granularity: 32
        })
    ));
}
