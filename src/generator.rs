//! Generates the synthetic sequences that are fed to the codecs.

use crate::utils::value_mask;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

/// The shape of the generated values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// S[i] = i masked to the bit width. Every bit position changes
    /// regularly and the sequence is identical across runs.
    Ramp,
    /// Values drawn uniformly from the full range of the bit width, from a
    /// generator seeded with 'seed'.
    Uniform { seed: u64 },
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::Ramp
    }
}

/// Fill 'seq' with 'len' values that fit in 'bits' bits.
pub fn fill(seq: &mut Vec<u32>, bits: u32, len: usize, pattern: Pattern) {
    let mask = value_mask(bits);
    seq.clear();
    seq.reserve(len);

    match pattern {
        Pattern::Ramp => {
            seq.extend((0..len).map(|i| i as u32 & mask));
        }
        Pattern::Uniform { seed } => {
            let mut rng = StdRng::seed_from_u64(seed ^ bits as u64);
            let distr = Uniform::new_inclusive(0, mask);
            seq.extend((0..len).map(|_| distr.sample(&mut rng)));
        }
    }
}

/// Returns a new sequence of 'len' values that fit in 'bits' bits.
pub fn generate(bits: u32, len: usize, pattern: Pattern) -> Vec<u32> {
    let mut seq = Vec::new();
    fill(&mut seq, bits, len, pattern);
    seq
}

#[test]
fn test_ramp() {
    let seq = generate(3, 10, Pattern::Ramp);
    assert_eq!(seq, vec![0, 1, 2, 3, 4, 5, 6, 7, 0, 1]);
    let seq = generate(40, 4, Pattern::Ramp);
    assert_eq!(seq, vec![0, 1, 2, 3]);
}

#[test]
fn test_uniform_is_bounded_and_reproducible() {
    for bits in [1, 5, 17, 31, 32, 56] {
        let a = generate(bits, 1000, Pattern::Uniform { seed: 7 });
        let b = generate(bits, 1000, Pattern::Uniform { seed: 7 });
        assert_eq!(a, b);
        assert!(a.iter().all(|v| *v <= value_mask(bits)));
    }
}
