use packbench::bitstream::BitReader;
use packbench::codecs::fixed::{self, FixedWidthPacker, BLOCK_LEN, WIDTHS};
use packbench::error::BenchError;
use packbench::generator::{generate, Pattern};
use packbench::utils::packed_len;
use packbench::{validator, Codec};

fn round_trip(src: &[u32], bits: u32) {
    let mut codec = FixedWidthPacker::new(bits).unwrap();
    let written = codec.pack(src).unwrap();
    assert_eq!(written, packed_len(bits, src.len()));
    assert_eq!(written, codec.compressed_len());
    codec.unpack(src.len()).unwrap();
    assert_eq!(codec.decoded(), src, "bits = {}", bits);
    validator::check(&codec, src).unwrap();
}

#[test]
fn test_sixteen_values_in_eight_bytes() {
    let src: Vec<u32> = (0..16).collect();
    let mut compressed = Vec::new();
    let written = fixed::pack(&src, 4, &mut compressed).unwrap();
    assert_eq!(written, 8);
    assert_eq!(
        compressed,
        vec![0x10, 0x32, 0x54, 0x76, 0x98, 0xba, 0xdc, 0xfe]
    );

    let mut decoded = Vec::new();
    fixed::unpack(&compressed, 4, src.len(), &mut decoded).unwrap();
    assert_eq!(decoded, src);
}

#[test]
fn test_round_trip_all_widths() {
    for bits in WIDTHS {
        round_trip(&generate(bits, 1024, Pattern::Ramp), bits);
        round_trip(&generate(bits, 256, Pattern::Uniform { seed: 3 }), bits);
    }
}

#[test]
fn test_boundary_widths() {
    round_trip(&vec![1; 64], 1);
    round_trip(&vec![u32::MAX; 64], 32);
    round_trip(&vec![u32::MAX; 64], 56);
    round_trip(&[u32::MAX, 0, 1, u32::MAX - 1, 7, 0, 0, u32::MAX], 56);
    round_trip(&[], 13);
}

#[test]
fn test_matches_generic_reader() {
    // The specialized block routines must agree with a plain bit cursor.
    for bits in WIDTHS {
        let src = generate(bits, 128, Pattern::Uniform { seed: 11 });
        let mut compressed = Vec::new();
        fixed::pack(&src, bits, &mut compressed).unwrap();

        let mut reader = BitReader::new(&compressed);
        let generic: Vec<u32> =
            src.iter().map(|_| reader.read(bits) as u32).collect();

        let mut specialized = vec![0u32; src.len()];
        let unpacker = fixed::block_unpacker(bits).unwrap();
        for (block, packed) in specialized
            .chunks_exact_mut(BLOCK_LEN)
            .zip(compressed.chunks_exact(bits as usize))
        {
            unpacker(packed, block);
        }
        assert_eq!(generic, specialized);
        assert_eq!(generic, src);
    }
}

#[test]
fn test_granularity() {
    let src: Vec<u32> = (0..12).collect();
    let mut codec = FixedWidthPacker::new(4).unwrap();
    assert!(matches!(
        codec.pack(&src),
        Err(BenchError::GranularityError { len: 12, .. })
    ));
    assert!(matches!(
        codec.unpack(9),
        Err(BenchError::GranularityError { granularity: 8, .. })
    ));

    let mut compressed = Vec::new();
    assert!(fixed::pack(&src, 4, &mut compressed).is_err());
}

#[test]
fn test_unsupported_widths() {
    assert!(matches!(
        FixedWidthPacker::new(0),
        Err(BenchError::UnsupportedWidth { bits: 0, .. })
    ));
    assert!(FixedWidthPacker::new(57).is_err());
    let mut decoded = Vec::new();
    assert!(fixed::unpack(&[0; 64], 60, 8, &mut decoded).is_err());
}

#[test]
fn test_buffers_are_reused() {
    let src = generate(9, 4096, Pattern::Ramp);
    let mut codec = FixedWidthPacker::new(9).unwrap();
    codec.pack(&src).unwrap();
    codec.unpack(src.len()).unwrap();
    let compressed_ptr = codec.compressed().as_ptr();
    let decoded_ptr = codec.decoded().as_ptr();

    for _ in 0..4 {
        codec.pack(&src).unwrap();
        codec.unpack(src.len()).unwrap();
    }
    assert_eq!(codec.compressed().as_ptr(), compressed_ptr);
    assert_eq!(codec.decoded().as_ptr(), decoded_ptr);
    assert_eq!(codec.decoded(), &src[..]);
}

#[test]
fn test_truncated_input() {
    let mut decoded = Vec::new();
    assert!(matches!(
        fixed::unpack(&[0u8; 3], 4, 8, &mut decoded),
        Err(BenchError::TruncatedInput {
            needed: 4,
            actual: 3,
            ..
        })
    ));

    // Nothing packed yet.
    let mut codec = FixedWidthPacker::new(4).unwrap();
    assert!(matches!(
        codec.unpack(8),
        Err(BenchError::TruncatedInput { actual: 0, .. })
    ));

    // More values requested than were packed.
    codec.pack(&generate(4, 16, Pattern::Ramp)).unwrap();
    let err = codec.unpack(32).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        err,
        BenchError::TruncatedInput {
            codec: "sserialize",
            needed: 16,
            actual: 8,
        }
    ));
    codec.unpack(16).unwrap();
}
