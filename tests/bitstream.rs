use packbench::bitstream::{BitReader, BitWriter, MAX_BITS};
use packbench::utils::mask;

#[test]
fn test_bitstream_simple() {
    let mut buffer = Vec::new();
    let mut writer = BitWriter::new(&mut buffer);
    writer.push(0b101, 3);
    writer.push(0b1, 1);
    writer.push(0xf, 4);
    writer.push(0x3, 2);
    assert_eq!(writer.finish(), 2);
    // LSB first: the first value lands in the low bits of the first byte.
    assert_eq!(buffer, vec![0b1111_1101, 0b11]);

    let mut reader = BitReader::new(&buffer);
    assert_eq!(reader.read(3), 0b101);
    assert_eq!(reader.read(1), 1);
    assert_eq!(reader.read(4), 0xf);
    assert_eq!(reader.read(2), 0x3);
    assert_eq!(reader.consumed_bits(), 10);
}

#[test]
fn test_push_masks_upper_bits() {
    let mut buffer = Vec::new();
    let mut writer = BitWriter::new(&mut buffer);
    writer.push(0xff, 4);
    writer.push(0x0, 4);
    writer.finish();
    assert_eq!(buffer, vec![0x0f]);
}

#[test]
fn test_round_trip_all_widths() {
    for bits in 1..=MAX_BITS {
        let mut buffer = Vec::new();
        let mut writer = BitWriter::new(&mut buffer);
        let vals: Vec<u64> = (0..77u64)
            .map(|i| i.wrapping_mul(0x9e37_79b9_7f4a_7c15) & mask(bits))
            .collect();
        for val in &vals {
            writer.push(*val, bits);
        }
        let written = writer.finish();
        assert_eq!(written, (bits as usize * vals.len() + 7) / 8);

        let mut reader = BitReader::new(&buffer);
        for val in &vals {
            assert_eq!(reader.read(bits), *val, "bits = {}", bits);
        }
    }
}

#[test]
fn test_mixed_widths() {
    let mut buffer = Vec::new();
    let mut writer = BitWriter::new(&mut buffer);
    for i in 1..=MAX_BITS {
        writer.push(1 << (i - 1), i);
        writer.push(0x1, 1);
    }
    writer.finish();

    let mut reader = BitReader::new(&buffer);
    for i in 1..=MAX_BITS {
        assert_eq!(reader.read(i), 1 << (i - 1));
        assert_eq!(reader.read(1), 1);
    }
}

#[test]
fn test_read_past_end() {
    let buffer = [0xffu8];
    let mut reader = BitReader::new(&buffer);
    assert_eq!(reader.read(4), 0xf);
    assert_eq!(reader.read(8), 0xf);
    assert_eq!(reader.read(16), 0);
    assert_eq!(reader.read(0), 0);
}
