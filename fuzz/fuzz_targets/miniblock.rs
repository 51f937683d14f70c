#![no_main]

use libfuzzer_sys::fuzz_target;
use packbench::codecs::miniblock::{MiniBlockPacker, FRAME_LEN};
use packbench::utils::value_mask;
use packbench::Codec;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let bits = 1 + (data[0] as u32 % 32);
    let mask = value_mask(bits);
    let mut src: Vec<u32> = data[1..]
        .chunks(4)
        .map(|c| c.iter().fold(0u32, |acc, b| (acc << 8) | *b as u32) & mask)
        .collect();
    src.truncate(src.len() - src.len() % FRAME_LEN);

    let mut codec = MiniBlockPacker::new(bits).unwrap();
    codec.pack(&src).unwrap();
    codec.unpack(src.len()).unwrap();
    assert_eq!(codec.decoded(), &src[..]);
});
