#![no_main]

use libfuzzer_sys::fuzz_target;
use packbench::codecs::ForBlock;
use packbench::utils::value_mask;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let bits = 1 + (data[0] as u32 % 56);
    let mask = value_mask(bits);
    let src: Vec<u32> = data[1..]
        .chunks(4)
        .map(|c| c.iter().fold(0u32, |acc, b| (acc << 8) | *b as u32) & mask)
        .collect();

    let mut block = ForBlock::new(bits).unwrap();
    block.pack(&src);
    block.update(src.len()).unwrap();

    let mut sum: u32 = 0;
    for (i, val) in src.iter().enumerate() {
        sum = sum.wrapping_add(*val);
        assert_eq!(block.at(i), sum);
    }
});
