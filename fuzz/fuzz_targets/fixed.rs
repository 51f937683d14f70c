#![no_main]

use libfuzzer_sys::fuzz_target;
use packbench::codecs::fixed::{self, BLOCK_LEN};
use packbench::utils::{packed_len, value_mask};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // The first byte picks the width, the rest become the values.
    let bits = 1 + (data[0] as u32 % 56);
    let mask = value_mask(bits);
    let mut src: Vec<u32> = data[1..]
        .chunks(4)
        .map(|c| c.iter().fold(0u32, |acc, b| (acc << 8) | *b as u32) & mask)
        .collect();
    src.truncate(src.len() - src.len() % BLOCK_LEN);

    let mut compressed = Vec::new();
    let written = fixed::pack(&src, bits, &mut compressed).unwrap();
    assert_eq!(written, packed_len(bits, src.len()));

    let mut decoded = Vec::new();
    fixed::unpack(&compressed, bits, src.len(), &mut decoded).unwrap();
    assert_eq!(decoded, src);
});
