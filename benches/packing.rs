//! Micro benchmarks for the pack and unpack paths of each codec.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use packbench::codecs::CodecKind;
use packbench::generator::{generate, Pattern};
use packbench::Codec;

const LEN: usize = 1 << 16;

fn bench_kind(c: &mut Criterion, kind: CodecKind, bits: u32) {
    let src = generate(bits, LEN, Pattern::Ramp);
    let mut codec = kind.create(bits).unwrap();
    codec.pack(&src).unwrap();

    c.bench_function(&format!("{} pack {} bits", kind, bits), |b| {
        b.iter(|| black_box(codec.pack(&src).unwrap()))
    });
    c.bench_function(&format!("{} unpack {} bits", kind, bits), |b| {
        b.iter(|| {
            codec.unpack(LEN).unwrap();
            black_box(codec.decoded()[LEN - 1])
        })
    });
}

pub fn criterion_benchmark(c: &mut Criterion) {
    for bits in [1, 7, 16, 32] {
        for kind in CodecKind::ALL {
            bench_kind(c, kind, bits);
        }
    }
    bench_kind(c, CodecKind::Fixed, 56);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
