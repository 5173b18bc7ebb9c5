use classic_codecs::cs::compression::{bwt, huffman, lzw};
use classic_codecs::cs::ecc::HammingCoder;
use classic_codecs::samples::{GeneratedSource, SampleSource};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn sample(len: usize) -> String {
    GeneratedSource::new(42, len).fetch("generated://bench")
}

fn bench_huffman(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");
    for size in SIZES {
        let text = sample(size);
        let encoding = huffman::encode(&text);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &text, |b, text| {
            b.iter(|| huffman::encode(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoding, |b, encoding| {
            b.iter(|| black_box(encoding).decode())
        });
    }
    group.finish();
}

fn bench_lzw(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzw");
    for size in SIZES {
        let text = sample(size);
        let codes = lzw::encode(&text).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &text, |b, text| {
            b.iter(|| lzw::encode(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &codes, |b, codes| {
            b.iter(|| lzw::decode(black_box(codes)))
        });
    }
    group.finish();
}

fn bench_bwt(c: &mut Criterion) {
    let mut group = c.benchmark_group("bwt");
    // Encoding sorts every rotation, so stay with the smaller blocks.
    for size in [1_000, 10_000] {
        let text = sample(size);
        let (last_column, index) = bwt::encode(&text).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &text, |b, text| {
            b.iter(|| bwt::encode(black_box(text)))
        });
        group.bench_with_input(
            BenchmarkId::new("decode", size),
            &last_column,
            |b, last_column| b.iter(|| bwt::decode(black_box(last_column), index)),
        );
    }
    group.finish();
}

fn bench_hamming(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming");
    let text = sample(10_000);
    group.throughput(Throughput::Bytes(text.len() as u64));
    for num_of_char in [1, 4, 15] {
        let coder = HammingCoder::new(num_of_char).unwrap();
        let chunks = coder.encode(&text);
        group.bench_with_input(BenchmarkId::new("encode", num_of_char), &text, |b, text| {
            b.iter(|| coder.encode(black_box(text)))
        });
        group.bench_with_input(
            BenchmarkId::new("decode", num_of_char),
            &chunks,
            |b, chunks| b.iter(|| coder.decode(black_box(chunks))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_huffman, bench_lzw, bench_bwt, bench_hamming);
criterion_main!(benches);
