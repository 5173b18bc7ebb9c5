use classic_codecs::cs::hashing::{djb2_parameterized, BloomFilter};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

fn random_words(seed: u64, count: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(4..16);
            (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
        })
        .collect()
}

fn bench_djb2(c: &mut Criterion) {
    c.bench_function("djb2_parameterized", |b| {
        b.iter(|| djb2_parameterized(black_box("a moderately long item"), black_box(3)))
    });
}

fn bench_bloom(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom");
    for size in [1_000, 100_000] {
        let words = random_words(1, size);
        let probes = random_words(2, 1_000);

        group.bench_with_input(BenchmarkId::new("add", size), &words, |b, words| {
            b.iter(|| {
                let mut filter = BloomFilter::new(words.len()).unwrap();
                for word in words {
                    filter.add(word);
                }
                filter
            })
        });

        let mut filter = BloomFilter::new(size).unwrap();
        for word in &words {
            filter.add(word);
        }
        group.bench_with_input(BenchmarkId::new("might_contain", size), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|probe| filter.might_contain(probe)).count())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_djb2, bench_bloom);
criterion_main!(benches);
