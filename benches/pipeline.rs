use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use smer_hash::kmer::{hash_smer, PackedSequence, SMER_MASK};
use smer_hash::pipeline::{ExecutionMode, Pipeline, PipelineConfig};

/// Generate a random packed DNA sequence for benchmarking
fn generate_sequence(len: usize) -> PackedSequence {
    let mut rng = rand::thread_rng();
    let bases = [b'A', b'C', b'G', b'T'];
    let seq: Vec<u8> = (0..len).map(|_| bases[rng.gen_range(0..4)]).collect();
    PackedSequence::from_bases(&seq)
}

/// Benchmark both scheduling modes over growing inputs
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for len in [1_024, 65_536, 1_048_576] {
        let seq = generate_sequence(len);
        group.throughput(Throughput::Elements(len as u64));

        for mode in [ExecutionMode::Sequential, ExecutionMode::Dataflow] {
            let config = PipelineConfig {
                mode,
                ..Default::default()
            };
            group.bench_with_input(BenchmarkId::new(mode.to_string(), len), &seq, |b, seq| {
                b.iter(|| {
                    black_box(
                        Pipeline::new(config.clone())
                            .hash_sequence(&seq.words, seq.len)
                            .unwrap(),
                    )
                });
            });
        }
    }

    group.finish();
}

/// Benchmark the mix on its own
fn bench_mix(c: &mut Criterion) {
    let keys: Vec<u64> = (0..10_000u64)
        .map(|i| i.wrapping_mul(0x9e37_79b9_7f4a_7c15) & SMER_MASK)
        .collect();
    c.bench_function("hash_smer_10k", |b| {
        b.iter(|| keys.iter().fold(0u64, |acc, &k| acc ^ hash_smer(black_box(k))))
    });
}

criterion_group!(benches, bench_pipeline, bench_mix);
criterion_main!(benches);
