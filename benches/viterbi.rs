use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use motif_hmm::prelude::*;

const MOTIF: &[u8] = b"KLMNPQRSTVWY";

fn bench_decode(c: &mut Criterion) {
    let model = ProfileModel::from_consensus(MOTIF).unwrap();

    let mut group = c.benchmark_group("decode");
    for &len in &[1_000usize, 10_000, 100_000] {
        let (seq, _) = rand_sequence_with_motifs(b"ACGT", MOTIF, len, len / 500, 42);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &seq, |b, seq| {
            b.iter(|| model.decode(black_box(seq)).unwrap());
        });
    }
    group.finish();
}

fn bench_model_size(c: &mut Criterion) {
    let seq = rand_sequence(b"ACGTKLMNPQRSTVWY", 10_000, 7);

    let mut group = c.benchmark_group("model_size");
    for &size in &[4usize, 16, 64] {
        let model = ConsensusTemplate::default().placeholder(size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &model, |b, model| {
            b.iter(|| model.find_matches(black_box(&seq)).unwrap());
        });
    }
    group.finish();
}

fn bench_new_alphabet(c: &mut Criterion) {
    let model = ProfileModel::from_consensus(MOTIF).unwrap();
    let seq = rand_sequence(b"ACGT", 200, 1);

    c.bench_function("decode_uncached_alphabet", |b| {
        b.iter(|| {
            model.clear_cache();
            model.decode(black_box(&seq)).unwrap()
        });
    });
}

criterion_group!(benches, bench_decode, bench_model_size, bench_new_alphabet);
criterion_main!(benches);
