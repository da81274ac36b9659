use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let mut generator = RandomBoardGenerator::new(0);
        group.bench_function(difficulty.as_str(), |b| {
            b.iter(|| generator.generate(black_box(difficulty.config())).unwrap())
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let config = BoardConfig::new(16, 30, 0);
    c.bench_function("flood_fill_empty_hard", |b| {
        b.iter_batched(
            || RandomBoardGenerator::new(0).generate(config).unwrap(),
            |mut board| board.reveal(black_box((8, 15))).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, generate, flood_fill);
criterion_main!(benches);
