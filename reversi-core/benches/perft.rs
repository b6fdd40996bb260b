use criterion::*;

use reversi_core::bits::{Wide, Word};
use reversi_core::test_utils::run_perft;

fn criterion_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(50);

    for depth in 1..6 {
        group.bench_with_input(
            BenchmarkId::new("word", depth),
            &depth,
            |b, &depth| b.iter(|| run_perft::<Word>(8, black_box(depth))),
        );
        group.bench_with_input(
            BenchmarkId::new("wide", depth),
            &depth,
            |b, &depth| b.iter(|| run_perft::<Wide>(8, black_box(depth))),
        );
    }

    group.finish();
}

criterion_group!(perft, criterion_perft);
criterion_main!(perft);
