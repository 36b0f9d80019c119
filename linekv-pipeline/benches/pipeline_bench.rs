use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use linekv_pipeline::{spawn, Pipeline};
use linekv_reducer::{reduce, StreamingReducer};
use linekv_scanner::Scanner;
use std::hint::black_box;

// --- Shared Input ---

fn generate_input(lines: usize) -> String {
    let line = "ts=2024-05-01T12:00:00Z level=info msg=\"request done\" status=200 dur = 12ms\n";
    line.repeat(lines)
}

// --- Bench ---

fn bench_drivers(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    // ~80KB of log lines
    let input = generate_input(1000);
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("lazy_iterator_1k_lines", |b| {
        b.iter(|| black_box(reduce(Scanner::from_reader(input.as_bytes())).count()))
    });

    group.bench_function("lockstep_1k_lines", |b| {
        b.iter(|| {
            let mut pipeline = Pipeline::new(
                Scanner::from_reader(input.as_bytes()),
                StreamingReducer::default(),
            );
            black_box(pipeline.run().len())
        })
    });

    group.bench_function("threaded_1k_lines", |b| {
        b.iter(|| match spawn(Scanner::from_text(input.clone())) {
            Ok(stream) => black_box(stream.count()),
            Err(_) => 0,
        })
    });

    group.finish();
}

criterion_group!(benches, bench_drivers);
criterion_main!(benches);
