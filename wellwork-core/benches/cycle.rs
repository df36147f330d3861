use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wellwork_core::scorer::{self, Conditions};
use wellwork_core::{BreakScheduler, ClimateReading, SampleAccumulator, SensorSample, VirtualTime};

/// Benchmark scoring a single reading (hot path)
fn bench_score(c: &mut Criterion) {
    c.bench_function("score", |b| {
        b.iter(|| {
            scorer::score(
                black_box(29.5),
                black_box(72.0),
                black_box(10),
                black_box(true),
            )
        });
    });
}

/// Benchmark the full assessment including advice
fn bench_assess(c: &mut Criterion) {
    let conditions = Conditions::evaluate(31.0, 25.0, 21, false);

    c.bench_function("assess", |b| {
        b.iter(|| scorer::assess(black_box(&conditions)));
    });
}

/// Benchmark filling and draining an averaging window of varying size
fn bench_accumulate_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulate_drain");
    let sample = SensorSample::new(ClimateReading::new(23.4, 48.0), 812);

    for window in [1u32, 6, 60, 600].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(window), window, |b, &window| {
            let mut acc = SampleAccumulator::new();
            b.iter(|| {
                for _ in 0..window {
                    acc.accumulate(black_box(&sample), black_box(100));
                }
                acc.drain_means()
            });
        });
    }
    group.finish();
}

/// Benchmark one virtual day of break scheduling, minute by minute
fn bench_scheduler_day(c: &mut Criterion) {
    c.bench_function("scheduler_day", |b| {
        b.iter(|| {
            let mut scheduler = BreakScheduler::new();
            let mut fired = 0usize;
            for hour in 0..24u8 {
                for minute in 0..60u8 {
                    let tick = scheduler.tick(VirtualTime::new((hour + 7) % 24, minute));
                    fired += tick.fired.len();
                }
            }
            black_box(fired)
        });
    });
}

criterion_group!(
    benches,
    bench_score,
    bench_assess,
    bench_accumulate_drain,
    bench_scheduler_day
);
criterion_main!(benches);
