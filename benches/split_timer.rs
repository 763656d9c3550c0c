use criterion::{black_box, criterion_group, criterion_main, Criterion};
use splitwatch::{CycleClock, IntervalTimer, SplitTimer, SteadyClock};

const SPLITS: usize = 1024;

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");

    group.bench_function("steady_clock", |b| {
        let mut timer = SplitTimer::<SPLITS, SteadyClock>::new(false);
        b.iter(|| {
            if timer.is_full() {
                timer.start();
            }
            timer.split();
        });
    });

    let clock = CycleClock::new();
    group.bench_function("cycle_clock", |b| {
        let mut timer = SplitTimer::<SPLITS, _>::with_clock(clock, false);
        b.iter(|| {
            if timer.is_full() {
                timer.start();
            }
            timer.split();
        });
    });

    group.finish();
}

fn bench_seconds(c: &mut Criterion) {
    let timer = SplitTimer::<SPLITS, SteadyClock>::new(true);
    while !timer.is_full() {
        timer.split();
    }

    c.bench_function("seconds_1024", |b| b.iter(|| black_box(timer.seconds())));
}

fn bench_interval(c: &mut Criterion) {
    let mut timer = IntervalTimer::<SteadyClock>::new(false);

    c.bench_function("interval_start_stop", |b| {
        b.iter(|| {
            timer.start();
            timer.stop();
            black_box(timer.seconds())
        })
    });
}

criterion_group!(benches, bench_split, bench_seconds, bench_interval);
criterion_main!(benches);
