// benches/bench_phase_scheduler.rs
use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration,
};
use std::time::Duration;

use intersection_sim::control_system::PhaseScheduler;
use intersection_sim::global_variables::TimingConfig;

// One full rotation with default timings: 4 x (5000 ms green + 1000 ms yellow).
const CYCLE_MS: u64 = 24_000;

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_to");

    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));
    group.warm_up_time(Duration::from_secs(2));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    // Catch up over 10, 100 and 1000 full rotations in one call.
    for &cycles in [10u64, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(cycles), &cycles, |b, &cycles| {
            b.iter(|| {
                let mut scheduler = PhaseScheduler::new(TimingConfig::default());
                scheduler.start(Duration::ZERO);
                let transitions =
                    scheduler.advance_to(Duration::from_millis(cycles * CYCLE_MS));
                black_box(transitions.len());
            });
        });
    }
    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));
    group.warm_up_time(Duration::from_secs(2));

    group.bench_function("start_stop", |b| {
        let mut scheduler = PhaseScheduler::new(TimingConfig::default());
        let mut now = Duration::ZERO;
        b.iter(|| {
            now += Duration::from_millis(1);
            black_box(scheduler.toggle(now));
        });
    });
    group.finish();
}

criterion_group!(benches, bench_advance, bench_toggle);
criterion_main!(benches);
