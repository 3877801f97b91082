// benches/bench_light_derivation.rs
use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, Criterion, PlotConfiguration,
};
use std::time::Duration;

use intersection_sim::control_system::light_derivation::derive_lights;
use intersection_sim::control_system::SchedulerState;
use intersection_sim::data_structures::SubPhase;

/// Every reachable (active direction, sub-phase) pair while running.
fn all_running_states() -> Vec<SchedulerState> {
    (0..4)
        .flat_map(|active_index| {
            [SubPhase::Green, SubPhase::Yellow]
                .into_iter()
                .map(move |sub_phase| SchedulerState {
                    active_index,
                    sub_phase,
                    running: true,
                    has_started: true,
                })
        })
        .collect()
}

fn bench_derive_lights(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_lights");

    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));
    group.warm_up_time(Duration::from_secs(2));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Linear));

    let states = all_running_states();
    group.bench_function("all_states", |b| {
        b.iter(|| {
            for state in &states {
                black_box(derive_lights(black_box(state)));
            }
        });
    });
    group.bench_function("idle", |b| {
        let idle = SchedulerState::default();
        b.iter(|| black_box(derive_lights(black_box(&idle))));
    });
    group.finish();
}

criterion_group!(benches, bench_derive_lights);
criterion_main!(benches);
