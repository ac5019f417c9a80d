//! End-to-end cost of the built-in demonstrations
//!
//! Includes settings validation, sampling the scenario, every loop and the
//! step metrics, sequentially and with one thread per loop.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use loopsim::{demos, Experiment};

fn bench_demos(c: &mut Criterion) {
    let mut group = c.benchmark_group("Demos");

    for settings in demos::all() {
        group.bench_with_input(
            BenchmarkId::new("sequential", &settings.name),
            &settings,
            |b, settings| {
                b.iter(|| {
                    let experiment = Experiment::from_settings(black_box(settings)).unwrap();
                    black_box(experiment.run(false).unwrap())
                });
            },
        );

        let experiment = Experiment::from_settings(&settings).unwrap();
        group.bench_with_input(
            BenchmarkId::new("parallel", &settings.name),
            &experiment,
            |b, experiment| {
                b.iter(|| black_box(experiment.run(true).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let report = Experiment::from_settings(&demos::pi_disturbance())
        .unwrap()
        .run(false)
        .unwrap();

    c.bench_function("Report summary", |b| {
        b.iter(|| black_box(report.summary()));
    });
}

criterion_group!(benches, bench_demos, bench_summary);
criterion_main!(benches);
