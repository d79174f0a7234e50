use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use poiseuille_uncertain::{PressureDropModel, SamplingConfig, SimulationConfig, Uncertain, simulate};
use std::hint::black_box;
use std::time::Duration;

fn benchmark_input_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("input_sampling");

    let length = Uncertain::bounded_uniform(1.0, 0.01).unwrap();
    let viscosity = Uncertain::log_normal_from_moments(0.001, 0.002e-6).unwrap();

    group.bench_function("bounded_uniform_10k", |b| {
        b.iter(|| black_box(length.take_samples_seeded(10_000, 1)));
    });

    group.bench_function("log_normal_10k", |b| {
        b.iter(|| black_box(viscosity.take_samples_seeded(10_000, 1)));
    });

    group.finish();
}

fn benchmark_pressure_drop_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("pressure_drop_sampling");
    group.measurement_time(Duration::from_secs(10));

    let pressure_drop = PressureDropModel::default().pressure_drop().unwrap();

    for trials in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("sequential", trials), &trials, |b, &n| {
            b.iter(|| black_box(pressure_drop.take_samples_seeded(n, 42)));
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", trials), &trials, |b, &n| {
            b.iter(|| black_box(pressure_drop.take_samples_par(n, 42)));
        });
    }

    group.finish();
}

fn benchmark_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(20);

    for parallel in [false, true] {
        let config = SimulationConfig {
            sampling: SamplingConfig {
                parallel,
                ..SamplingConfig::seeded(100_000, 42)
            },
            ..SimulationConfig::default()
        };
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| black_box(simulate(black_box(&config)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_input_sampling,
    benchmark_pressure_drop_sampling,
    benchmark_simulate
);
criterion_main!(benches);
