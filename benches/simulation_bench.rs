use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use polymer_flow::*;
use std::hint::black_box;

fn prepare_simulation(population: usize, parallel: bool) -> Simulation {
    let config = SimulationConfig::default()
        .with_population(population)
        .with_flow_intensity(50.0);
    let mut sim = Simulation::with_seed(config, 7).expect("benchmark config is valid");
    sim.set_parallel_enabled(parallel);
    sim
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    for &count in &[50usize, 200, 800] {
        group.bench_with_input(
            BenchmarkId::new("sequential", count),
            &count,
            |b, &count| {
                let mut sim = prepare_simulation(count, false);
                b.iter(|| {
                    sim.advance();
                    black_box(sim.time())
                })
            },
        );
        group.bench_with_input(BenchmarkId::new("parallel", count), &count, |b, &count| {
            let mut sim = prepare_simulation(count, true);
            b.iter(|| {
                sim.advance();
                black_box(sim.time())
            })
        });
    }
    group.finish();
}

fn bench_relaxation(c: &mut Criterion) {
    let mut group = c.benchmark_group("relaxation");
    for &iterations in &[1usize, 10, 40] {
        group.bench_with_input(
            BenchmarkId::new("iterations", iterations),
            &iterations,
            |b, &iterations| {
                let solver = ConstraintSolver::new(6.0, iterations, 90.0);
                let template: Vec<Particle> = (0..64)
                    .map(|i| Particle::new(Vec2::new(i as f32 * 7.5, (i % 3) as f32 * 2.0)))
                    .collect();
                b.iter(|| {
                    let mut particles = template.clone();
                    solver.relax(&mut particles);
                    black_box(particles)
                })
            },
        );
    }
    group.finish();
}

fn bench_flow_grid(c: &mut Criterion) {
    let field = FlowField::new(FlowParams::default(), 800.0);
    c.bench_function("flow_grid_20px", |b| {
        b.iter(|| black_box(field.sample_grid(Domain::new(1200.0, 800.0), 20.0, 1.5, 60.0)))
    });
}

criterion_group!(benches, bench_advance, bench_relaxation, bench_flow_grid);
criterion_main!(benches);
