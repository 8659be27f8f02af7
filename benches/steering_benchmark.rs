/*
 * Steering Simulation Benchmark
 *
 * Measures the world tick at several population sizes, the behavior set
 * evaluation on its own, and particle updates with and without rayon.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use steering::{
    BehaviorSet, Color, Evade, SimulationParams, Steer, SteeringInput, Target, Vector2D, Wander, WanderConfig, World,
};

// Benchmark a full world tick for different population sizes
fn bench_world_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_tick");

    for num_wanderers in [10, 100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_wanderers), num_wanderers, |b, &n| {
            let params = SimulationParams {
                num_wanderers: n,
                num_seekers: 2,
                num_followers: 2,
                num_agents: 1,
                seed: Some(7),
                ..SimulationParams::default()
            };
            let mut world = World::from_params(&params).expect("valid parameters");

            b.iter(|| {
                world.tick();
                black_box(world.ticks());
            });
        });
    }

    group.finish();
}

// Benchmark the combined force of a wander + evade set
fn bench_behavior_force(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut behaviors = BehaviorSet::new()
        .with(Wander::new(WanderConfig::default(), &mut rng))
        .with(Evade::new(Target::Point(Vector2D::new(50.0, 50.0))).with_panic_distance(150.0));

    c.bench_function("behavior_set_force", |b| {
        b.iter(|| {
            let input = SteeringInput::standalone(Vector2D::new(1.0, 2.0), Vector2D::new(100.0, 80.0), 4.0, 3.0, 20.0);
            black_box(behaviors.force(black_box(&input), &mut rng))
        })
    });
}

// Benchmark particle updates, sequential against parallel
fn bench_particles(c: &mut Criterion) {
    let mut group = c.benchmark_group("particles");

    for parallel in [false, true] {
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(label, |b| {
            let params = SimulationParams {
                num_wanderers: 0,
                num_seekers: 0,
                num_followers: 0,
                num_agents: 0,
                seed: Some(3),
                ..SimulationParams::default()
            };
            let mut world = World::from_params(&params).expect("valid parameters");
            world.set_parallel(parallel);
            world.explode(world.bounds().centre(), 20_000, 3.0, Color::WHITE);

            b.iter(|| world.tick());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_world_tick, bench_behavior_force, bench_particles);
criterion_main!(benches);
