use std::f32::consts::FRAC_PI_2;

use steering::{
    BehaviorSet, Boid, BoidConfig, Color, ConfigError, ForcePolicy, Particle, Seek, SequenceSource, SimulationParams,
    Steer, SteeringInput, Target, Vector2D, Wander, World, WorldBounds,
};

const EPS: f32 = 1e-5;

/// Canvas used by most tests
pub fn bounds() -> WorldBounds {
    WorldBounds::new(800.0, 600.0)
}

/// A boid steering towards a fixed point
pub fn seeker(config: BoidConfig, target: Vector2D) -> Boid {
    let behaviors = BehaviorSet::new().with(Seek::new(Target::Point(target)));
    Boid::new(config, Some(behaviors)).unwrap()
}

// ==================================================================================
// Vector tests
// ==================================================================================

#[test]
fn normalize_falls_back_to_unit_x() {
    let mut zero = Vector2D::ZERO;
    zero.normalize();
    assert_eq!(zero, Vector2D::new(1.0, 0.0));

    let mut v = Vector2D::new(3.0, 4.0);
    v.normalize();
    assert!(v.approx_eq(Vector2D::new(0.6, 0.8), EPS));
    assert!(v.is_normalized());
}

#[test]
fn truncate_only_shrinks() {
    let mut long = Vector2D::new(6.0, 8.0);
    long.truncate(5.0);
    assert!(long.approx_eq(Vector2D::new(3.0, 4.0), EPS));

    let mut short = Vector2D::new(1.0, 1.0);
    short.truncate(5.0);
    assert_eq!(short, Vector2D::new(1.0, 1.0));
}

#[test]
fn length_and_angle_setters_preserve_the_other() {
    let mut v = Vector2D::new(3.0, 4.0);
    let angle = v.angle();
    v.set_length(10.0);
    assert!((v.angle() - angle).abs() < EPS);
    assert!(v.approx_eq(Vector2D::new(6.0, 8.0), 1e-4));

    v.set_angle(FRAC_PI_2);
    assert!((v.length() - 10.0).abs() < 1e-4);
    assert!(v.approx_eq(Vector2D::new(0.0, 10.0), 1e-4));

    // a zero vector grows along +x
    let mut z = Vector2D::ZERO;
    z.set_length(2.0);
    assert_eq!(z, Vector2D::new(2.0, 0.0));
}

#[test]
fn degenerate_scaling_yields_zero() {
    let mut v = Vector2D::new(3.0, 4.0);
    v.divide(0.0);
    assert!(v.is_zero());

    let mut w = Vector2D::new(3.0, 4.0);
    w.set_length(0.0);
    assert!(w.is_zero());
}

#[test]
fn chaining_and_copies() {
    let a = Vector2D::new(1.0, 2.0);
    let sum = a.copy_and_add(Vector2D::new(3.0, 4.0));
    assert_eq!(a, Vector2D::new(1.0, 2.0));
    assert_eq!(sum, Vector2D::new(4.0, 6.0));

    let mut b = a;
    b.add(Vector2D::new(1.0, 1.0)).multiply(2.0).subtract(Vector2D::new(4.0, 0.0));
    assert_eq!(b, Vector2D::new(0.0, 6.0));

    assert_eq!(a.perpendicular(), Vector2D::new(-2.0, 1.0));
    assert_eq!(a.dist_sq(Vector2D::new(4.0, 6.0)), 25.0);
}

// ==================================================================================
// Behavior tests
// ==================================================================================

#[test]
fn wander_is_deterministic_with_a_scripted_source() {
    let mut wander = Wander::from_state(10.0, 0.0, 1.0);
    let mut rng = SequenceSource::new(vec![0.75]);
    let input = SteeringInput::standalone(Vector2D::new(2.0, 0.0), Vector2D::new(50.0, 50.0), 4.0, 3.0, 20.0);

    let first = wander.force(&input, &mut rng);
    assert!(first.approx_eq(Vector2D::new(10.2, 0.0), EPS));
    assert!((wander.wander_angle() - 0.25).abs() < EPS);

    let second = wander.force(&input, &mut rng);
    let expected = Vector2D::new(10.0 + 0.2 * 0.25f32.cos(), 0.2 * 0.25f32.sin());
    assert!(second.approx_eq(expected, EPS));
    assert!((wander.wander_angle() - 0.5).abs() < EPS);
}

#[test]
fn empty_behavior_set_gives_no_force() {
    let mut set = BehaviorSet::new();
    let mut rng = SequenceSource::default();
    let input = SteeringInput::standalone(Vector2D::new(1.0, 1.0), Vector2D::ZERO, 4.0, 3.0, 20.0);
    assert!(set.force(&input, &mut rng).is_zero());
}

// ==================================================================================
// Body tests
// ==================================================================================

#[test]
fn missing_behaviors_is_a_config_error() {
    assert_eq!(
        Boid::new(BoidConfig::default(), None).unwrap_err(),
        ConfigError::MissingBehaviors
    );
}

#[test]
fn steering_force_lags_one_tick() {
    let config = BoidConfig { vx: 1.0, ..BoidConfig::at(100.0, 100.0) };
    let mut boid = seeker(config, Vector2D::new(100.0, 500.0));
    let mut rng = SequenceSource::default();

    boid.update(bounds(), &[], &mut rng);
    // facing and displacement still follow last tick's velocity
    assert_eq!(boid.rotation(), 0.0);
    assert_eq!(boid.position(), Vector2D::new(101.0, 100.0));
    // the new force only shows up in velocity
    assert!(boid.velocity().y > 0.0);

    let turned = boid.velocity();
    boid.update(bounds(), &[], &mut rng);
    assert!((boid.rotation() - turned.angle()).abs() < EPS);
    assert!(boid.position().y > 100.0);
}

#[test]
fn position_waits_a_tick_for_the_first_force() {
    let mut boid = seeker(BoidConfig::at(100.0, 100.0), Vector2D::new(700.0, 100.0));
    let mut rng = SequenceSource::default();

    boid.update(bounds(), &[], &mut rng);
    assert_eq!(boid.position(), Vector2D::new(100.0, 100.0));
    assert!(boid.velocity().approx_eq(Vector2D::new(3.0, 0.0), EPS));

    boid.update(bounds(), &[], &mut rng);
    assert!(boid.position().approx_eq(Vector2D::new(103.0, 100.0), EPS));
}

#[test]
fn mass_scaled_policy_divides_by_mass() {
    let target = Vector2D::new(500.0, 100.0);
    let unscaled = BoidConfig::at(100.0, 100.0);
    let scaled = BoidConfig { force_policy: ForcePolicy::MassScaled, ..BoidConfig::at(100.0, 100.0) };
    let mut a = seeker(unscaled, target);
    let mut b = seeker(scaled, target);
    let mut rng = SequenceSource::default();

    a.update(bounds(), &[], &mut rng);
    b.update(bounds(), &[], &mut rng);

    // seek from rest: desired (4, 0) truncated to max acceleration 3
    assert!(a.velocity().approx_eq(Vector2D::new(3.0, 0.0), EPS));
    assert!(b.velocity().approx_eq(Vector2D::new(3.0 / 20.0, 0.0), EPS));
}

#[test]
fn right_wall_bounce_clamps_and_reverses() {
    let config = BoidConfig { vx: 4.0, bounce: -0.5, ..BoidConfig::at(785.0, 300.0) };
    let mut boid = Boid::new(config, Some(BehaviorSet::new())).unwrap();
    let mut rng = SequenceSource::default();

    boid.update(bounds(), &[], &mut rng);
    assert_eq!(boid.position().x, 780.0);
    assert_eq!(boid.velocity().x, -2.0);
}

#[test]
fn update_order_does_not_matter() {
    let make = || {
        let a = seeker(BoidConfig { vx: 1.0, ..BoidConfig::at(100.0, 100.0) }, Vector2D::ZERO);
        let b = Boid::new(
            BoidConfig { vy: -2.0, ..BoidConfig::at(300.0, 200.0) },
            Some(BehaviorSet::new().with(Seek::new(Target::Body(0)))),
        )
        .unwrap();
        vec![a, b]
    };
    let mut rng = SequenceSource::default();

    let mut forward = make();
    let snapshots: Vec<_> = forward.iter().map(Boid::snapshot).collect();
    for boid in forward.iter_mut() {
        boid.update(bounds(), &snapshots, &mut rng);
    }

    let mut backward = make();
    let snapshots: Vec<_> = backward.iter().map(Boid::snapshot).collect();
    for boid in backward.iter_mut().rev() {
        boid.update(bounds(), &snapshots, &mut rng);
    }

    assert_eq!(forward, backward);
}

// ==================================================================================
// Particle tests
// ==================================================================================

#[test]
fn particle_side_wall_reverses_without_damping() {
    let r = 4.0;
    let start = Vector2D::new(800.0 - r - 0.1, 200.0);
    let mut p = Particle::with_velocity(start, Vector2D::new(3.0, 0.0), r, Color::WHITE);
    p.update(bounds());
    assert_eq!(p.velocity.x, -3.0);
}

#[test]
fn particle_floor_applies_bounce_and_friction() {
    let r = 4.0;
    let mut p = Particle::with_velocity(Vector2D::new(400.0, 599.0), Vector2D::new(1.0, 2.0), r, Color::WHITE);
    p.update(bounds());
    assert!((p.velocity.x - 0.9).abs() < EPS);
    assert!((p.velocity.y - 2.0 * -0.6 * 0.9).abs() < EPS);
}

// ==================================================================================
// World and parameter tests
// ==================================================================================

#[test]
fn seeded_worlds_replay_identically() {
    let params = SimulationParams {
        num_wanderers: 8,
        num_seekers: 1,
        num_followers: 1,
        num_agents: 1,
        bounce: -0.7,
        seed: Some(42),
        ..SimulationParams::default()
    };
    let mut a = World::from_params(&params).unwrap();
    let mut b = World::from_params(&params).unwrap();
    a.explode(Vector2D::new(200.0, 200.0), 10, 3.0, Color::WHITE);
    b.explode(Vector2D::new(200.0, 200.0), 10, 3.0, Color::WHITE);

    for _ in 0..120 {
        a.tick();
        b.tick();
    }

    assert_eq!(a.boids(), b.boids());
    assert_eq!(a.particles(), b.particles());
    assert_eq!(a.ticks(), 120);
}

#[test]
fn bouncing_boids_stay_inside_the_world() {
    let params = SimulationParams {
        num_wanderers: 20,
        bounce: -0.7,
        seed: Some(5),
        ..SimulationParams::default()
    };
    let mut world = World::from_params(&params).unwrap();
    for _ in 0..500 {
        world.tick();
    }
    let bounds = world.bounds();
    for boid in world.boids() {
        let p = boid.position();
        assert!(p.x >= boid.radius() && p.x <= bounds.width - boid.radius());
        assert!(p.y >= boid.radius() && p.y <= bounds.height - boid.radius());
    }
}

#[test]
fn params_load_from_json_file() {
    let path = std::env::temp_dir().join(format!("steering-params-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "num_wanderers": 4, "gravity": 0.5, "force_policy": "MassScaled" }"#).unwrap();

    let params = SimulationParams::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(params.num_wanderers, 4);
    assert_eq!(params.gravity, 0.5);
    assert_eq!(params.force_policy, ForcePolicy::MassScaled);
    assert_eq!(params.world_width, SimulationParams::default().world_width);
}
