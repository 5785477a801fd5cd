//! Whole-world simulation tests for void_physics2d
//!
//! These drive `PhysicsWorld` tick by tick and check the behaviour that only
//! shows up when integration, detection and response run together.

use approx::assert_relative_eq;
use void_physics2d::integrator::integrate;
use void_physics2d::prelude::*;

const DT: f64 = 1.0 / 144.0;

fn world(config: PhysicsConfig) -> PhysicsWorld {
    PhysicsWorld::new(config).unwrap()
}

fn ball(world: &mut PhysicsWorld, x: f64, y: f64, vx: f64) -> BodyHandle {
    world.create_body(
        Shape::circle(10.0),
        RigidBodyDesc::dynamic()
            .with_position(x, y)
            .with_linear_velocity(vx, 0.0),
    )
}

/// Box A (40x40, mass 1, no bounce) falls onto static box B (100x20 at y=200)
#[test]
fn box_comes_to_rest_on_static_ground() {
    let mut world = world(PhysicsConfig::default());
    let falling = world.create_body(Shape::square(40.0), RigidBodyDesc::dynamic().with_mass(1.0));
    let ground = world.create_body(
        Shape::rect(100.0, 20.0),
        RigidBodyDesc::fixed().with_position(0.0, 200.0),
    );
    world.add_pair(falling, ground).unwrap();

    for _ in 0..200 {
        world.tick();
    }

    let body = world.body(falling).unwrap();
    let resting_y = 200.0 - 10.0 - 20.0;
    assert!(
        (body.position().y - resting_y).abs() < 3.0,
        "box should rest near y={}, got {}",
        resting_y,
        body.position().y
    );
    // A flat two-point contact removes 40% of the approach speed per pass,
    // so what is left each tick stays within 1.5 ticks of gravity
    let vy = body.linear_velocity.y;
    assert!(
        (0.0..=1.5 * 500.0 * DT + 1e-6).contains(&vy),
        "box should settle without bouncing, vy={}",
        vy
    );
    assert!(body.transform.rotation.abs() < 1e-6);

    let ground = world.body(ground).unwrap();
    assert_eq!(ground.position(), Vec2::new(0.0, 200.0));
    assert_eq!(ground.linear_velocity, Vec2::ZERO);
    assert_eq!(ground.angular_velocity, 0.0);
}

#[test]
fn equal_elastic_circles_swap_velocities() {
    let mut world = world(PhysicsConfig::zero_gravity());
    let a = ball(&mut world, 0.0, 0.0, 100.0);
    let b = ball(&mut world, 19.0, 0.0, -100.0);
    for handle in [a, b] {
        world.body_mut(handle).unwrap().restitution = 1.0;
    }
    world.add_pair(a, b).unwrap();

    let energy = |world: &PhysicsWorld| -> f64 {
        [a, b]
            .iter()
            .map(|&h| {
                let body = world.body(h).unwrap();
                0.5 * body.mass * body.linear_velocity.length_squared()
            })
            .sum()
    };
    let before = energy(&world);

    world.tick();

    assert_eq!(world.collision_events().len(), 1);
    assert_relative_eq!(world.body(a).unwrap().linear_velocity.x, -100.0, epsilon = 1e-9);
    assert_relative_eq!(world.body(b).unwrap().linear_velocity.x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(energy(&world), before, epsilon = 1e-6);
}

#[test]
fn bouncy_ball_reverses_on_ground() {
    let mut world = world(PhysicsConfig::default());
    let ball = world.create_body(
        Shape::circle(10.0),
        RigidBodyDesc::dynamic().with_restitution(0.8),
    );
    let ground = world.create_body(
        Shape::rect(100.0, 20.0),
        RigidBodyDesc::fixed().with_position(0.0, 200.0),
    );
    world.add_pair(ball, ground).unwrap();

    let mut impact_speed = None;
    for _ in 0..400 {
        let vy = world.body(ball).unwrap().linear_velocity.y;
        world.tick();
        if !world.collision_events().is_empty() {
            impact_speed = Some(vy + 500.0 * DT);
            break;
        }
    }

    let impact_speed = impact_speed.expect("ball never reached the ground");
    let after = world.body(ball).unwrap().linear_velocity.y;
    assert!(after < 0.0, "ball should move up after the bounce");
    assert_relative_eq!(after, -0.8 * impact_speed, epsilon = 1e-6);
}

#[test]
fn static_body_is_never_disturbed() {
    let mut world = world(PhysicsConfig::default());
    let ground = world.create_body(
        Shape::rect(300.0, 20.0),
        RigidBodyDesc::fixed().with_position(0.0, 100.0),
    );

    let mut falling = Vec::new();
    for i in 0..4 {
        let x = -90.0 + 60.0 * i as f64;
        let handle = world.create_body(
            Shape::square(20.0),
            RigidBodyDesc::dynamic()
                .with_position(x, 0.0)
                .with_rotation(0.2 * i as f64),
        );
        world.add_pair(handle, ground).unwrap();
        falling.push(handle);
    }

    for _ in 0..300 {
        world.tick();
        let ground = world.body(ground).unwrap();
        assert_eq!(ground.position(), Vec2::new(0.0, 100.0));
        assert_eq!(ground.transform.rotation, 0.0);
        assert_eq!(ground.linear_velocity, Vec2::ZERO);
        assert_eq!(ground.angular_velocity, 0.0);
    }

    for handle in falling {
        assert!(world.body(handle).unwrap().position().is_finite());
    }
}

#[test]
fn damping_decays_exponentially_without_reversing() {
    let mut world = world(PhysicsConfig::zero_gravity());
    let body = world.create_body(
        Shape::circle(5.0),
        RigidBodyDesc::dynamic()
            .with_linear_velocity(200.0, -80.0)
            .with_linear_damping(1.5, 1.5)
            .with_angular_velocity(4.0)
            .with_angular_damping(0.5),
    );

    let ticks = 100;
    for _ in 0..ticks {
        world.tick();
        let v = world.body(body).unwrap().linear_velocity;
        assert!(v.x >= 0.0 && v.y <= 0.0);
    }

    let t = ticks as f64 * DT;
    let body = world.body(body).unwrap();
    assert_relative_eq!(body.linear_velocity.x, 200.0 * (-1.5 * t).exp(), epsilon = 1e-9);
    assert_relative_eq!(body.linear_velocity.y, -80.0 * (-1.5 * t).exp(), epsilon = 1e-9);
    assert_relative_eq!(body.angular_velocity, 4.0 * (-0.5 * t).exp(), epsilon = 1e-9);
}

#[test]
fn pair_order_changes_the_outcome() {
    let config = PhysicsConfig::zero_gravity().with_solver_iterations(1);

    let run = |order: [(usize, usize); 2]| -> Vec<f64> {
        let mut world = world(config.clone());
        let handles = [
            ball(&mut world, 0.0, 0.0, 0.0),
            ball(&mut world, 15.0, 0.0, 0.0),
            ball(&mut world, 30.0, 0.0, 0.0),
        ];
        for (a, b) in order {
            world.add_pair(handles[a], handles[b]).unwrap();
        }
        world.tick();
        handles
            .iter()
            .map(|&h| world.body(h).unwrap().position().x)
            .collect()
    };

    let forward = run([(0, 1), (1, 2)]);
    let backward = run([(1, 2), (0, 1)]);

    assert_relative_eq!(forward[0], -2.5);
    assert_relative_eq!(forward[1], 13.75);
    assert_relative_eq!(forward[2], 33.75);

    assert_relative_eq!(backward[0], -3.75);
    assert_relative_eq!(backward[1], 16.25);
    assert_relative_eq!(backward[2], 32.5);
}

#[test]
fn stacked_boxes_settle() {
    let mut world = world(PhysicsConfig::default());
    let ground = world.create_body(
        Shape::rect(200.0, 20.0),
        RigidBodyDesc::fixed().with_position(0.0, 200.0),
    );
    let lower = world.create_body(Shape::square(40.0), RigidBodyDesc::dynamic().with_position(0.0, 168.0));
    let upper = world.create_body(Shape::square(40.0), RigidBodyDesc::dynamic().with_position(0.0, 126.0));
    world.add_pair(lower, ground).unwrap();
    world.add_pair(upper, lower).unwrap();

    for _ in 0..400 {
        world.tick();
    }

    let lower = world.body(lower).unwrap().position();
    let upper = world.body(upper).unwrap().position();
    assert!((lower.y - 170.0).abs() < 5.0, "lower box at {}", lower.y);
    assert!((upper.y - 130.0).abs() < 5.0, "upper box at {}", upper.y);
    assert!(lower.x.abs() < 1e-6 && upper.x.abs() < 1e-6);
}

#[test]
fn fixed_timestep_runs_whole_ticks() {
    let mut world = world(PhysicsConfig::default());
    let body = world.create_body(Shape::circle(5.0), RigidBodyDesc::dynamic());

    let mut ticks = 0;
    for _ in 0..60 {
        ticks += world.step(1.0 / 60.0);
    }

    // One second of frames at 144 Hz, minus what is still accumulated
    assert!((143..=144).contains(&ticks), "ran {} ticks", ticks);

    let mut reference = RigidBody::dynamic(Shape::circle(5.0));
    for _ in 0..ticks {
        integrate(&mut reference, DT, Vec2::new(0.0, 500.0));
    }
    assert_relative_eq!(
        world.body(body).unwrap().position().y,
        reference.position().y,
        epsilon = 1e-9
    );
}
