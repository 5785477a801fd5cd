//! Falling box demonstration
//!
//! Drops a box and a ball onto a static floor and prints their state while
//! a fixed-timestep loop consumes simulated 60 Hz frames.
//!
//! Run with `RUST_LOG=debug` to see the world's own logging.

use void_physics2d::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("Falling Box Demo");
    println!("================\n");

    let mut world = PhysicsWorld::new(PhysicsConfig::default())?;

    let floor = world.create_body(
        Shape::rect(400.0, 20.0),
        RigidBodyDesc::fixed().with_position(0.0, 200.0),
    );
    let crate_box = world.create_body(
        Shape::square(40.0),
        RigidBodyDesc::dynamic().with_material(PhysicsMaterial::wood()),
    );
    let ball = world.create_body(
        Shape::circle(15.0),
        RigidBodyDesc::dynamic()
            .with_position(80.0, -50.0)
            .with_material(PhysicsMaterial::rubber()),
    );

    world.add_pair(crate_box, floor)?;
    world.add_pair(ball, floor)?;
    world.add_pair(crate_box, ball)?;

    let frame_time = 1.0 / 60.0;
    for frame in 0..120 {
        world.step(frame_time);

        for event in world.collision_events() {
            println!(
                "  frame {:3}: contact {:?} <-> {:?}, depth {:.3}",
                frame, event.body_a, event.body_b, event.depth
            );
        }

        if frame % 20 == 0 {
            let b = world.body(crate_box)?;
            let c = world.body(ball)?;
            println!(
                "frame {:3}: box y={:8.3} vy={:8.3} | ball y={:8.3} vy={:8.3}",
                frame,
                b.position().y,
                b.linear_velocity.y,
                c.position().y,
                c.linear_velocity.y
            );
        }
    }

    let b = world.body(crate_box)?;
    println!("\nBox settled at ({:.2}, {:.2})", b.position().x, b.position().y);

    Ok(())
}
