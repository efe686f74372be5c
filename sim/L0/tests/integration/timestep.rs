//! Frame timing against the fixed-step accumulator.

use approx::assert_relative_eq;
use clatter_core::{NullAudio, SimulationContext, World};
use clatter_types::{Point3, ShapeKind, SimulationConfig};

use super::common::{empty_context, FRAME};

#[test]
fn zero_delta_frame_changes_nothing() {
    let mut ctx = empty_context();
    let sphere = ctx.spawn_sphere(0.5, Point3::new(0.0, 3.0, 0.0));
    ctx.tick(FRAME, &mut NullAudio);
    let before = ctx.world().body_pose(sphere.body()).unwrap();
    let steps = ctx.world().step_count();

    let report = ctx.tick(FRAME, &mut NullAudio);

    assert_relative_eq!(report.delta, 0.0);
    assert_eq!(report.substeps, 0);
    assert_eq!(ctx.world().step_count(), steps);
    assert_eq!(ctx.world().body_pose(sphere.body()).unwrap(), before);
}

#[test]
fn clock_going_backwards_does_not_step() {
    let mut ctx = empty_context();
    ctx.tick(1.0, &mut NullAudio);
    let steps = ctx.world().step_count();

    let report = ctx.tick(0.5, &mut NullAudio);

    assert!(report.delta < 0.0);
    assert_eq!(report.substeps, 0);
    assert_eq!(ctx.world().step_count(), steps);
}

#[test]
fn long_frame_is_capped_at_three_steps() {
    let mut ctx = empty_context();
    let report = ctx.tick(0.25, &mut NullAudio);

    assert_eq!(report.substeps, 3);
    assert!(report.dropped > 0.0);
    assert_relative_eq!(ctx.world().time(), 3.0 * FRAME, epsilon = 1e-12);
    assert!(ctx.world().accumulator() < FRAME);
}

#[test]
fn slow_frames_catch_up_within_cap() {
    let mut ctx = empty_context();
    // 30 fps: two fixed steps per frame.
    for frame in 1..=30 {
        let report = ctx.tick(f64::from(frame) / 30.0, &mut NullAudio);
        assert!(report.substeps <= 3);
        assert_relative_eq!(report.dropped, 0.0);
    }
    assert_relative_eq!(ctx.world().time(), 1.0, epsilon = FRAME + 1e-9);
}

#[test]
fn simulated_time_tracks_wall_time() {
    let mut world = World::new(&SimulationConfig::default()).unwrap();
    world.add_dynamic_body(ShapeKind::sphere(0.5), Point3::new(0.0, 3.0, 0.0));
    for _ in 0..120 {
        world.step(FRAME, FRAME, 3);
    }
    assert_eq!(world.step_count(), 120);
    assert_relative_eq!(world.time(), 2.0, epsilon = 1e-9);
}

#[test]
fn custom_cadence_is_respected() {
    let config = SimulationConfig::high_fidelity().seed(3);
    let mut ctx = SimulationContext::new(config, clatter_types::SpawnConfig::default()).unwrap();
    let report = ctx.tick(4.5 / 240.0, &mut NullAudio);
    assert_eq!(report.substeps, 4);
    assert_relative_eq!(ctx.world().accumulator(), 0.5 / 240.0, epsilon = 1e-12);
}
