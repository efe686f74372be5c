//! A single sphere dropped onto the floor.

use approx::assert_relative_eq;
use clatter_core::{NullAudio, RecordingAudio, Scene};
use clatter_types::{Point3, ShapeKind, UnitQuaternion};

use super::common::{drop_context, empty_context, Driver};

#[test]
fn sphere_comes_to_rest_on_floor() {
    let mut ctx = drop_context(0.0);
    let sphere = ctx.pool().spheres()[0];
    let mut driver = Driver::new();

    for _ in 0..120 {
        driver.frame(&mut ctx, &mut NullAudio);
        let y = ctx.world().body_position(sphere.body()).unwrap().y;
        assert!(y > 0.0, "sphere centre went below the floor: {y}");
    }

    let position = ctx.world().body_position(sphere.body()).unwrap();
    assert_relative_eq!(position.y, 0.5, epsilon = 0.02);
    assert_relative_eq!(position.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(position.z, 0.0, epsilon = 1e-6);
    assert!(ctx.world().linear_velocity(sphere.body()).unwrap().norm() < 0.1);
}

#[test]
fn bouncing_sphere_never_passes_through_floor() {
    let mut ctx = drop_context(0.7);
    let sphere = ctx.pool().spheres()[0];
    let mut driver = Driver::new();

    for _ in 0..300 {
        driver.frame(&mut ctx, &mut NullAudio);
        let y = ctx.world().body_position(sphere.body()).unwrap().y;
        assert!(y > 0.3, "sphere sank into the floor: {y}");
    }
}

#[test]
fn first_impact_is_loud_enough() {
    let mut ctx = drop_context(0.7);
    let mut audio = RecordingAudio::new();
    let mut driver = Driver::new();

    let reports = driver.frames(&mut ctx, &mut audio, 60);

    let first_hit = reports.iter().position(|r| r.cues > 0).unwrap();
    // 2.5 m fall at 9.82 m/s² lands after ~0.71 s.
    assert!((38..=48).contains(&first_hit), "first cue at frame {first_hit}");
    assert!(audio.cues.iter().all(|c| (0.0..1.0).contains(&c.volume)));
}

#[test]
fn proxies_mirror_bodies_every_frame() {
    let mut ctx = empty_context();
    let sphere = ctx.spawn_sphere(0.5, Point3::new(0.2, 3.0, -0.4));
    let cube = ctx.spawn_box(0.7, Point3::new(-0.3, 4.0, 0.5));
    let mut driver = Driver::new();

    for _ in 0..180 {
        let report = driver.frame(&mut ctx, &mut NullAudio);
        assert_eq!(report.synced, 2);

        let proxy = ctx.scene().proxy(sphere.proxy()).unwrap();
        assert_eq!(proxy.position, ctx.world().body_position(sphere.body()).unwrap());

        let proxy = ctx.scene().proxy(cube.proxy()).unwrap();
        let pose = ctx.world().body_pose(cube.body()).unwrap();
        assert_eq!(proxy.position, pose.position);
        assert_eq!(proxy.orientation, pose.rotation);
    }
}

#[test]
fn sphere_proxy_keeps_spawn_orientation() {
    let mut ctx = empty_context();
    let sphere = ctx.spawn_sphere(0.3, Point3::new(0.0, 3.0, 0.0));
    ctx.spawn_box(0.9, Point3::new(0.1, 1.0, 0.0));
    let mut driver = Driver::new();
    driver.frames(&mut ctx, &mut NullAudio, 180);

    let proxy = ctx.scene().proxy(sphere.proxy()).unwrap();
    assert_eq!(proxy.orientation, UnitQuaternion::identity());
    assert_eq!(proxy.shape, ShapeKind::sphere(0.3));
}

#[test]
fn removed_proxy_is_not_resurrected_by_sync() {
    let mut ctx = empty_context();
    let sphere = ctx.spawn_sphere(0.5, Point3::new(0.0, 3.0, 0.0));
    ctx.scene_mut().remove_proxy(sphere.proxy());

    Driver::new().frames(&mut ctx, &mut NullAudio, 5);

    assert!(ctx.scene().proxy(sphere.proxy()).is_none());
}
