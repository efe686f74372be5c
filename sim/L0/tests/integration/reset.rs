//! Bulk reset of the object pool.

use clatter_core::{ControlAction, NullAudio, RecordingAudio, SceneChange, FLOOR_ID};
use clatter_types::Point3;

use super::common::{empty_context, Driver};

fn spawn_five_and_five(ctx: &mut clatter_core::SimulationContext) {
    for _ in 0..5 {
        let action = ctx.controls().spawn_box();
        ctx.apply(action);
        let action = ctx.controls().spawn_sphere();
        ctx.apply(action);
    }
}

#[test]
fn reset_empties_pools_and_keeps_floor() {
    let mut ctx = empty_context();
    spawn_five_and_five(&mut ctx);
    assert_eq!(ctx.pool().spheres().len(), 5);
    assert_eq!(ctx.pool().boxes().len(), 5);
    assert_eq!(ctx.world().body_count(), 11);

    assert_eq!(ctx.reset_all(), 10);

    assert!(ctx.pool().spheres().is_empty());
    assert!(ctx.pool().boxes().is_empty());
    assert!(ctx.scene().is_empty());
    assert_eq!(ctx.feedback().listener_count(), 0);
    assert_eq!(ctx.world().body_count(), 1);
    assert!(ctx.world().contains(FLOOR_ID));

    let before = ctx.world().step_count();
    let report = Driver::new().frame(&mut ctx, &mut NullAudio);
    assert_eq!(report.substeps, 1);
    assert_eq!(ctx.world().step_count(), before + 1);
}

#[test]
fn reset_twice_is_reset_once() {
    let mut once = empty_context();
    let mut twice = empty_context();
    spawn_five_and_five(&mut once);
    spawn_five_and_five(&mut twice);

    once.apply(ControlAction::Reset);
    twice.apply(ControlAction::Reset);
    twice.apply(ControlAction::Reset);

    assert_eq!(once.pool().len(), twice.pool().len());
    assert_eq!(once.world().body_count(), twice.world().body_count());
    assert_eq!(once.scene().len(), twice.scene().len());
    assert_eq!(
        once.feedback().listener_count(),
        twice.feedback().listener_count()
    );
}

#[test]
fn no_stale_cues_after_reset() {
    let mut ctx = empty_context();
    let mut driver = Driver::new();
    spawn_five_and_five(&mut ctx);

    // Let them fall for a bit, but not reach the floor.
    driver.frames(&mut ctx, &mut NullAudio, 10);

    ctx.reset_all();

    let mut audio = RecordingAudio::new();
    let reports = driver.frames(&mut ctx, &mut audio, 180);
    assert!(reports.iter().all(|r| r.impacts == 0 && r.cues == 0));
    assert!(audio.cues.is_empty());
}

#[test]
fn reset_then_respawn_plays_again() {
    let mut ctx = empty_context();
    let mut driver = Driver::new();
    ctx.spawn_sphere(0.5, Point3::new(0.0, 3.0, 0.0));
    ctx.reset_all();

    ctx.spawn_sphere(0.5, Point3::new(0.0, 3.0, 0.0));
    let mut audio = RecordingAudio::new();
    driver.frames(&mut ctx, &mut audio, 90);

    assert!(!audio.cues.is_empty());
}

#[test]
fn reset_is_journaled_for_renderers() {
    let mut ctx = empty_context();
    let a = ctx.spawn_sphere(0.5, Point3::new(0.0, 3.0, 0.0));
    let b = ctx.spawn_box(0.5, Point3::new(1.0, 3.0, 0.0));
    ctx.scene_mut().drain_changes();

    ctx.reset_all();

    let changes = ctx.scene_mut().drain_changes();
    assert_eq!(changes.len(), 2);
    assert!(changes.contains(&SceneChange::Removed(a.proxy())));
    assert!(changes.contains(&SceneChange::Removed(b.proxy())));
}
