//! Live restitution changes.

use approx::assert_relative_eq;
use clatter_core::{ControlAction, NullAudio};

use super::common::{drop_context, Driver};

/// Highest point the sphere reaches after its first bounce.
fn rebound_height(ctx: &mut clatter_core::SimulationContext, driver: &mut Driver) -> f64 {
    let sphere = ctx.pool().spheres()[0];
    let mut landed = false;
    let mut peak = 0.0_f64;
    for _ in 0..120 {
        let report = driver.frame(ctx, &mut NullAudio);
        let y = ctx.world().body_position(sphere.body()).unwrap().y;
        if report.impacts > 0 {
            landed = true;
        }
        if landed {
            peak = peak.max(y);
        }
    }
    assert!(landed, "sphere never landed");
    peak
}

#[test]
fn change_applies_only_to_later_steps() {
    let mut lively = drop_context(0.7);
    let mut default = drop_context(0.7);
    let mut lively_driver = Driver::new();
    let mut default_driver = Driver::new();

    // Both fall identically until the change.
    lively_driver.frames(&mut lively, &mut NullAudio, 20);
    default_driver.frames(&mut default, &mut NullAudio, 20);

    let sphere = lively.pool().spheres()[0];
    let before = lively.world().body_pose(sphere.body()).unwrap();
    let velocity = lively.world().linear_velocity(sphere.body()).unwrap();

    let action = lively.controls().set_restitution(0.9);
    lively.apply(action);

    // Setting it does not touch the current state.
    assert_eq!(lively.world().body_pose(sphere.body()).unwrap(), before);
    assert_eq!(lively.world().linear_velocity(sphere.body()).unwrap(), velocity);
    assert_eq!(
        default.world().body_pose(default.pool().spheres()[0].body()),
        Some(before)
    );

    let high = rebound_height(&mut lively, &mut lively_driver);
    let low = rebound_height(&mut default, &mut default_driver);
    assert!(high > low + 0.3, "rebound {high} should exceed {low}");
}

#[test]
fn slider_values_are_clamped_and_snapped() {
    let mut ctx = drop_context(0.7);

    let action = ctx.controls().set_restitution(1.3);
    assert_eq!(action, ControlAction::SetRestitution(1.0));
    ctx.apply(action);
    assert_relative_eq!(ctx.world().contact_material().restitution, 1.0);

    let action = ctx.controls().nudge_restitution(-25);
    ctx.apply(action);
    assert_relative_eq!(ctx.world().contact_material().restitution, 0.75, epsilon = 1e-12);

    // Friction is fixed at init.
    assert_relative_eq!(ctx.world().contact_material().friction, 0.1);
}
