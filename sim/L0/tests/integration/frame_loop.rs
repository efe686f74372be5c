//! Headless frame loop.

use clatter_core::{
    ControlAction, FixedRateScheduler, FrameLoop, LoopState, ManualClock, NullAudio,
};

use super::common::{empty_context, FRAME};

#[test]
fn loop_runs_until_stopped() {
    let mut ctx = empty_context();
    assert_eq!(ctx.state(), LoopState::Idle);

    let mut frame_loop = FrameLoop::new();
    let stop = frame_loop.stop_handle();
    let mut clock = ManualClock::stepping(FRAME);
    let mut scheduler = FixedRateScheduler::new(10_000.0);

    let frames = frame_loop.run(
        &mut ctx,
        &mut clock,
        &mut scheduler,
        &mut NullAudio,
        |ctx, _| {
            if ctx.frame_count() == 30 {
                stop.stop();
            }
        },
    );

    assert_eq!(frames, 30);
    assert_eq!(ctx.state(), LoopState::Running);
    assert!(!frame_loop.is_running());
}

#[test]
fn control_actions_apply_between_frames() {
    let mut ctx = empty_context();
    let mut frame_loop = FrameLoop::new();
    let mut clock = ManualClock::stepping(FRAME);
    let mut scheduler = FixedRateScheduler::new(10_000.0).with_frame_limit(20);
    let mut pool_sizes = Vec::new();

    frame_loop.run(
        &mut ctx,
        &mut clock,
        &mut scheduler,
        &mut NullAudio,
        |ctx, report| {
            pool_sizes.push((ctx.pool().len(), report.synced));
            if ctx.frame_count() % 5 == 0 {
                let action = ctx.controls().spawn_sphere();
                ctx.apply(action);
            }
            if ctx.frame_count() == 15 {
                ctx.apply(ControlAction::Reset);
            }
        },
    );

    // Objects spawned after frame N are first synced in frame N + 1.
    assert_eq!(pool_sizes[4], (0, 0));
    assert_eq!(pool_sizes[5], (1, 1));
    assert_eq!(pool_sizes[10], (2, 2));
    assert_eq!(pool_sizes[15], (0, 0));
    assert_eq!(ctx.pool().len(), 1);
}

#[test]
fn stop_before_run_is_honoured() {
    let mut ctx = empty_context();
    let mut frame_loop = FrameLoop::new();
    frame_loop.stop();
    let mut clock = ManualClock::stepping(FRAME);
    let mut scheduler = FixedRateScheduler::new(10_000.0).with_frame_limit(3);

    let frames = frame_loop.run(&mut ctx, &mut clock, &mut scheduler, &mut NullAudio, |_, _| {});

    assert_eq!(frames, 0);
    assert_eq!(ctx.state(), LoopState::Idle);
    assert!(!frame_loop.is_running());

    // The request was consumed; the next run goes ahead.
    let frames = frame_loop.run(&mut ctx, &mut clock, &mut scheduler, &mut NullAudio, |_, _| {});
    assert_eq!(frames, 3);
}
