use super::*;

use sheetkit_animation::{AnimationEndReason, Easing};
use sheetkit_testing::FrameDriver;

fn animator(driver: &FrameDriver) -> OverlayAnimator {
    OverlayAnimator::new(
        driver.runtime_handle(),
        400.0,
        AnimationSpec::tween(280, Easing::EaseOut),
        AnimationSpec::tween(250, Easing::EaseOut),
        SpringSpec::snappy(),
    )
}

#[test]
fn starts_hidden() {
    let driver = FrameDriver::new();
    let animator = animator(&driver);
    assert_eq!(animator.offset(), 400.0);
    assert!(!animator.is_animating());
    assert_eq!(animator.target_offset(SheetTarget::Resting), 0.0);
    assert_eq!(animator.target_offset(SheetTarget::Hidden), 400.0);
}

#[test]
fn timed_open_reaches_rest_within_duration() {
    let mut driver = FrameDriver::new();
    let mut animator = animator(&driver);
    let signal = animator.animate_to(SheetTarget::Resting, TransitionMode::Timed);

    driver.advance_by_millis(100);
    assert!(animator.offset() > 0.0 && animator.offset() < 400.0);

    driver.run_until_idle();
    assert!(driver.now_millis() <= 320.0);
    assert_eq!(animator.offset(), 0.0);
    assert!(signal.result().is_some_and(|result| result.is_finished()));
}

#[test]
fn retargeting_interrupts_and_continues_from_current_offset() {
    let mut driver = FrameDriver::new();
    let mut animator = animator(&driver);
    let opening = animator.animate_to(SheetTarget::Resting, TransitionMode::Timed);
    driver.advance_by_millis(100);
    let midway = animator.offset();

    let closing = animator.animate_to(SheetTarget::Hidden, TransitionMode::Timed);
    driver.advance_frame();
    let opened = opening.result().expect("interrupted signal resolves");
    assert_eq!(opened.end_reason, AnimationEndReason::Interrupted);
    assert_eq!(opened.end_value, midway);
    assert!(animator.offset() >= midway);

    driver.run_until_idle();
    assert_eq!(animator.offset(), 400.0);
    assert!(closing.result().is_some_and(|result| result.is_finished()));
}

#[test]
fn spring_returns_to_rest_without_overshoot() {
    let mut driver = FrameDriver::new();
    let mut animator = animator(&driver);
    animator.set_immediate(45.0);
    animator.animate_to(SheetTarget::Resting, TransitionMode::Spring);

    let mut lowest = f32::INFINITY;
    while !driver.is_idle() {
        driver.advance_frame();
        lowest = lowest.min(animator.offset());
    }
    assert!(lowest >= 0.0);
    assert_eq!(animator.offset(), 0.0);
    assert!(driver.now_millis() <= 300.0);
}

#[test]
fn set_immediate_clamps_and_ignores_non_finite() {
    let driver = FrameDriver::new();
    let mut animator = animator(&driver);
    animator.set_immediate(-20.0);
    assert_eq!(animator.offset(), 0.0);
    animator.set_immediate(f32::NAN);
    assert_eq!(animator.offset(), 0.0);
    animator.set_immediate(f32::INFINITY);
    assert_eq!(animator.offset(), 0.0);
    animator.set_immediate(75.0);
    assert_eq!(animator.offset(), 75.0);
    assert_eq!(animator.offset_state().get(), 75.0);
}

#[test]
fn set_immediate_interrupts_running_transition() {
    let mut driver = FrameDriver::new();
    let mut animator = animator(&driver);
    let signal = animator.animate_to(SheetTarget::Resting, TransitionMode::Timed);
    driver.advance_frame();
    animator.set_immediate(120.0);
    driver.run_until_idle();

    assert_eq!(animator.offset(), 120.0);
    assert_eq!(
        signal.result().map(|result| result.end_reason),
        Some(AnimationEndReason::Interrupted)
    );
}

#[test]
fn cancel_stops_in_place() {
    let mut driver = FrameDriver::new();
    let mut animator = animator(&driver);
    animator.animate_to(SheetTarget::Resting, TransitionMode::Timed);
    driver.advance_by_millis(50);
    animator.cancel();
    let stopped = animator.offset();
    driver.run_until_idle();
    assert_eq!(animator.offset(), stopped);
    assert!(!animator.is_animating());
}

#[test]
fn resizing_moves_a_parked_sheet() {
    let driver = FrameDriver::new();
    let mut animator = animator(&driver);
    animator.set_hidden_offset(520.0);
    assert_eq!(animator.offset(), 520.0);

    animator.set_immediate(0.0);
    animator.set_hidden_offset(300.0);
    assert_eq!(animator.offset(), 0.0);
    assert_eq!(animator.hidden_offset(), 300.0);
}
