use super::*;

fn dragging(region: GestureRegion, dy: f32) -> GestureDismissController {
    let mut controller = GestureDismissController::default();
    controller.on_start(region, 0.0, 0.0);
    let update = controller.on_move(GestureSample::new(0.0, dy, 100.0));
    assert!(
        matches!(update, DragUpdate::Dragging { .. }),
        "expected a drag, got {update:?}"
    );
    controller
}

#[test]
fn content_distance_threshold_boundary() {
    let mut controller = dragging(GestureRegion::Content, 101.0);
    assert_eq!(
        controller.on_release(101.0, Some(0.0)).decision,
        DismissDecision::Dismiss
    );

    let mut controller = dragging(GestureRegion::Content, 99.0);
    assert_eq!(
        controller.on_release(99.0, Some(0.0)).decision,
        DismissDecision::SnapBack
    );
}

#[test]
fn handle_distance_threshold_is_lower() {
    let mut controller = dragging(GestureRegion::Handle, 60.0);
    assert_eq!(
        controller.on_release(60.0, Some(0.0)).decision,
        DismissDecision::Dismiss
    );

    let mut controller = dragging(GestureRegion::Handle, 50.0);
    assert_eq!(
        controller.on_release(50.0, Some(0.0)).decision,
        DismissDecision::SnapBack
    );
}

#[test]
fn velocity_overrides_small_distance() {
    let mut controller = dragging(GestureRegion::Content, 20.0);
    let outcome = controller.on_release(10.0, Some(0.6));
    assert_eq!(outcome.decision, DismissDecision::Dismiss);
    assert_eq!(outcome.velocity_y, Some(0.6));

    let mut controller = dragging(GestureRegion::Content, 20.0);
    assert_eq!(
        controller.on_release(10.0, Some(0.4)).decision,
        DismissDecision::SnapBack
    );

    let mut controller = dragging(GestureRegion::Handle, 10.0);
    assert_eq!(
        controller.on_release(10.0, Some(0.4)).decision,
        DismissDecision::Dismiss
    );
}

#[test]
fn upward_drag_clamps_offset_to_zero() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Handle, 0.0, 0.0);
    for (step, dy) in [-6.0, -40.0, -120.0, 30.0, -500.0].into_iter().enumerate() {
        let update = controller.on_move(GestureSample::new(0.0, dy, step as f64 * 16.0 + 16.0));
        match update {
            DragUpdate::Dragging { offset } => {
                assert!(offset >= 0.0, "offset {offset} below rest")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(controller.offset(), 0.0);
    assert_eq!(
        controller.on_release(-500.0, None).decision,
        DismissDecision::SnapBack
    );
}

#[test]
fn handle_activates_on_small_movement_in_any_direction() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Handle, 0.0, 0.0);
    assert_eq!(
        controller.on_move(GestureSample::new(3.0, 2.0, 8.0)),
        DragUpdate::NotADrag
    );
    assert_eq!(
        controller.on_move(GestureSample::new(6.0, 1.0, 16.0)),
        DragUpdate::Dragging { offset: 1.0 }
    );
}

#[test]
fn content_needs_dominant_downward_swipe() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Content, 0.0, 0.0);
    assert_eq!(
        controller.on_move(GestureSample::new(0.0, 10.0, 16.0)),
        DragUpdate::NotADrag
    );
    assert_eq!(
        controller.on_move(GestureSample::new(2.0, 18.0, 32.0)),
        DragUpdate::Dragging { offset: 18.0 }
    );
}

#[test]
fn horizontal_content_swipe_is_left_to_content() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Content, 0.0, 0.0);
    assert_eq!(
        controller.on_move(GestureSample::new(30.0, 20.0, 16.0)),
        DragUpdate::Rejected
    );
    // Stays with the content even once it turns downward.
    assert_eq!(
        controller.on_move(GestureSample::new(30.0, 200.0, 32.0)),
        DragUpdate::Rejected
    );
    let outcome = controller.on_release(200.0, Some(2.0));
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
    assert!(!outcome.was_drag);
}

#[test]
fn upward_content_swipe_is_left_to_content() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Content, 0.0, 0.0);
    assert_eq!(
        controller.on_move(GestureSample::new(0.0, -20.0, 16.0)),
        DragUpdate::Rejected
    );
}

#[test]
fn tap_never_dismisses() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Handle, 0.0, 0.0);
    let outcome = controller.on_release(4.0, Some(5.0));
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
    assert!(!outcome.was_drag);
    assert!(!controller.is_active());
}

#[test]
fn release_past_slop_without_moves_is_a_drag() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Content, 0.0, 0.0);
    let outcome = controller.on_release(101.0, Some(0.0));
    assert_eq!(outcome.decision, DismissDecision::Dismiss);
    assert!(outcome.was_drag);
    assert_eq!(outcome.offset, 101.0);

    controller.on_start(GestureRegion::Content, 0.0, 0.0);
    let outcome = controller.on_release(99.0, Some(0.0));
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
    assert!(outcome.was_drag);

    controller.on_start(GestureRegion::Handle, 0.0, 0.0);
    let outcome = controller.on_release(10.0, None);
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
    assert!(outcome.was_drag);
}

#[test]
fn flick_delivered_only_in_the_release_sample_dismisses() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Handle, 1_000.0, 0.0);
    let outcome = controller.on_release_sample(GestureSample::new(0.0, 40.0, 1_040.0));
    assert!(outcome.was_drag);
    let velocity = outcome.velocity_y.expect("velocity tracked");
    assert!((velocity - 1.0).abs() < 1e-4, "got {velocity}");
    assert_eq!(outcome.decision, DismissDecision::Dismiss);

    controller.on_start(GestureRegion::Content, 1_000.0, 0.0);
    let outcome = controller.on_release_sample(GestureSample::new(120.0, 20.0, 1_040.0));
    assert!(!outcome.was_drag);
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
}

#[test]
fn release_without_start_is_ignored() {
    let mut controller = GestureDismissController::default();
    assert_eq!(
        controller.on_move(GestureSample::new(0.0, 80.0, 16.0)),
        DragUpdate::Ignored
    );
    let outcome = controller.on_release(80.0, Some(1.0));
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
    assert_eq!(outcome.region, None);
}

#[test]
fn velocity_comes_from_last_two_samples() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Handle, 1_000.0, 0.0);
    controller.on_move(GestureSample::new(0.0, 10.0, 1_010.0));
    controller.on_move(GestureSample::new(0.0, 20.0, 1_020.0));
    controller.on_move(GestureSample::new(0.0, 30.0, 1_030.0));
    let velocity = controller.velocity_y().expect("velocity tracked");
    assert!((velocity - 1.0).abs() < 1e-4, "got {velocity}");

    let outcome = controller.on_release_sample(GestureSample::new(0.0, 32.0, 1_040.0));
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
    let velocity = outcome.velocity_y.expect("velocity tracked");
    assert!((velocity - 0.2).abs() < 1e-4, "got {velocity}");
}

#[test]
fn fast_flick_dismisses_with_tracked_velocity() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Content, 0.0, 0.0);
    controller.on_move(GestureSample::new(0.0, 16.0, 8.0));
    controller.on_move(GestureSample::new(0.0, 40.0, 16.0));
    let outcome = controller.on_release(40.0, None);
    assert_eq!(outcome.decision, DismissDecision::Dismiss);
}

#[test]
fn malformed_samples_fall_back_to_distance_only() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Content, 0.0, 0.0);
    controller.on_move(GestureSample::new(0.0, 40.0, 8.0));
    assert_eq!(
        controller.on_move(GestureSample::new(f32::NAN, 45.0, 16.0)),
        DragUpdate::Ignored
    );
    assert_eq!(
        controller.on_move(GestureSample::new(0.0, 48.0, f64::NAN)),
        DragUpdate::Ignored
    );
    assert_eq!(controller.velocity_y(), None);
    assert_eq!(controller.offset(), 40.0);

    let outcome = controller.on_release(50.0, None);
    assert_eq!(outcome.velocity_y, None);
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
}

#[test]
fn malformed_release_sample_drops_tracked_velocity() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Handle, 0.0, 0.0);
    controller.on_move(GestureSample::new(0.0, 20.0, 20.0));
    controller.on_move(GestureSample::new(0.0, 40.0, 40.0));
    assert!(controller.velocity_y().is_some_and(|velocity| velocity > 0.3));

    let outcome = controller.on_release_sample(GestureSample::new(0.0, f32::NAN, 56.0));
    assert!(outcome.was_drag);
    assert_eq!(outcome.offset, 40.0);
    assert_eq!(outcome.velocity_y, None);
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
}

#[test]
fn non_finite_release_velocity_is_distance_only() {
    let mut controller = dragging(GestureRegion::Content, 120.0);
    let outcome = controller.on_release(120.0, Some(f32::INFINITY));
    assert_eq!(outcome.velocity_y, None);
    assert_eq!(outcome.decision, DismissDecision::Dismiss);
}

#[test]
fn grab_keeps_base_offset() {
    let mut controller = GestureDismissController::default();
    controller.on_start(GestureRegion::Handle, 0.0, 200.0);
    assert_eq!(
        controller.on_move(GestureSample::new(0.0, -30.0, 16.0)),
        DragUpdate::Dragging { offset: 170.0 }
    );
    let outcome = controller.on_release(-190.0, Some(0.0));
    assert_eq!(outcome.offset, 10.0);
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
}

#[test]
fn cancel_snaps_back_even_past_thresholds() {
    let mut controller = dragging(GestureRegion::Handle, 300.0);
    let outcome = controller.on_cancel();
    assert_eq!(outcome.decision, DismissDecision::SnapBack);
    assert!(outcome.was_drag);
    assert!(!controller.is_active());
}

#[test]
fn configured_thresholds_are_respected() {
    let thresholds = DismissThresholds {
        handle: RegionThresholds::handle().with_dismiss_distance(150.0),
        content: RegionThresholds::content().with_dismiss_velocity(2.0),
    };
    let mut controller = GestureDismissController::new(thresholds);
    controller.on_start(GestureRegion::Handle, 0.0, 0.0);
    controller.on_move(GestureSample::new(0.0, 120.0, 500.0));
    assert_eq!(
        controller.on_release(120.0, Some(0.0)).decision,
        DismissDecision::SnapBack
    );
}
