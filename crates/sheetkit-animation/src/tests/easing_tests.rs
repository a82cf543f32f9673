use crate::{AnimationSpec, Easing, SpringSpec};

const ALL_EASINGS: [Easing; 7] = [
    Easing::LinearEasing,
    Easing::EaseIn,
    Easing::EaseOut,
    Easing::EaseInOut,
    Easing::FastOutSlowInEasing,
    Easing::LinearOutSlowInEasing,
    Easing::FastOutLinearEasing,
];

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::LinearEasing.transform(0.0), 0.0);
    assert_eq!(Easing::LinearEasing.transform(0.5), 0.5);
    assert_eq!(Easing::LinearEasing.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_pinned() {
    for easing in ALL_EASINGS {
        assert_eq!(easing.transform(-0.5), 0.0, "{easing:?}");
        assert_eq!(easing.transform(0.0), 0.0, "{easing:?}");
        assert_eq!(easing.transform(1.0), 1.0, "{easing:?}");
        assert_eq!(easing.transform(3.0), 1.0, "{easing:?}");
    }
}

#[test]
fn easings_are_monotonic() {
    for easing in ALL_EASINGS {
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = easing.transform(step as f32 / 100.0);
            assert!(
                value + 1e-4 >= previous,
                "{easing:?} decreased at step {step}: {previous} -> {value}"
            );
            previous = value;
        }
    }
}

#[test]
fn ease_out_front_loads_progress() {
    let midpoint = Easing::EaseOut.transform(0.5);
    assert!(midpoint > 0.5, "ease-out should be past halfway, got {midpoint}");
    let midpoint = Easing::EaseIn.transform(0.5);
    assert!(midpoint < 0.5, "ease-in should lag halfway, got {midpoint}");
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::FastOutSlowInEasing);
    assert_eq!(spec.delay_millis, 0);
    assert_eq!(AnimationSpec::linear(100).with_delay(20).delay_millis, 20);
}

#[test]
fn spring_presets() {
    assert_eq!(SpringSpec::default().damping_ratio, 1.0);
    assert!(SpringSpec::bouncy().damping_ratio < 1.0);
    assert!(SpringSpec::stiff().stiffness > SpringSpec::default().stiffness);
    let snappy = SpringSpec::snappy();
    assert_eq!(snappy.damping_ratio, 1.0);
    assert!(snappy.velocity_threshold > SpringSpec::stiff().velocity_threshold);
}
