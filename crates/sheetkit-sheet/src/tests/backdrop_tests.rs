use super::*;

use crate::config::BackdropStyle;

#[test]
fn opacity_is_max_at_rest_and_zero_when_hidden() {
    assert_eq!(backdrop_opacity(0.0, 400.0, 0.5), 0.5);
    assert_eq!(backdrop_opacity(400.0, 400.0, 0.5), 0.0);
    assert_eq!(backdrop_opacity(200.0, 400.0, 0.5), 0.25);
}

#[test]
fn opacity_never_increases_as_the_sheet_moves_down() {
    let mut previous = f32::INFINITY;
    for step in 0..=100 {
        let opacity = backdrop_opacity(step as f32 * 5.0, 400.0, 0.5);
        assert!(opacity <= previous, "opacity rose at offset {}", step * 5);
        assert!((0.0..=0.5).contains(&opacity));
        previous = opacity;
    }
}

#[test]
fn out_of_range_offsets_clamp() {
    assert_eq!(backdrop_opacity(-30.0, 400.0, 0.5), 0.5);
    assert_eq!(backdrop_opacity(900.0, 400.0, 0.5), 0.0);
    assert_eq!(backdrop_opacity(f32::NAN, 400.0, 0.5), 0.0);
}

#[test]
fn degenerate_hidden_offset_is_transparent() {
    assert_eq!(backdrop_opacity(0.0, 0.0, 0.5), 0.0);
    assert_eq!(backdrop_opacity(0.0, f32::NAN, 0.5), 0.0);
}

#[test]
fn color_scales_the_style_alpha() {
    let style = BackdropStyle {
        color: Color::rgba(0.1, 0.1, 0.1, 0.8),
        max_alpha: 0.5,
        dismiss_on_press: true,
    };
    let color = backdrop_color(&style, 0.0, 400.0);
    assert!((color.a() - 0.4).abs() < 1e-6);
    assert_eq!(backdrop_color(&style, 400.0, 400.0).a(), 0.0);
}
