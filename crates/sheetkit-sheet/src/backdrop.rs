//! Backdrop dimming derived from the sheet offset.
//!
//! Opacity is never stored; it is recomputed from the offset so the two can
//! not drift apart.

use sheetkit_ui_graphics::Color;

use crate::config::BackdropStyle;

/// Alpha of the backdrop for a sheet at `offset`: `max_alpha` at rest, fading
/// linearly to zero at `hidden_offset`.
pub fn backdrop_opacity(offset: f32, hidden_offset: f32, max_alpha: f32) -> f32 {
    if !(hidden_offset > 0.0) || offset.is_nan() {
        return 0.0;
    }
    let open_fraction = 1.0 - (offset / hidden_offset).clamp(0.0, 1.0);
    max_alpha * open_fraction
}

pub fn backdrop_color(style: &BackdropStyle, offset: f32, hidden_offset: f32) -> Color {
    let alpha = backdrop_opacity(offset, hidden_offset, style.max_alpha);
    style.color.with_alpha(style.color.a() * alpha)
}

#[cfg(test)]
#[path = "tests/backdrop_tests.rs"]
mod tests;
