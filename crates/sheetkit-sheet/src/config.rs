//! Per-sheet configuration.
//!
//! Screens differ only in these values: how tall the sheet is, how it
//! animates, how eager it is to dismiss and how dark the backdrop gets.

use std::fmt;

use sheetkit_animation::{AnimationSpec, Easing, SpringSpec};
use sheetkit_foundation::gesture_constants::DEFAULT_HANDLE_HEIGHT;
use sheetkit_foundation::{DismissThresholds, GestureRegion, RegionThresholds};
use sheetkit_ui_graphics::{Color, Rect, Size};

/// Logical size of the reference phone screen.
pub const DEFAULT_VIEWPORT: Size = Size::new(390.0, 844.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropStyle {
    pub color: Color,
    /// Alpha of the backdrop while the sheet rests fully open.
    pub max_alpha: f32,
    /// Whether tapping the backdrop closes the sheet.
    pub dismiss_on_press: bool,
}

impl Default for BackdropStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            max_alpha: 0.5,
            dismiss_on_press: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SheetConfig {
    /// Name used in logs.
    pub label: String,
    /// Sheet height; also the hidden offset, so a closed sheet sits just
    /// below the viewport.
    pub sheet_height: f32,
    pub handle_height: f32,
    pub viewport: Size,
    pub open_spec: AnimationSpec,
    pub close_spec: AnimationSpec,
    pub snap_back_spring: SpringSpec,
    pub thresholds: DismissThresholds,
    pub backdrop: BackdropStyle,
}

impl SheetConfig {
    pub fn new(label: impl Into<String>, sheet_height: f32) -> Self {
        Self {
            label: label.into(),
            sheet_height,
            handle_height: DEFAULT_HANDLE_HEIGHT,
            viewport: DEFAULT_VIEWPORT,
            open_spec: AnimationSpec::tween(280, Easing::EaseOut),
            close_spec: AnimationSpec::tween(250, Easing::EaseOut),
            snap_back_spring: SpringSpec::snappy(),
            thresholds: DismissThresholds::default(),
            backdrop: BackdropStyle::default(),
        }
    }

    pub fn with_handle_height(mut self, handle_height: f32) -> Self {
        self.handle_height = handle_height;
        self
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_open_spec(mut self, spec: AnimationSpec) -> Self {
        self.open_spec = spec;
        self
    }

    pub fn with_close_spec(mut self, spec: AnimationSpec) -> Self {
        self.close_spec = spec;
        self
    }

    pub fn with_snap_back_spring(mut self, spring: SpringSpec) -> Self {
        self.snap_back_spring = spring;
        self
    }

    pub fn with_thresholds(mut self, thresholds: DismissThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_handle_thresholds(mut self, handle: RegionThresholds) -> Self {
        self.thresholds.handle = handle;
        self
    }

    pub fn with_content_thresholds(mut self, content: RegionThresholds) -> Self {
        self.thresholds.content = content;
        self
    }

    pub fn with_backdrop(mut self, backdrop: BackdropStyle) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn hidden_offset(&self) -> f32 {
        self.sheet_height
    }

    /// Where the sheet sits when fully open: pinned to the bottom edge of the
    /// viewport.
    pub fn resting_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            self.viewport.height - self.sheet_height,
            self.viewport.width,
            self.sheet_height,
        )
    }

    pub fn validate(&self) -> Result<(), SheetConfigError> {
        if !(self.sheet_height.is_finite() && self.sheet_height > 0.0) {
            return Err(SheetConfigError::InvalidSheetHeight(self.sheet_height));
        }
        if !(self.handle_height.is_finite() && self.handle_height >= 0.0)
            || self.handle_height > self.sheet_height
        {
            return Err(SheetConfigError::InvalidHandleHeight {
                handle: self.handle_height,
                sheet: self.sheet_height,
            });
        }
        for region in [GestureRegion::Handle, GestureRegion::Content] {
            validate_region(region, self.thresholds.for_region(region))?;
        }
        let alpha = self.backdrop.max_alpha;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(SheetConfigError::InvalidBackdropAlpha(alpha));
        }
        let spring = self.snap_back_spring;
        if !(spring.stiffness.is_finite() && spring.stiffness > 0.0)
            || !(spring.damping_ratio.is_finite() && spring.damping_ratio > 0.0)
        {
            return Err(SheetConfigError::InvalidSpring {
                stiffness: spring.stiffness,
                damping_ratio: spring.damping_ratio,
            });
        }
        Ok(())
    }
}

fn validate_region(
    region: GestureRegion,
    thresholds: &RegionThresholds,
) -> Result<(), SheetConfigError> {
    let checks = [
        ("activation_slop", thresholds.activation_slop),
        ("dismiss_distance", thresholds.dismiss_distance),
        ("dismiss_velocity", thresholds.dismiss_velocity),
    ];
    for (name, value) in checks {
        if !(value.is_finite() && value >= 0.0) {
            return Err(SheetConfigError::InvalidThreshold {
                region,
                name,
                value,
            });
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
pub enum SheetConfigError {
    InvalidSheetHeight(f32),
    InvalidHandleHeight { handle: f32, sheet: f32 },
    InvalidThreshold {
        region: GestureRegion,
        name: &'static str,
        value: f32,
    },
    InvalidBackdropAlpha(f32),
    InvalidSpring { stiffness: f32, damping_ratio: f32 },
}

impl fmt::Display for SheetConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetConfigError::InvalidSheetHeight(height) => {
                write!(f, "sheet height must be positive and finite, got {height}")
            }
            SheetConfigError::InvalidHandleHeight { handle, sheet } => {
                write!(f, "handle height {handle} does not fit a sheet of height {sheet}")
            }
            SheetConfigError::InvalidThreshold {
                region,
                name,
                value,
            } => write!(f, "{region:?} threshold {name} must be non-negative, got {value}"),
            SheetConfigError::InvalidBackdropAlpha(alpha) => {
                write!(f, "backdrop alpha must be within [0, 1], got {alpha}")
            }
            SheetConfigError::InvalidSpring {
                stiffness,
                damping_ratio,
            } => write!(
                f,
                "snap-back spring needs positive stiffness and damping, got {stiffness} / {damping_ratio}"
            ),
        }
    }
}

impl std::error::Error for SheetConfigError {}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
