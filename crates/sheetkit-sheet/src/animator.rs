use sheetkit_animation::{
    Animatable, AnimationSpec, AnimationType, CompletionSignal, SpringSpec,
};
use sheetkit_core::{RuntimeHandle, State};

use crate::config::SheetConfig;

/// Named endpoints of a sheet's offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetTarget {
    /// Fully below the viewport.
    Hidden,
    /// Fully open, offset 0.
    Resting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionMode {
    /// Fixed duration with the configured easing.
    Timed,
    /// Damped spring; used to return a dragged sheet to rest.
    Spring,
}

/// Owns a sheet's offset and moves it between endpoints.
///
/// Issuing a target while another transition runs replaces it, starting from
/// wherever the offset currently is.
pub struct OverlayAnimator {
    offset: Animatable,
    hidden_offset: f32,
    open_spec: AnimationSpec,
    close_spec: AnimationSpec,
    spring: SpringSpec,
}

impl OverlayAnimator {
    /// Starts at the hidden offset.
    pub fn new(
        runtime: RuntimeHandle,
        hidden_offset: f32,
        open_spec: AnimationSpec,
        close_spec: AnimationSpec,
        spring: SpringSpec,
    ) -> Self {
        Self {
            offset: Animatable::new(hidden_offset, runtime),
            hidden_offset,
            open_spec,
            close_spec,
            spring,
        }
    }

    pub fn from_config(runtime: RuntimeHandle, config: &SheetConfig) -> Self {
        Self::new(
            runtime,
            config.hidden_offset(),
            config.open_spec,
            config.close_spec,
            config.snap_back_spring,
        )
    }

    pub fn animate_to(&mut self, target: SheetTarget, mode: TransitionMode) -> CompletionSignal {
        let value = self.target_offset(target);
        let animation = match (mode, target) {
            (TransitionMode::Timed, SheetTarget::Resting) => AnimationType::Tween(self.open_spec),
            (TransitionMode::Timed, SheetTarget::Hidden) => AnimationType::Tween(self.close_spec),
            (TransitionMode::Spring, _) => AnimationType::Spring(self.spring),
        };
        self.offset.animateTo(value, animation)
    }

    /// Move the offset with no animation, cancelling any running one.
    /// Non-finite values are ignored and negative ones clamp to rest.
    pub fn set_immediate(&mut self, value: f32) {
        if !value.is_finite() {
            log::trace!("ignoring non-finite offset {value}");
            return;
        }
        self.offset.snapTo(value.max(0.0));
    }

    /// Stop the running transition where it is.
    pub fn cancel(&mut self) {
        self.offset.stop();
    }

    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn offset_state(&self) -> State<f32> {
        self.offset.state()
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_running()
    }

    pub fn hidden_offset(&self) -> f32 {
        self.hidden_offset
    }

    /// Re-measure the sheet. An idle sheet parked at the old hidden offset
    /// moves to the new one.
    pub fn set_hidden_offset(&mut self, hidden_offset: f32) {
        let parked = !self.is_animating() && self.offset() >= self.hidden_offset;
        self.hidden_offset = hidden_offset;
        if parked {
            self.offset.snapTo(hidden_offset);
        }
    }

    pub fn target_offset(&self, target: SheetTarget) -> f32 {
        match target {
            SheetTarget::Hidden => self.hidden_offset,
            SheetTarget::Resting => 0.0,
        }
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
