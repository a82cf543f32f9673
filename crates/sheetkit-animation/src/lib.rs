//! Animation primitives for SheetKit
//!
//! Tweens with easing curves and damped springs, stepped by the frame clock
//! from `sheetkit-core`.
//!
//! Note: `Animatable` keeps the camelCase `animateTo` / `snapTo` names of
//! Jetpack Compose so code ported between the two reads the same.

#![allow(non_snake_case)]

mod animatable;
mod completion;
mod easing;
mod spec;

pub use animatable::Animatable;
pub use completion::{AnimationEndReason, AnimationResult, CompletionSignal};
pub use easing::Easing;
pub use spec::{AnimationSpec, AnimationType, SpringSpec};

pub mod prelude {
    pub use crate::animatable::Animatable;
    pub use crate::completion::{AnimationEndReason, AnimationResult, CompletionSignal};
    pub use crate::easing::Easing;
    pub use crate::spec::{AnimationSpec, AnimationType, SpringSpec};
}

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod easing_tests;
