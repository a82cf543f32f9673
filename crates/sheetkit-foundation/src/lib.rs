//! Pointer input and gesture recognition for SheetKit surfaces.

pub mod dismiss;
pub mod gesture_constants;
pub mod pointer;

pub use dismiss::{
    DismissDecision, DismissThresholds, DragUpdate, GestureDismissController, GestureRegion,
    GestureSample, ReleaseOutcome, RegionThresholds,
};
pub use pointer::{PointerClock, PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use crate::dismiss::{
        DismissDecision, DismissThresholds, GestureDismissController, GestureRegion,
        GestureSample,
    };
    pub use crate::pointer::{PointerEvent, PointerEventKind};
}
