//! Core runtime for SheetKit
//!
//! A single-threaded frame runtime: animations register one-shot frame
//! callbacks, the platform drains them once per display frame, and values
//! are published through observable state cells.

pub mod collections;
mod frame_clock;
mod runtime;
mod state;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
pub use state::{MutableState, State, StateSubscription};

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::runtime::{Runtime, RuntimeHandle};
    pub use crate::state::{MutableState, State};
}
