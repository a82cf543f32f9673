//! Testing utilities for SheetKit
//!
//! [`FrameDriver`] owns a runtime and advances virtual time so animations can
//! be stepped deterministically; [`GestureScript`] builds timed pointer
//! sequences to feed into sheets.
//!
//! ```
//! use sheetkit_testing::FrameDriver;
//!
//! let mut driver = FrameDriver::new();
//! let runtime = driver.runtime_handle();
//! runtime.register_frame_callback(|_| {});
//! assert_eq!(driver.run_until_idle(), 1);
//! ```

mod frame_driver;
mod gesture_script;

pub use frame_driver::{FrameDriver, FRAME_INTERVAL_NANOS};
pub use gesture_script::GestureScript;

pub mod prelude {
    pub use crate::frame_driver::FrameDriver;
    pub use crate::gesture_script::GestureScript;
}
