//! Bottom-sheet overlays for SheetKit
//!
//! An [`OverlayHost`] presents one sheet above a screen: it slides the sheet
//! in and out with an [`OverlayAnimator`], dims the screen with a backdrop
//! whose opacity follows the offset, and lets the user drag the sheet down
//! by its handle or its content to dismiss it.
//!
//! ```
//! use sheetkit_sheet::{OverlayHost, SheetConfig, SheetState};
//! use sheetkit_testing::FrameDriver;
//!
//! let mut driver = FrameDriver::new();
//! let host = OverlayHost::new(driver.runtime_handle(), SheetConfig::new("track-order", 360.0))
//!     .expect("valid config");
//!
//! host.open();
//! driver.run_until_idle();
//! assert_eq!(host.state(), SheetState::Open);
//! assert_eq!(host.offset(), 0.0);
//! ```

mod animator;
mod backdrop;
mod config;
mod host;

pub use animator::{OverlayAnimator, SheetTarget, TransitionMode};
pub use backdrop::{backdrop_color, backdrop_opacity};
pub use config::{BackdropStyle, SheetConfig, SheetConfigError, DEFAULT_VIEWPORT};
pub use host::{OverlayHost, PointerRoute, SheetFrame, SheetHandle, SheetState};

pub mod prelude {
    pub use crate::config::{SheetConfig, SheetConfigError};
    pub use crate::host::{OverlayHost, PointerRoute, SheetHandle, SheetState};
}
