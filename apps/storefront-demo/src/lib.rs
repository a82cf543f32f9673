//! Headless storefront built on SheetKit sheets.
//!
//! [`Storefront`] owns one sheet per screen that uses one; [`run_session`]
//! replays scripted taps, drags and button presses against it.

pub mod screens;
pub mod session;

pub use screens::{Journal, ScreenId, Storefront};
pub use session::{default_sessions, run_session, Session, SessionReport, Step};
