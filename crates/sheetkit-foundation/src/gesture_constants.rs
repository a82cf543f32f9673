//! Default thresholds for drag-to-dismiss surfaces.
//!
//! Distances are logical pixels, velocities are logical pixels per
//! millisecond. The handle strip is permissive because dragging is its only
//! purpose; the content area needs a deliberate downward swipe so scrolling
//! inside a sheet is never read as a dismiss.

/// Height of the drag handle strip at the top of a sheet.
pub const DEFAULT_HANDLE_HEIGHT: f32 = 28.0;

/// Movement in either axis that turns a handle press into a drag.
pub const HANDLE_DRAG_SLOP: f32 = 5.0;

/// Downward movement that turns a content press into a drag, provided it
/// also dominates horizontal movement.
pub const CONTENT_DRAG_SLOP: f32 = 15.0;

/// Handle drags released further than this dismiss the sheet.
pub const HANDLE_DISMISS_DISTANCE: f32 = 50.0;

/// Handle drags released faster than this dismiss the sheet.
pub const HANDLE_DISMISS_VELOCITY: f32 = 0.3;

pub const CONTENT_DISMISS_DISTANCE: f32 = 100.0;

pub const CONTENT_DISMISS_VELOCITY: f32 = 0.5;
