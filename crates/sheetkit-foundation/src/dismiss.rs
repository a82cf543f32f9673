//! Drag-to-dismiss gesture recognition.
//!
//! [`GestureDismissController`] turns the drag samples of one pointer gesture
//! into a sheet offset while dragging and a [`DismissDecision`] on release.
//! It never touches the sheet itself; the owner forwards offsets and acts on
//! the decision.

use crate::gesture_constants::{
    CONTENT_DISMISS_DISTANCE, CONTENT_DISMISS_VELOCITY, CONTENT_DRAG_SLOP,
    HANDLE_DISMISS_DISTANCE, HANDLE_DISMISS_VELOCITY, HANDLE_DRAG_SLOP,
};

/// Where on the sheet a gesture started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureRegion {
    /// Drag affordance strip at the top of the sheet.
    Handle,
    /// Sheet body, which may host its own scrolling content.
    Content,
}

/// Start and dismiss thresholds for one region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionThresholds {
    /// Movement needed before a press becomes a drag.
    pub activation_slop: f32,
    /// Only a downward, vertically dominant movement may start the drag.
    pub require_downward: bool,
    /// Release offset above which the sheet dismisses.
    pub dismiss_distance: f32,
    /// Release velocity (px/ms) above which the sheet dismisses.
    pub dismiss_velocity: f32,
}

impl RegionThresholds {
    pub const fn handle() -> Self {
        Self {
            activation_slop: HANDLE_DRAG_SLOP,
            require_downward: false,
            dismiss_distance: HANDLE_DISMISS_DISTANCE,
            dismiss_velocity: HANDLE_DISMISS_VELOCITY,
        }
    }

    pub const fn content() -> Self {
        Self {
            activation_slop: CONTENT_DRAG_SLOP,
            require_downward: true,
            dismiss_distance: CONTENT_DISMISS_DISTANCE,
            dismiss_velocity: CONTENT_DISMISS_VELOCITY,
        }
    }

    pub fn with_dismiss_distance(mut self, distance: f32) -> Self {
        self.dismiss_distance = distance;
        self
    }

    pub fn with_dismiss_velocity(mut self, velocity: f32) -> Self {
        self.dismiss_velocity = velocity;
        self
    }

    pub fn with_activation_slop(mut self, slop: f32) -> Self {
        self.activation_slop = slop;
        self
    }

    /// Whether a release at `offset` moving at `velocity_y` dismisses.
    ///
    /// Either threshold alone is enough. Without a usable velocity only the
    /// distance counts.
    pub fn decide(&self, offset: f32, velocity_y: Option<f32>) -> DismissDecision {
        let far_enough = offset > self.dismiss_distance;
        let fast_enough = velocity_y.is_some_and(|velocity| velocity > self.dismiss_velocity);
        if far_enough || fast_enough {
            DismissDecision::Dismiss
        } else {
            DismissDecision::SnapBack
        }
    }

    fn activation(&self, dx: f32, dy: f32) -> Activation {
        let travelled = dx.abs().max(dy.abs());
        if self.require_downward {
            if dy > self.activation_slop && dy > dx.abs() {
                Activation::Drag
            } else if travelled > self.activation_slop {
                Activation::Reject
            } else {
                Activation::Undecided
            }
        } else if travelled > self.activation_slop {
            Activation::Drag
        } else {
            Activation::Undecided
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DismissThresholds {
    pub handle: RegionThresholds,
    pub content: RegionThresholds,
}

impl DismissThresholds {
    pub fn for_region(&self, region: GestureRegion) -> &RegionThresholds {
        match region {
            GestureRegion::Handle => &self.handle,
            GestureRegion::Content => &self.content,
        }
    }
}

impl Default for DismissThresholds {
    fn default() -> Self {
        Self {
            handle: RegionThresholds::handle(),
            content: RegionThresholds::content(),
        }
    }
}

/// Pointer displacement since the gesture started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub dx: f32,
    pub dy: f32,
    pub timestamp_ms: f64,
}

impl GestureSample {
    pub fn new(dx: f32, dy: f32, timestamp_ms: f64) -> Self {
        Self {
            dx,
            dy,
            timestamp_ms,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.timestamp_ms.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissDecision {
    Dismiss,
    SnapBack,
}

/// What one move sample meant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragUpdate {
    /// No gesture in progress, or the sample was malformed.
    Ignored,
    /// Still within the activation slop.
    NotADrag,
    /// The gesture belongs to the sheet content (horizontal or upward swipe).
    Rejected,
    /// The sheet should sit at `offset`.
    Dragging { offset: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReleaseOutcome {
    pub decision: DismissDecision,
    /// `None` when no gesture was in progress.
    pub region: Option<GestureRegion>,
    /// Whether the gesture ever became a drag.
    pub was_drag: bool,
    pub offset: f32,
    pub velocity_y: Option<f32>,
}

impl ReleaseOutcome {
    fn not_a_drag(region: Option<GestureRegion>, offset: f32) -> Self {
        Self {
            decision: DismissDecision::SnapBack,
            region,
            was_drag: false,
            offset,
            velocity_y: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Pending(GestureRegion),
    Rejected(GestureRegion),
    Dragging(GestureRegion),
}

enum Activation {
    Undecided,
    Drag,
    Reject,
}

/// Recognises one drag gesture at a time.
///
/// Calls follow `on_start`, any number of `on_move`, then `on_release` or
/// `on_cancel`. Calls out of that order are ignored.
#[derive(Clone, Debug)]
pub struct GestureDismissController {
    thresholds: DismissThresholds,
    phase: Phase,
    /// Sheet offset when the gesture started; non-zero when a moving sheet is
    /// grabbed.
    base_offset: f32,
    offset: f32,
    last_sample: Option<GestureSample>,
    velocity_y: Option<f32>,
}

impl GestureDismissController {
    pub fn new(thresholds: DismissThresholds) -> Self {
        Self {
            thresholds,
            phase: Phase::Idle,
            base_offset: 0.0,
            offset: 0.0,
            last_sample: None,
            velocity_y: None,
        }
    }

    pub fn thresholds(&self) -> &DismissThresholds {
        &self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: DismissThresholds) {
        self.thresholds = thresholds;
    }

    pub fn on_start(&mut self, region: GestureRegion, timestamp_ms: f64, base_offset: f32) {
        if self.phase != Phase::Idle {
            log::debug!("gesture restarted without a release; dropping {:?}", self.phase);
        }
        self.phase = Phase::Pending(region);
        self.base_offset = base_offset.max(0.0);
        self.offset = self.base_offset;
        let baseline = GestureSample::new(0.0, 0.0, timestamp_ms);
        if baseline.is_well_formed() {
            self.last_sample = Some(baseline);
            self.velocity_y = Some(0.0);
        } else {
            self.last_sample = None;
            self.velocity_y = None;
        }
    }

    pub fn on_move(&mut self, sample: GestureSample) -> DragUpdate {
        let region = match self.phase {
            Phase::Idle => return DragUpdate::Ignored,
            Phase::Rejected(_) => return DragUpdate::Rejected,
            Phase::Pending(region) | Phase::Dragging(region) => region,
        };
        if !sample.is_well_formed() {
            log::trace!("ignoring malformed gesture sample {sample:?}");
            self.last_sample = None;
            self.velocity_y = None;
            return DragUpdate::Ignored;
        }
        self.track_velocity(sample);

        if let Phase::Pending(_) = self.phase {
            match self
                .thresholds
                .for_region(region)
                .activation(sample.dx, sample.dy)
            {
                Activation::Undecided => return DragUpdate::NotADrag,
                Activation::Reject => {
                    log::trace!("{region:?} gesture left to sheet content");
                    self.phase = Phase::Rejected(region);
                    return DragUpdate::Rejected;
                }
                Activation::Drag => {
                    log::debug!("{region:?} drag started");
                    self.phase = Phase::Dragging(region);
                }
            }
        }

        self.offset = (self.base_offset + sample.dy).max(0.0);
        DragUpdate::Dragging {
            offset: self.offset,
        }
    }

    /// Finish the gesture with the final displacement and an optional
    /// platform-reported velocity in px/ms.
    ///
    /// `velocity_y` of `None` uses the velocity tracked from move samples; a
    /// non-finite value disables the velocity threshold.
    pub fn on_release(&mut self, dy: f32, velocity_y: Option<f32>) -> ReleaseOutcome {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        let region = match phase {
            Phase::Idle => return ReleaseOutcome::not_a_drag(None, self.offset),
            // Travel that only shows up in the release still counts.
            Phase::Pending(region)
                if dy.is_finite()
                    && matches!(
                        self.thresholds.for_region(region).activation(0.0, dy),
                        Activation::Drag
                    ) =>
            {
                log::debug!("{region:?} drag started on release");
                region
            }
            Phase::Pending(region) | Phase::Rejected(region) => {
                self.reset();
                return ReleaseOutcome::not_a_drag(Some(region), self.base_offset);
            }
            Phase::Dragging(region) => region,
        };

        let offset = if dy.is_finite() {
            (self.base_offset + dy).max(0.0)
        } else {
            self.offset
        };
        let velocity_y = match velocity_y {
            Some(velocity) if velocity.is_finite() => Some(velocity),
            Some(_) => None,
            None => self.velocity_y,
        };
        let decision = self.thresholds.for_region(region).decide(offset, velocity_y);
        log::debug!(
            "{region:?} release at {offset:.1}px, velocity {velocity_y:?} px/ms: {decision:?}"
        );
        self.reset();
        ReleaseOutcome {
            decision,
            region: Some(region),
            was_drag: true,
            offset,
            velocity_y,
        }
    }

    /// Finish the gesture with a final sample, letting the tracked velocity
    /// include it.
    ///
    /// A pending gesture whose final sample leaves the slop is decided as a
    /// drag. A malformed sample leaves the decision to distance alone.
    pub fn on_release_sample(&mut self, sample: GestureSample) -> ReleaseOutcome {
        if !sample.is_well_formed() {
            log::trace!("ignoring malformed release sample {sample:?}");
            self.last_sample = None;
            self.velocity_y = None;
            return self.on_release(f32::NAN, None);
        }
        if let Phase::Pending(region) = self.phase {
            match self
                .thresholds
                .for_region(region)
                .activation(sample.dx, sample.dy)
            {
                Activation::Drag => self.phase = Phase::Dragging(region),
                Activation::Undecided | Activation::Reject => {
                    return self.on_release(f32::NAN, None);
                }
            }
        }
        if self.is_dragging() {
            self.track_velocity(sample);
            return self.on_release(sample.dy, None);
        }
        self.on_release(f32::NAN, None)
    }

    /// The pointer stream was taken away; never dismisses.
    pub fn on_cancel(&mut self) -> ReleaseOutcome {
        let region = match self.phase {
            Phase::Idle => None,
            Phase::Pending(region) | Phase::Rejected(region) | Phase::Dragging(region) => {
                Some(region)
            }
        };
        let was_drag = matches!(self.phase, Phase::Dragging(_));
        let offset = self.offset;
        self.phase = Phase::Idle;
        self.reset();
        ReleaseOutcome {
            was_drag,
            ..ReleaseOutcome::not_a_drag(region, offset)
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub fn region(&self) -> Option<GestureRegion> {
        match self.phase {
            Phase::Idle => None,
            Phase::Pending(region) | Phase::Rejected(region) | Phase::Dragging(region) => {
                Some(region)
            }
        }
    }

    /// Latest velocity estimate in px/ms, if samples allowed one.
    pub fn velocity_y(&self) -> Option<f32> {
        self.velocity_y
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    fn track_velocity(&mut self, sample: GestureSample) {
        if let Some(previous) = self.last_sample {
            let elapsed = sample.timestamp_ms - previous.timestamp_ms;
            if elapsed > 0.0 {
                self.velocity_y = Some(((sample.dy - previous.dy) as f64 / elapsed) as f32);
            }
        }
        self.last_sample = Some(sample);
    }

    fn reset(&mut self) {
        self.last_sample = None;
        self.velocity_y = None;
    }
}

impl Default for GestureDismissController {
    fn default() -> Self {
        Self::new(DismissThresholds::default())
    }
}

#[cfg(test)]
#[path = "tests/dismiss_tests.rs"]
mod tests;
