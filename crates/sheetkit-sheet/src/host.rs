//! The sheet host: lifecycle state, imperative open/close, pointer routing
//! and ordering between nested sheets.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use sheetkit_animation::{AnimationResult, CompletionSignal};
use sheetkit_core::{RuntimeHandle, State};
use sheetkit_foundation::{
    DismissDecision, DragUpdate, GestureDismissController, GestureRegion, GestureSample,
    PointerEvent, PointerEventKind, PointerId, ReleaseOutcome,
};
use sheetkit_ui_graphics::{Color, Point, Rect, Size};
use smallvec::SmallVec;

use crate::animator::{OverlayAnimator, SheetTarget, TransitionMode};
use crate::backdrop::{backdrop_color, backdrop_opacity};
use crate::config::{SheetConfig, SheetConfigError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetState {
    Closed,
    Opening,
    Open,
    Dragging,
    SnappingBack,
    Closing,
}

impl SheetState {
    /// Everything but `Closed` keeps the sheet subtree mounted.
    pub fn is_mounted(self) -> bool {
        self != SheetState::Closed
    }

    /// Open, about to be open, or held by the user.
    pub fn is_presented(self) -> bool {
        matches!(
            self,
            SheetState::Opening | SheetState::Open | SheetState::Dragging | SheetState::SnappingBack
        )
    }
}

/// Who should handle a pointer event after the host has seen it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerRoute {
    /// The sheet is not mounted; the screen underneath handles the event.
    PassThrough,
    /// The sheet or its backdrop claimed the event. It is marked consumed.
    Consumed,
    /// The event belongs to the sheet's own content (a tap on a row, a
    /// scroll). Never forward it to the screen underneath.
    Content,
}

/// What to draw for a mounted sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetFrame {
    pub state: SheetState,
    pub offset: f32,
    pub backdrop: Color,
    /// Sheet bounds translated by the current offset.
    pub sheet_bounds: Rect,
    pub handle_bounds: Rect,
    pub content_bounds: Rect,
}

type ClosedCallback = Box<dyn FnMut()>;
type TransitionListener = Box<dyn FnMut(SheetState, SheetState)>;
type HostRef = Rc<RefCell<HostInner>>;

#[derive(Clone, Copy, Debug)]
enum PressTarget {
    Sheet(GestureRegion),
    Backdrop,
}

#[derive(Clone, Copy, Debug)]
struct PointerTrack {
    id: PointerId,
    down_at: Point,
    target: PressTarget,
}

struct HostInner {
    config: SheetConfig,
    state: SheetState,
    animator: OverlayAnimator,
    gesture: GestureDismissController,
    /// Bumped whenever a new transition owns the offset; completions from
    /// older transitions are dropped.
    generation: u64,
    on_closed: Option<ClosedCallback>,
    on_transition: Option<TransitionListener>,
    parent: Option<Weak<RefCell<HostInner>>>,
    children: SmallVec<[Weak<RefCell<HostInner>>; 2]>,
    /// `close()` arrived while a nested sheet was still up.
    close_deferred: bool,
    pointer: Option<PointerTrack>,
}

impl HostInner {
    fn frame(&self) -> SheetFrame {
        let offset = self.animator.offset();
        let sheet_bounds = self.config.resting_bounds().translate(0.0, offset);
        let (handle_bounds, content_bounds) = sheet_bounds.split_top(self.config.handle_height);
        SheetFrame {
            state: self.state,
            offset,
            backdrop: backdrop_color(&self.config.backdrop, offset, self.animator.hidden_offset()),
            sheet_bounds,
            handle_bounds,
            content_bounds,
        }
    }

    fn mounted_children(&self) -> Vec<HostRef> {
        self.children
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|child| child.borrow().state.is_mounted())
            .collect()
    }

    fn begin(&mut self, state: SheetState) -> (SheetState, u64) {
        let from = self.state;
        self.state = state;
        self.generation += 1;
        (from, self.generation)
    }
}

/// Hosts one bottom sheet.
///
/// The owning screen keeps the host, hands [`SheetHandle`]s to whatever needs
/// to open or close it, feeds it pointer events, and draws [`SheetFrame`]s.
/// Transition and close callbacks run with no internal borrow held, so they
/// may call back into any host.
pub struct OverlayHost {
    inner: HostRef,
}

impl OverlayHost {
    /// New hosts start `Closed` at the hidden offset.
    pub fn new(runtime: RuntimeHandle, config: SheetConfig) -> Result<Self, SheetConfigError> {
        config.validate()?;
        let animator = OverlayAnimator::from_config(runtime, &config);
        let gesture = GestureDismissController::new(config.thresholds);
        let inner = HostInner {
            config,
            state: SheetState::Closed,
            animator,
            gesture,
            generation: 0,
            on_closed: None,
            on_transition: None,
            parent: None,
            children: SmallVec::new(),
            close_deferred: false,
            pointer: None,
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    pub fn handle(&self) -> SheetHandle {
        SheetHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn open(&self) {
        open(&self.inner);
    }

    pub fn close(&self) {
        close(&self.inner);
    }

    /// A tap on the dimmed area around the sheet.
    pub fn press_backdrop(&self) {
        press_backdrop(&self.inner);
    }

    pub fn state(&self) -> SheetState {
        self.inner.borrow().state
    }

    pub fn is_mounted(&self) -> bool {
        self.state().is_mounted()
    }

    pub fn offset(&self) -> f32 {
        self.inner.borrow().animator.offset()
    }

    /// Observable offset, for renderers that redraw on change.
    ///
    /// Subscribers are notified in the middle of a host update, so they must
    /// not call back into this host; read the new value they are handed.
    pub fn offset_state(&self) -> State<f32> {
        self.inner.borrow().animator.offset_state()
    }

    pub fn backdrop_opacity(&self) -> f32 {
        let inner = self.inner.borrow();
        backdrop_opacity(
            inner.animator.offset(),
            inner.animator.hidden_offset(),
            inner.config.backdrop.max_alpha,
        )
    }

    pub fn label(&self) -> String {
        self.inner.borrow().config.label.clone()
    }

    /// Render description, or `None` while closed.
    pub fn frame(&self) -> Option<SheetFrame> {
        let inner = self.inner.borrow();
        inner.state.is_mounted().then(|| inner.frame())
    }

    /// Runs `content` only while the sheet is mounted.
    pub fn render<R>(&self, content: impl FnOnce(&SheetFrame) -> R) -> Option<R> {
        self.frame().map(|frame| content(&frame))
    }

    /// Called after every completed close.
    pub fn set_on_closed(&self, on_closed: impl FnMut() + 'static) {
        self.inner.borrow_mut().on_closed = Some(Box::new(on_closed));
    }

    /// Called with `(from, to)` on every state change.
    pub fn set_on_transition(&self, listener: impl FnMut(SheetState, SheetState) + 'static) {
        self.inner.borrow_mut().on_transition = Some(Box::new(listener));
    }

    /// Nest `child` inside this sheet. Closing this sheet closes the child
    /// first.
    pub fn add_child(&self, child: &OverlayHost) {
        if Rc::ptr_eq(&self.inner, &child.inner) {
            log::warn!("a sheet cannot be nested inside itself");
            return;
        }
        child.inner.borrow_mut().parent = Some(Rc::downgrade(&self.inner));
        let mut inner = self.inner.borrow_mut();
        inner.children.retain(|weak| weak.strong_count() > 0);
        inner.children.push(Rc::downgrade(&child.inner));
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.inner.borrow_mut().config.viewport = viewport;
    }

    /// Change the sheet height, e.g. after its content was measured.
    pub fn set_sheet_height(&self, sheet_height: f32) -> Result<(), SheetConfigError> {
        let mut inner = self.inner.borrow_mut();
        let mut config = inner.config.clone();
        config.sheet_height = sheet_height;
        config.validate()?;
        inner.config = config;
        inner.animator.set_hidden_offset(sheet_height);
        Ok(())
    }

    /// Begin a drag in `region`. Returns whether the sheet accepted it.
    pub fn drag_start(&self, region: GestureRegion, timestamp_ms: f64) -> bool {
        drag_start(&self.inner, region, timestamp_ms)
    }

    pub fn drag_move(&self, sample: GestureSample) -> DragUpdate {
        drag_move(&self.inner, sample)
    }

    /// Finish a drag with its final displacement and, if the platform
    /// reports one, its velocity in px/ms.
    pub fn drag_release(&self, dy: f32, velocity_y: Option<f32>) -> Option<ReleaseOutcome> {
        let outcome = {
            let mut inner = self.inner.borrow_mut();
            if !inner.gesture.is_active() {
                return None;
            }
            inner.gesture.on_release(dy, velocity_y)
        };
        finish_gesture(&self.inner, outcome);
        Some(outcome)
    }

    pub fn drag_cancel(&self) {
        let outcome = {
            let mut inner = self.inner.borrow_mut();
            if !inner.gesture.is_active() {
                return;
            }
            inner.gesture.on_cancel()
        };
        finish_gesture(&self.inner, outcome);
    }

    /// Route a raw pointer event: drags on the handle or content move the
    /// sheet, taps outside it press the backdrop, and nothing reaches the
    /// screen underneath while the sheet is mounted.
    pub fn dispatch_pointer(&self, event: &PointerEvent) -> PointerRoute {
        dispatch_pointer(&self.inner, event)
    }
}

/// Cloneable open/close control for a sheet, safe to hand to buttons and
/// other screens. Inert once the host is dropped.
#[derive(Clone)]
pub struct SheetHandle {
    inner: Weak<RefCell<HostInner>>,
}

impl SheetHandle {
    pub fn open(&self) {
        if let Some(inner) = self.inner.upgrade() {
            open(&inner);
        }
    }

    pub fn close(&self) {
        if let Some(inner) = self.inner.upgrade() {
            close(&inner);
        }
    }

    pub fn state(&self) -> Option<SheetState> {
        let inner = self.inner.upgrade()?;
        let state = inner.borrow().state;
        Some(state)
    }

    pub fn is_open(&self) -> bool {
        self.state().is_some_and(SheetState::is_presented)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

fn open(this: &HostRef) {
    let (from, generation, signal, waiting_parent) = {
        let mut inner = this.borrow_mut();
        inner.close_deferred = false;
        let waiting_parent = match inner.state {
            SheetState::Opening
            | SheetState::Open
            | SheetState::Dragging
            | SheetState::SnappingBack => return,
            SheetState::Closed => {
                let hidden = inner.animator.hidden_offset();
                inner.animator.set_immediate(hidden);
                None
            }
            SheetState::Closing => inner.parent.as_ref().and_then(Weak::upgrade),
        };
        let (from, generation) = inner.begin(SheetState::Opening);
        let signal = inner
            .animator
            .animate_to(SheetTarget::Resting, TransitionMode::Timed);
        (from, generation, signal, waiting_parent)
    };
    // A reopened child outlives the close its parent was waiting on.
    if let Some(parent) = waiting_parent {
        parent.borrow_mut().close_deferred = false;
    }
    notify_transition(this, from, SheetState::Opening);
    watch(this, signal, generation);
}

fn close(this: &HostRef) {
    let children = {
        let mut inner = this.borrow_mut();
        if matches!(inner.state, SheetState::Closed | SheetState::Closing) {
            return;
        }
        let children = inner.mounted_children();
        if !children.is_empty() {
            inner.close_deferred = true;
        }
        children
    };
    if !children.is_empty() {
        log::debug!(
            "sheet '{}': close deferred until {} nested sheet(s) close",
            this.borrow().config.label,
            children.len()
        );
        for child in &children {
            close(child);
        }
        return;
    }

    let (from, generation, signal) = {
        let mut inner = this.borrow_mut();
        inner.close_deferred = false;
        if inner.gesture.is_active() {
            inner.gesture.on_cancel();
        }
        let (from, generation) = inner.begin(SheetState::Closing);
        let signal = inner
            .animator
            .animate_to(SheetTarget::Hidden, TransitionMode::Timed);
        (from, generation, signal)
    };
    notify_transition(this, from, SheetState::Closing);
    watch(this, signal, generation);
}

fn press_backdrop(this: &HostRef) {
    let dismissable = {
        let inner = this.borrow();
        inner.state.is_mounted() && inner.config.backdrop.dismiss_on_press
    };
    if dismissable {
        close(this);
    }
}

fn snap_back(this: &HostRef) {
    let (from, generation, signal) = {
        let mut inner = this.borrow_mut();
        let (from, generation) = inner.begin(SheetState::SnappingBack);
        let signal = inner
            .animator
            .animate_to(SheetTarget::Resting, TransitionMode::Spring);
        (from, generation, signal)
    };
    notify_transition(this, from, SheetState::SnappingBack);
    watch(this, signal, generation);
}

fn watch(this: &HostRef, signal: CompletionSignal, generation: u64) {
    let weak = Rc::downgrade(this);
    signal.on_complete(move |result| {
        if let Some(strong) = weak.upgrade() {
            on_animation_end(&strong, generation, result);
        }
    });
}

fn on_animation_end(this: &HostRef, generation: u64, result: AnimationResult) {
    // Interrupted signals may resolve while the interrupting call still holds
    // the host borrow.
    if !result.is_finished() {
        return;
    }
    let (from, to) = {
        let mut inner = this.borrow_mut();
        if inner.generation != generation {
            return;
        }
        let to = match inner.state {
            SheetState::Opening | SheetState::SnappingBack => SheetState::Open,
            SheetState::Closing => SheetState::Closed,
            _ => return,
        };
        let from = inner.state;
        inner.state = to;
        (from, to)
    };
    notify_transition(this, from, to);

    if to == SheetState::Closed {
        fire_on_closed(this);
        notify_parent(this);
    }
}

fn fire_on_closed(this: &HostRef) {
    let callback = this.borrow_mut().on_closed.take();
    if let Some(mut callback) = callback {
        callback();
        let mut inner = this.borrow_mut();
        if inner.on_closed.is_none() {
            inner.on_closed = Some(callback);
        }
    }
}

fn notify_parent(this: &HostRef) {
    let parent = this.borrow().parent.as_ref().and_then(Weak::upgrade);
    let Some(parent) = parent else {
        return;
    };
    let resume = {
        let inner = parent.borrow();
        inner.close_deferred && inner.mounted_children().is_empty()
    };
    if resume {
        log::debug!(
            "sheet '{}': nested sheets closed, resuming close",
            parent.borrow().config.label
        );
        close(&parent);
    }
}

fn notify_transition(this: &HostRef, from: SheetState, to: SheetState) {
    if from == to {
        return;
    }
    log::debug!("sheet '{}': {from:?} -> {to:?}", this.borrow().config.label);
    let listener = this.borrow_mut().on_transition.take();
    if let Some(mut listener) = listener {
        listener(from, to);
        let mut inner = this.borrow_mut();
        if inner.on_transition.is_none() {
            inner.on_transition = Some(listener);
        }
    }
}

fn drag_start(this: &HostRef, region: GestureRegion, timestamp_ms: f64) -> bool {
    let (grabbed_from, parent) = {
        let mut inner = this.borrow_mut();
        let grabbed_from = match inner.state {
            SheetState::Closed | SheetState::Dragging => {
                log::trace!(
                    "sheet '{}': drag ignored while {:?}",
                    inner.config.label,
                    inner.state
                );
                return false;
            }
            SheetState::Open => None,
            // Grabbing a moving sheet stops it where it is.
            state @ (SheetState::Opening | SheetState::SnappingBack | SheetState::Closing) => {
                inner.animator.cancel();
                inner.begin(SheetState::Open);
                Some(state)
            }
        };
        let base_offset = inner.animator.offset();
        inner.gesture.on_start(region, timestamp_ms, base_offset);
        let parent = inner.parent.as_ref().and_then(Weak::upgrade);
        (grabbed_from, parent)
    };

    if let Some(from) = grabbed_from {
        notify_transition(this, from, SheetState::Open);
        if from == SheetState::Closing {
            // The user pulled the sheet back; a parent waiting on it stays up.
            if let Some(parent) = parent {
                parent.borrow_mut().close_deferred = false;
            }
        }
    }
    true
}

fn drag_move(this: &HostRef, sample: GestureSample) -> DragUpdate {
    let (update, entered) = {
        let mut inner = this.borrow_mut();
        if !matches!(inner.state, SheetState::Open | SheetState::Dragging) {
            return DragUpdate::Ignored;
        }
        let update = inner.gesture.on_move(sample);
        let mut entered = false;
        if let DragUpdate::Dragging { offset } = update {
            inner.animator.set_immediate(offset);
            if inner.state == SheetState::Open {
                inner.begin(SheetState::Dragging);
                entered = true;
            }
        }
        (update, entered)
    };
    if entered {
        notify_transition(this, SheetState::Open, SheetState::Dragging);
    }
    update
}

fn finish_gesture(this: &HostRef, outcome: ReleaseOutcome) {
    let (state, offset) = {
        let mut inner = this.borrow_mut();
        if inner.state == SheetState::Open && outcome.was_drag {
            // The drag only showed up in the release.
            inner.animator.set_immediate(outcome.offset);
        }
        (inner.state, inner.animator.offset())
    };
    let dismiss = outcome.was_drag && outcome.decision == DismissDecision::Dismiss;
    match state {
        SheetState::Dragging | SheetState::Open if dismiss => close(this),
        SheetState::Dragging => snap_back(this),
        // A press on a sheet grabbed mid-animation still has to settle.
        SheetState::Open if offset > 0.0 => snap_back(this),
        _ => {}
    }
}

fn dispatch_pointer(this: &HostRef, event: &PointerEvent) -> PointerRoute {
    let (mounted, frame, track) = {
        let inner = this.borrow();
        (inner.state.is_mounted(), inner.frame(), inner.pointer)
    };
    if !mounted {
        this.borrow_mut().pointer = None;
        return PointerRoute::PassThrough;
    }

    let route = match event.kind {
        // One pointer at a time; extra fingers are swallowed.
        PointerEventKind::Down if track.is_some_and(|track| track.id != event.id) => {
            PointerRoute::Consumed
        }
        PointerEventKind::Down => {
            let target = if frame.handle_bounds.contains(event.position) {
                PressTarget::Sheet(GestureRegion::Handle)
            } else if frame.content_bounds.contains(event.position) {
                PressTarget::Sheet(GestureRegion::Content)
            } else {
                PressTarget::Backdrop
            };
            this.borrow_mut().pointer = Some(PointerTrack {
                id: event.id,
                down_at: event.position,
                target,
            });
            match target {
                PressTarget::Sheet(region) => {
                    drag_start(this, region, event.uptime_millis);
                    route_for(region, false)
                }
                PressTarget::Backdrop => PointerRoute::Consumed,
            }
        }
        PointerEventKind::Move => match track {
            Some(track) if track.id == event.id => match track.target {
                PressTarget::Sheet(region) => {
                    let update = drag_move(this, sample_for(&track, event));
                    route_for(region, matches!(update, DragUpdate::Dragging { .. }))
                }
                PressTarget::Backdrop => PointerRoute::Consumed,
            },
            _ => PointerRoute::Consumed,
        },
        PointerEventKind::Up => {
            this.borrow_mut().pointer = None;
            match track {
                Some(track) if track.id == event.id => match track.target {
                    PressTarget::Sheet(region) => {
                        let outcome = {
                            let mut inner = this.borrow_mut();
                            inner
                                .gesture
                                .is_active()
                                .then(|| inner.gesture.on_release_sample(sample_for(&track, event)))
                        };
                        let was_drag = outcome.is_some_and(|outcome| outcome.was_drag);
                        if let Some(outcome) = outcome {
                            finish_gesture(this, outcome);
                        }
                        route_for(region, was_drag)
                    }
                    PressTarget::Backdrop => {
                        if !frame.sheet_bounds.contains(event.position) {
                            press_backdrop(this);
                        }
                        PointerRoute::Consumed
                    }
                },
                _ => PointerRoute::Consumed,
            }
        }
        PointerEventKind::Cancel => {
            this.borrow_mut().pointer = None;
            if matches!(track, Some(track) if track.id == event.id) {
                let outcome = {
                    let mut inner = this.borrow_mut();
                    inner.gesture.is_active().then(|| inner.gesture.on_cancel())
                };
                if let Some(outcome) = outcome {
                    finish_gesture(this, outcome);
                }
            }
            PointerRoute::Consumed
        }
    };

    if route == PointerRoute::Consumed {
        event.consume();
    }
    route
}

fn sample_for(track: &PointerTrack, event: &PointerEvent) -> GestureSample {
    GestureSample::new(
        event.position.x - track.down_at.x,
        event.position.y - track.down_at.y,
        event.uptime_millis,
    )
}

/// Content presses stay with the content until they turn into a sheet drag.
fn route_for(region: GestureRegion, dragging: bool) -> PointerRoute {
    match region {
        GestureRegion::Content if !dragging => PointerRoute::Content,
        _ => PointerRoute::Consumed,
    }
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
