use std::cell::RefCell;
use std::rc::Rc;

use sheetkit_core::{FrameCallbackRegistration, FrameClock, MutableState, RuntimeHandle, State};

use crate::completion::{AnimationEndReason, AnimationResult, CompletionSignal};
use crate::spec::AnimationType;

/// Fixed integration step for springs; semi-implicit Euler stays accurate for
/// stiff springs at this size.
const SPRING_STEP_SECS: f32 = 0.004;

/// Frames further apart than this (a stalled UI thread) are integrated as if
/// only this much time passed, so a spring never jumps past its target.
const MAX_SPRING_FRAME_SECS: f32 = 0.1;

/// A scalar that animates toward targets one frame at a time.
///
/// Only one animation runs at a time: a new `animateTo`, `snapTo` or `stop`
/// interrupts the running one, whose [`CompletionSignal`] then resolves with
/// [`AnimationEndReason::Interrupted`] on the next frame.
pub struct Animatable {
    inner: Rc<RefCell<AnimatableInner>>,
}

struct AnimatableInner {
    state: MutableState<f32>,
    clock: FrameClock,
    current: f32,
    /// Progress units per second; only springs track it.
    velocity: f32,
    start: f32,
    target: f32,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    signal: Option<CompletionSignal>,
    /// Bumped on every command so frames queued for an older run are ignored.
    run_id: u64,
}

enum FrameOutcome {
    Continue,
    Finished,
}

impl Animatable {
    pub fn new(initial: f32, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            state: MutableState::new(initial),
            clock: runtime.frame_clock(),
            current: initial,
            velocity: 0.0,
            start: initial,
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            signal: None,
            run_id: 0,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate from the current value to `target`.
    pub fn animateTo(&mut self, target: f32, animation: AnimationType) -> CompletionSignal {
        let signal = CompletionSignal::pending();
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.start = inner.current;
            inner.target = target;
            inner.velocity = 0.0;
            inner.animation_type = animation;
            inner.signal = Some(signal.clone());
            interrupted
        };
        log::trace!(
            "animateTo {target} from {} ({animation:?})",
            self.inner.borrow().current
        );
        self.deliver_interrupted(interrupted);
        Self::schedule_frame(&self.inner);
        signal
    }

    /// Jump to `value` without animating.
    pub fn snapTo(&mut self, value: f32) {
        let (interrupted, state) = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.current = value;
            inner.start = value;
            inner.target = value;
            inner.velocity = 0.0;
            (interrupted, inner.state.clone())
        };
        self.deliver_interrupted(interrupted);
        state.set_value(value);
    }

    /// Stop any running animation where it currently is.
    pub fn stop(&mut self) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.interrupt();
            inner.start = inner.current;
            inner.target = inner.current;
            inner.velocity = 0.0;
            interrupted
        };
        self.deliver_interrupted(interrupted);
    }

    pub fn value(&self) -> f32 {
        self.inner.borrow().current
    }

    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    /// Current velocity in value units per second. Zero for tweens.
    pub fn velocity(&self) -> f32 {
        let inner = self.inner.borrow();
        inner.velocity * (inner.target - inner.start)
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().signal.is_some()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn state(&self) -> State<f32> {
        self.inner.borrow().state.as_state()
    }

    fn deliver_interrupted(&self, interrupted: Option<(CompletionSignal, AnimationResult)>) {
        let Some((signal, result)) = interrupted else {
            return;
        };
        let clock = self.inner.borrow().clock.clone();
        let pending = signal.clone();
        let registration = clock.with_frame_nanos(move |_| pending.complete(result));
        if registration.is_active() {
            registration.release();
        } else {
            signal.complete(result);
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner>>) {
        let (clock, run_id) = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            (inner.clock.clone(), inner.run_id)
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, run_id, time);
            }
        });
        if registration.is_active() {
            this.borrow_mut().registration = Some(registration);
        } else {
            log::warn!("frame runtime is gone; finishing animation immediately");
            Self::finish(this);
        }
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner>>, run_id: u64, frame_time_nanos: u64) {
        let outcome = {
            let mut inner = this.borrow_mut();
            if inner.run_id != run_id {
                return;
            }
            if let Some(registration) = inner.registration.take() {
                registration.release();
            }
            match inner.animation_type {
                AnimationType::Tween(_) => inner.step_tween(frame_time_nanos),
                AnimationType::Spring(_) => inner.step_spring(frame_time_nanos),
            }
        };

        match outcome {
            FrameOutcome::Continue => {
                let (state, value) = {
                    let inner = this.borrow();
                    (inner.state.clone(), inner.current)
                };
                state.set_value(value);
                Self::schedule_frame(this);
            }
            FrameOutcome::Finished => Self::finish(this),
        }
    }

    fn finish(this: &Rc<RefCell<AnimatableInner>>) {
        let (state, signal, target) = {
            let mut inner = this.borrow_mut();
            let target = inner.target;
            inner.current = target;
            inner.start = target;
            inner.velocity = 0.0;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            (inner.state.clone(), inner.signal.take(), target)
        };
        state.set_value(target);
        if let Some(signal) = signal {
            signal.complete(AnimationResult {
                end_reason: AnimationEndReason::Finished,
                end_value: target,
            });
        }
    }
}

impl AnimatableInner {
    /// Cancel the running animation, returning its signal so the caller can
    /// resolve it once no borrow is held.
    fn interrupt(&mut self) -> Option<(CompletionSignal, AnimationResult)> {
        self.run_id += 1;
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        let current = self.current;
        self.signal.take().map(|signal| {
            (
                signal,
                AnimationResult {
                    end_reason: AnimationEndReason::Interrupted,
                    end_value: current,
                },
            )
        })
    }

    fn step_tween(&mut self, frame_time_nanos: u64) -> FrameOutcome {
        let AnimationType::Tween(spec) = self.animation_type else {
            return FrameOutcome::Finished;
        };
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let delay_nanos = spec.delay_millis * 1_000_000;
        if elapsed_nanos < delay_nanos {
            return FrameOutcome::Continue;
        }

        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
        let linear = ((elapsed_nanos - delay_nanos) as f32 / duration_nanos as f32).clamp(0.0, 1.0);
        if linear >= 1.0 {
            return FrameOutcome::Finished;
        }
        let progress = spec.easing.transform(linear);
        self.current = self.start + (self.target - self.start) * progress;
        FrameOutcome::Continue
    }

    fn step_spring(&mut self, frame_time_nanos: u64) -> FrameOutcome {
        let AnimationType::Spring(spec) = self.animation_type else {
            return FrameOutcome::Finished;
        };
        let distance = self.target - self.start;
        if distance.abs() < f32::EPSILON {
            return FrameOutcome::Finished;
        }

        let previous = self.last_frame_nanos.replace(frame_time_nanos);
        let Some(previous) = previous else {
            return FrameOutcome::Continue;
        };
        let dt = (frame_time_nanos.saturating_sub(previous) as f32 / 1_000_000_000.0)
            .min(MAX_SPRING_FRAME_SECS);

        let damping = spec.damping();
        let mut progress = (self.current - self.start) / distance;
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(SPRING_STEP_SECS);
            let displacement = progress - 1.0;
            let force = -spec.stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            progress += self.velocity * step;
            remaining -= step;
        }
        self.current = self.start + distance * progress;

        let at_rest = self.velocity.abs() < spec.velocity_threshold;
        let near_target = (progress - 1.0).abs() < spec.position_threshold;
        if at_rest && near_target {
            FrameOutcome::Finished
        } else {
            FrameOutcome::Continue
        }
    }
}

impl Clone for Animatable {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[path = "tests/animatable_tests.rs"]
mod tests;
