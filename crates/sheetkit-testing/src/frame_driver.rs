use sheetkit_core::{Runtime, RuntimeHandle};
use sheetkit_foundation::PointerEvent;

/// One frame at 60 FPS.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

/// Frames `run_until_idle` allows before deciding something never settles.
const MAX_IDLE_FRAMES: usize = 600;

/// Steps a [`Runtime`] through virtual frames.
pub struct FrameDriver {
    runtime: Runtime,
    now_nanos: u64,
    frame_interval_nanos: u64,
    frames: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::with_frame_interval_nanos(FRAME_INTERVAL_NANOS)
    }

    pub fn with_frame_interval_nanos(frame_interval_nanos: u64) -> Self {
        Self {
            runtime: Runtime::new(),
            now_nanos: 0,
            frame_interval_nanos: frame_interval_nanos.max(1),
            frames: 0,
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn now_nanos(&self) -> u64 {
        self.now_nanos
    }

    /// Virtual time in milliseconds, on the same scale as pointer uptimes.
    pub fn now_millis(&self) -> f64 {
        self.now_nanos as f64 / 1_000_000.0
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn is_idle(&self) -> bool {
        !self.runtime.handle().has_frame_callbacks()
    }

    /// Advance one frame interval and drain the frame callbacks.
    ///
    /// Returns whether more frames were requested.
    pub fn advance_frame(&mut self) -> bool {
        self.now_nanos += self.frame_interval_nanos;
        self.frames += 1;
        let handle = self.runtime.handle();
        handle.drain_frame_callbacks(self.now_nanos);
        handle.has_frame_callbacks()
    }

    /// Run frames until at least `millis` of virtual time has passed.
    pub fn advance_by_millis(&mut self, millis: u64) {
        let until = self.now_nanos + millis * 1_000_000;
        while self.now_nanos < until {
            self.advance_frame();
        }
    }

    /// Run frames until no callbacks remain; returns how many frames ran.
    ///
    /// # Panics
    /// When work is still pending after 600 frames.
    pub fn run_until_idle(&mut self) -> usize {
        let mut frames = 0;
        while !self.is_idle() {
            assert!(
                frames < MAX_IDLE_FRAMES,
                "runtime still busy after {MAX_IDLE_FRAMES} frames"
            );
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Deliver `events` in timestamp order, running frames in between so the
    /// virtual clock reaches each event's uptime before it is dispatched.
    pub fn play(&mut self, events: &[PointerEvent], mut dispatch: impl FnMut(&PointerEvent)) {
        for event in events {
            while self.now_millis() + 1e-6 < event.uptime_millis {
                self.advance_frame();
            }
            log::trace!("dispatch {:?} at {:.1}ms", event.kind, event.uptime_millis);
            dispatch(event);
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/frame_driver_tests.rs"]
mod tests;
