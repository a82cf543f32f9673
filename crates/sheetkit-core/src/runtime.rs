use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::thread::ThreadId;

use crate::collections::map::HashSet;
use crate::frame_clock::FrameClock;

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<FrameCallback>,
}

struct RuntimeInner {
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    needs_frame: Cell<bool>,
    last_frame_nanos: Cell<Option<u64>>,
    draining: Cell<bool>,
    // Ids already taken off the queue for the current drain but cancelled
    // by an earlier callback of the same frame.
    cancelled_while_draining: RefCell<HashSet<FrameCallbackId>>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            needs_frame: Cell::new(false),
            last_frame_nanos: Cell::new(None),
            draining: Cell::new(false),
            cancelled_while_draining: RefCell::new(HashSet::default()),
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.needs_frame.set(true);
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        } else if self.draining.get() {
            self.cancelled_while_draining.borrow_mut().insert(id);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.last_frame_nanos.set(Some(frame_time_nanos));
        // Callbacks registered while draining land on the next frame.
        let pending: Vec<(FrameCallbackId, FrameCallback)> = {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            let mut pending = Vec::with_capacity(callbacks.len());
            while let Some(mut entry) = callbacks.pop_front() {
                if let Some(callback) = entry.callback.take() {
                    pending.push((entry.id, callback));
                }
            }
            pending
        };
        log::trace!(
            "frame {frame_time_nanos}: running {} callbacks",
            pending.len()
        );
        self.draining.set(true);
        for (id, callback) in pending {
            if self.cancelled_while_draining.borrow_mut().remove(&id) {
                continue;
            }
            callback(frame_time_nanos);
        }
        self.draining.set(false);
        self.cancelled_while_draining.borrow_mut().clear();
        self.needs_frame.set(self.has_frame_callbacks());
    }
}

/// Owner of the frame-callback queue shared by every sheet on one UI thread.
///
/// The platform (or a test driver) calls [`RuntimeHandle::drain_frame_callbacks`]
/// once per display frame.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
    ui_thread_id: ThreadId,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
            ui_thread_id: std::thread::current().id(),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
            ui_thread_id: self.ui_thread_id,
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
    ui_thread_id: ThreadId,
}

impl RuntimeHandle {
    /// Returns `None` once the runtime has been dropped.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.assert_ui_thread();
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.assert_ui_thread();
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    /// Time of the most recently drained frame.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.last_frame_nanos.get())
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn assert_ui_thread(&self) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "sheet runtime used off its UI thread"
        );
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
