use sheetkit_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer stream away (system gesture, focus loss).
    Cancel,
}

/// Pointer event with consumption tracking.
///
/// A surface that claims an event consumes it so surfaces underneath leave it
/// alone. Clones share the consumed flag.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    /// Milliseconds on the platform's monotonic input clock.
    pub uptime_millis: f64,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, uptime_millis: f64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            uptime_millis,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

/// Monotonic timestamps for pointer events, relative to clock creation.
#[derive(Clone, Copy, Debug)]
pub struct PointerClock {
    origin: Instant,
}

impl PointerClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn uptime_millis(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    pub fn event(&self, kind: PointerEventKind, position: Point) -> PointerEvent {
        PointerEvent::new(kind, position, self.uptime_millis())
    }
}

impl Default for PointerClock {
    fn default() -> Self {
        Self::new()
    }
}
