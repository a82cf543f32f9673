use sheetkit_foundation::{PointerEvent, PointerEventKind};
use sheetkit_ui_graphics::Point;

/// Builder for a timed pointer sequence: one press, moves, one release.
///
/// ```
/// use sheetkit_testing::GestureScript;
/// use sheetkit_ui_graphics::Point;
///
/// let script = GestureScript::press(Point::new(180.0, 410.0), 1_000.0)
///     .drag_by(0.0, 60.0, 120.0, 6)
///     .release();
/// assert_eq!(script.events().len(), 8);
/// assert_eq!(script.end_time_ms(), 1_120.0);
/// ```
#[derive(Clone, Debug)]
pub struct GestureScript {
    events: Vec<PointerEvent>,
    position: Point,
    time_ms: f64,
}

impl GestureScript {
    pub fn press(at: Point, time_ms: f64) -> Self {
        Self {
            events: vec![PointerEvent::new(PointerEventKind::Down, at, time_ms)],
            position: at,
            time_ms,
        }
    }

    pub fn tap(at: Point, time_ms: f64) -> Self {
        Self::press(at, time_ms).hold(50.0).release()
    }

    /// Keep the pointer still for `millis`.
    pub fn hold(mut self, millis: f64) -> Self {
        self.time_ms += millis;
        self
    }

    /// Move by `(dx, dy)` over `duration_ms`, in `steps` evenly spaced moves.
    pub fn drag_by(mut self, dx: f32, dy: f32, duration_ms: f64, steps: usize) -> Self {
        let steps = steps.max(1);
        let origin = self.position;
        let start_ms = self.time_ms;
        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.position = Point::new(origin.x + dx * fraction, origin.y + dy * fraction);
            self.time_ms = start_ms + duration_ms * step as f64 / steps as f64;
            self.events.push(PointerEvent::new(
                PointerEventKind::Move,
                self.position,
                self.time_ms,
            ));
        }
        self
    }

    pub fn release(mut self) -> Self {
        self.events.push(PointerEvent::new(
            PointerEventKind::Up,
            self.position,
            self.time_ms,
        ));
        self
    }

    pub fn cancel(mut self) -> Self {
        self.events.push(PointerEvent::new(
            PointerEventKind::Cancel,
            self.position,
            self.time_ms,
        ));
        self
    }

    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<PointerEvent> {
        self.events
    }

    pub fn end_time_ms(&self) -> f64 {
        self.time_ms
    }
}
