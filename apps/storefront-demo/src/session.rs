//! Scripted user sessions replayed against the storefront.

use sheetkit_foundation::PointerClock;
use sheetkit_sheet::PointerRoute;
use sheetkit_testing::{FrameDriver, GestureScript};
use sheetkit_ui_graphics::Point;

use crate::screens::{ScreenId, Storefront};

/// Handle strip of a sheet `height` tall on the reference viewport.
fn handle_point(height: f32) -> Point {
    Point::new(195.0, 844.0 - height + 14.0)
}

fn content_point(height: f32) -> Point {
    Point::new(195.0, 844.0 - height + 120.0)
}

const BACKDROP_POINT: Point = Point::new(195.0, 60.0);

#[derive(Clone, Debug)]
pub enum Step {
    /// A button on the screen underneath opens a sheet.
    Open(ScreenId),
    /// A button inside a sheet closes it.
    Close(ScreenId),
    /// Drag a sheet's handle down by `dy` over `millis`.
    DragHandle { screen: ScreenId, dy: f32, millis: f64 },
    /// Drag inside a sheet's content by `dy` over `millis`.
    DragContent { screen: ScreenId, dy: f32, millis: f64 },
    TapBackdrop,
    /// Let animations run.
    Wait(u64),
}

#[derive(Clone, Debug)]
pub struct Session {
    pub name: &'static str,
    pub steps: Vec<Step>,
}

impl Session {
    pub fn new(name: &'static str, steps: Vec<Step>) -> Self {
        Self { name, steps }
    }
}

/// What a session left behind.
#[derive(Clone, Debug, Default)]
pub struct SessionReport {
    pub name: &'static str,
    pub journal: Vec<String>,
    /// Pointer events that reached the screen underneath the sheets.
    pub passed_through: usize,
    pub frames: u64,
}

/// The storefront flows exercised by the demo binary.
pub fn default_sessions() -> Vec<Session> {
    vec![
        Session::new(
            "cancel order, dismissed by dragging the handle",
            vec![
                Step::Open(ScreenId::CancelOrder),
                Step::Wait(400),
                Step::DragHandle {
                    screen: ScreenId::CancelOrder,
                    dy: 60.0,
                    millis: 120.0,
                },
                Step::Wait(400),
            ],
        ),
        Session::new(
            "track order, a hesitant drag snaps back, then the backdrop closes it",
            vec![
                Step::Open(ScreenId::TrackOrder),
                Step::Wait(400),
                Step::DragHandle {
                    screen: ScreenId::TrackOrder,
                    dy: 30.0,
                    millis: 400.0,
                },
                Step::Wait(400),
                Step::TapBackdrop,
                Step::Wait(400),
            ],
        ),
        Session::new(
            "size selection with a nested address form",
            vec![
                Step::Open(ScreenId::SizeSelection),
                Step::Wait(400),
                Step::Open(ScreenId::AddAddress),
                Step::Wait(400),
                Step::Close(ScreenId::SizeSelection),
                Step::Wait(800),
            ],
        ),
        Session::new(
            "exchange confirmation ignores backdrop taps",
            vec![
                Step::Open(ScreenId::ExchangeConfirmation),
                Step::Wait(400),
                Step::TapBackdrop,
                Step::Wait(200),
                Step::DragContent {
                    screen: ScreenId::ExchangeConfirmation,
                    dy: 160.0,
                    millis: 240.0,
                },
                Step::Wait(400),
            ],
        ),
    ]
}

/// Replay `session`, stepping virtual frames between input.
pub fn run_session(
    storefront: &Storefront,
    driver: &mut FrameDriver,
    session: &Session,
) -> SessionReport {
    let wall = PointerClock::new();
    let first_frame = driver.frames_rendered();
    let mut passed_through = 0;
    storefront.take_journal();
    log::info!("session: {}", session.name);

    for step in &session.steps {
        log::debug!("step {step:?}");
        let script = match *step {
            Step::Open(id) => {
                if let Some(handle) = storefront.handle(id) {
                    handle.open();
                }
                None
            }
            Step::Close(id) => {
                if let Some(handle) = storefront.handle(id) {
                    handle.close();
                }
                None
            }
            Step::DragHandle { screen, dy, millis } => {
                let at = handle_point(screen.config().sheet_height);
                Some(drag(driver, at, dy, millis))
            }
            Step::DragContent { screen, dy, millis } => {
                let at = content_point(screen.config().sheet_height);
                Some(drag(driver, at, dy, millis))
            }
            Step::TapBackdrop => Some(GestureScript::tap(BACKDROP_POINT, driver.now_millis() + 16.0)),
            Step::Wait(millis) => {
                driver.advance_by_millis(millis);
                None
            }
        };
        if let Some(script) = script {
            driver.play(script.events(), |event| {
                if storefront.dispatch_pointer(event) == PointerRoute::PassThrough {
                    passed_through += 1;
                }
            });
        }
    }

    let frames = driver.frames_rendered() - first_frame;
    log::info!(
        "session finished: {frames} frames in {:.1}ms wall time",
        wall.uptime_millis()
    );
    SessionReport {
        name: session.name,
        journal: storefront.take_journal(),
        passed_through,
        frames,
    }
}

fn drag(driver: &FrameDriver, at: Point, dy: f32, millis: f64) -> GestureScript {
    let steps = ((millis / 20.0).ceil() as usize).max(1);
    GestureScript::press(at, driver.now_millis() + 16.0)
        .drag_by(0.0, dy, millis, steps)
        .release()
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
