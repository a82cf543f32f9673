use super::*;

use sheetkit_sheet::SheetState;

fn replay(session: &Session) -> (Storefront, SessionReport) {
    let mut driver = FrameDriver::new();
    let storefront = Storefront::new(driver.runtime_handle()).expect("presets are valid");
    let report = run_session(&storefront, &mut driver, session);
    (storefront, report)
}

#[test]
fn default_sessions_leave_nothing_on_screen() {
    for session in default_sessions() {
        let (storefront, report) = replay(&session);
        assert!(storefront.mounted().is_empty(), "{}", session.name);
        assert_eq!(report.passed_through, 0, "{}", session.name);
        assert!(report.frames > 0);
    }
}

#[test]
fn handle_drag_session_dismisses_cancel_order() {
    let sessions = default_sessions();
    let (_, report) = replay(&sessions[0]);
    assert_eq!(
        report.journal,
        vec![
            "cancel-order Closed->Opening",
            "cancel-order Opening->Open",
            "cancel-order Open->Dragging",
            "cancel-order Dragging->Closing",
            "cancel-order Closing->Closed",
            "cancel-order closed",
        ]
    );
}

#[test]
fn hesitant_drag_snaps_back_before_backdrop_close() {
    let sessions = default_sessions();
    let (_, report) = replay(&sessions[1]);
    assert!(report
        .journal
        .contains(&"track-order SnappingBack->Open".to_string()));
    assert_eq!(report.journal.last().map(String::as_str), Some("track-order closed"));
}

#[test]
fn confirmation_survives_backdrop_tap() {
    let mut driver = FrameDriver::new();
    let storefront = Storefront::new(driver.runtime_handle()).expect("presets are valid");
    let session = Session::new(
        "tap only",
        vec![
            Step::Open(ScreenId::ExchangeConfirmation),
            Step::Wait(400),
            Step::TapBackdrop,
            Step::Wait(400),
        ],
    );
    run_session(&storefront, &mut driver, &session);
    assert_eq!(
        storefront.state(ScreenId::ExchangeConfirmation),
        SheetState::Open
    );
}

#[test]
fn taps_without_sheets_reach_the_screen() {
    let session = Session::new("no sheets", vec![Step::TapBackdrop]);
    let (_, report) = replay(&session);
    assert_eq!(report.passed_through, 2);
    assert!(report.journal.is_empty());
}
