use super::*;

use sheetkit_foundation::PointerEventKind;
use sheetkit_testing::FrameDriver;
use sheetkit_ui_graphics::Point;

fn storefront(driver: &FrameDriver) -> Storefront {
    Storefront::new(driver.runtime_handle()).expect("presets are valid")
}

#[test]
fn every_preset_validates() {
    for id in ScreenId::ALL {
        assert_eq!(id.config().validate(), Ok(()), "{id}");
        assert_eq!(id.config().label, id.label());
    }
}

#[test]
fn all_sheets_start_closed() {
    let driver = FrameDriver::new();
    let storefront = storefront(&driver);
    assert!(storefront.mounted().is_empty());
    for id in ScreenId::ALL {
        assert_eq!(storefront.state(id), SheetState::Closed);
    }
}

#[test]
fn closing_size_selection_closes_the_address_form_first() {
    let mut driver = FrameDriver::new();
    let storefront = storefront(&driver);
    let size = storefront.handle(ScreenId::SizeSelection).expect("registered");
    let address = storefront.handle(ScreenId::AddAddress).expect("registered");

    size.open();
    driver.run_until_idle();
    address.open();
    driver.run_until_idle();
    assert_eq!(
        storefront.mounted(),
        vec![ScreenId::AddAddress, ScreenId::SizeSelection]
    );
    storefront.take_journal();

    size.close();
    driver.run_until_idle();
    assert_eq!(
        storefront.journal(),
        vec![
            "add-address Open->Closing",
            "add-address Closing->Closed",
            "add-address closed",
            "size-selection Open->Closing",
            "size-selection Closing->Closed",
            "size-selection closed",
        ]
    );
}

#[test]
fn pointer_input_goes_to_the_topmost_sheet() {
    let mut driver = FrameDriver::new();
    let storefront = storefront(&driver);
    let backdrop = Point::new(195.0, 40.0);
    let down = PointerEvent::new(PointerEventKind::Down, backdrop, 0.0);
    assert_eq!(storefront.dispatch_pointer(&down), PointerRoute::PassThrough);

    storefront.handle(ScreenId::TrackOrder).expect("registered").open();
    storefront
        .handle(ScreenId::ExchangeConfirmation)
        .expect("registered")
        .open();
    driver.run_until_idle();

    // The confirmation is on top and ignores backdrop taps.
    let down = PointerEvent::new(PointerEventKind::Down, backdrop, 1_000.0);
    let up = PointerEvent::new(PointerEventKind::Up, backdrop, 1_050.0);
    assert_eq!(storefront.dispatch_pointer(&down), PointerRoute::Consumed);
    assert_eq!(storefront.dispatch_pointer(&up), PointerRoute::Consumed);
    driver.run_until_idle();
    assert_eq!(storefront.state(ScreenId::ExchangeConfirmation), SheetState::Open);
    assert_eq!(storefront.state(ScreenId::TrackOrder), SheetState::Open);
}
