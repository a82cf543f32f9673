//! The storefront's sheet screens and the layer that stacks them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use sheetkit_animation::{AnimationSpec, Easing};
use sheetkit_core::collections::map::{self, HashMap};
use sheetkit_core::RuntimeHandle;
use sheetkit_foundation::{PointerEvent, RegionThresholds};
use sheetkit_sheet::{
    BackdropStyle, OverlayHost, PointerRoute, SheetConfig, SheetConfigError, SheetHandle,
    SheetState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenId {
    CancelOrder,
    TrackOrder,
    SizeSelection,
    /// Opened from inside the size selection sheet.
    AddAddress,
    ExchangeConfirmation,
}

impl ScreenId {
    /// Bottom to top. A later sheet draws over an earlier one.
    pub const ALL: [ScreenId; 5] = [
        ScreenId::CancelOrder,
        ScreenId::TrackOrder,
        ScreenId::SizeSelection,
        ScreenId::AddAddress,
        ScreenId::ExchangeConfirmation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScreenId::CancelOrder => "cancel-order",
            ScreenId::TrackOrder => "track-order",
            ScreenId::SizeSelection => "size-selection",
            ScreenId::AddAddress => "add-address",
            ScreenId::ExchangeConfirmation => "exchange-confirmation",
        }
    }

    pub fn config(self) -> SheetConfig {
        match self {
            ScreenId::CancelOrder => SheetConfig::new(self.label(), 520.0),
            ScreenId::TrackOrder => SheetConfig::new(self.label(), 380.0),
            // A tall list of sizes; content drags need a longer pull.
            ScreenId::SizeSelection => SheetConfig::new(self.label(), 640.0)
                .with_content_thresholds(RegionThresholds::content().with_dismiss_distance(140.0)),
            ScreenId::AddAddress => SheetConfig::new(self.label(), 560.0).with_backdrop(
                BackdropStyle {
                    max_alpha: 0.3,
                    ..BackdropStyle::default()
                },
            ),
            // Confirmations must be answered, not tapped away.
            ScreenId::ExchangeConfirmation => SheetConfig::new(self.label(), 300.0)
                .with_open_spec(AnimationSpec::tween(320, Easing::FastOutSlowInEasing))
                .with_backdrop(BackdropStyle {
                    dismiss_on_press: false,
                    ..BackdropStyle::default()
                }),
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line per sheet state change, in order.
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Every sheet the storefront can show, stacked above the current screen.
pub struct Storefront {
    sheets: HashMap<ScreenId, OverlayHost>,
    journal: Journal,
}

impl Storefront {
    pub fn new(runtime: RuntimeHandle) -> Result<Self, SheetConfigError> {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let mut sheets = map::new();
        for id in ScreenId::ALL {
            let host = OverlayHost::new(runtime.clone(), id.config())?;
            let sink = Rc::clone(&journal);
            host.set_on_transition(move |from, to| {
                log::info!("{id}: {from:?} -> {to:?}");
                sink.borrow_mut().push(format!("{id} {from:?}->{to:?}"));
            });
            let sink = Rc::clone(&journal);
            host.set_on_closed(move || sink.borrow_mut().push(format!("{id} closed")));
            sheets.insert(id, host);
        }

        if let (Some(parent), Some(child)) = (
            sheets.get(&ScreenId::SizeSelection),
            sheets.get(&ScreenId::AddAddress),
        ) {
            parent.add_child(child);
        }

        Ok(Self { sheets, journal })
    }

    pub fn sheet(&self, id: ScreenId) -> Option<&OverlayHost> {
        self.sheets.get(&id)
    }

    /// Control for a button on the underlying screen.
    pub fn handle(&self, id: ScreenId) -> Option<SheetHandle> {
        self.sheet(id).map(OverlayHost::handle)
    }

    pub fn state(&self, id: ScreenId) -> SheetState {
        self.sheet(id)
            .map_or(SheetState::Closed, OverlayHost::state)
    }

    /// Mounted sheets, topmost first.
    pub fn mounted(&self) -> Vec<ScreenId> {
        ScreenId::ALL
            .iter()
            .rev()
            .copied()
            .filter(|id| self.state(*id).is_mounted())
            .collect()
    }

    /// Only the topmost mounted sheet sees pointer input.
    pub fn dispatch_pointer(&self, event: &PointerEvent) -> PointerRoute {
        match self.mounted().first().and_then(|id| self.sheet(*id)) {
            Some(top) => top.dispatch_pointer(event),
            None => PointerRoute::PassThrough,
        }
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    pub fn take_journal(&self) -> Vec<String> {
        std::mem::take(&mut *self.journal.borrow_mut())
    }
}

#[cfg(test)]
#[path = "tests/screens_tests.rs"]
mod tests;
