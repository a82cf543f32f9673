//! Observable single-threaded state cells.
//!
//! A [`MutableState`] holds one value and notifies subscribers after every
//! write. Readers that should not write get a [`State`] view.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

type Observer<T> = Rc<dyn Fn(&T)>;

struct StateCell<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    observers: RefCell<SmallVec<[(u64, Observer<T>); 2]>>,
    next_observer_id: Cell<u64>,
}

pub struct MutableState<T: Clone + 'static> {
    cell: Rc<StateCell<T>>,
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(StateCell {
                value: RefCell::new(value),
                version: Cell::new(0),
                observers: RefCell::new(SmallVec::new()),
                next_observer_id: Cell::new(1),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    /// Number of writes since creation.
    pub fn version(&self) -> u64 {
        self.cell.version.get()
    }

    pub fn set_value(&self, value: T) {
        *self.cell.value.borrow_mut() = value;
        self.cell.version.set(self.cell.version.get() + 1);
        notify(&self.cell);
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.cell.value.borrow_mut());
        self.cell.version.set(self.cell.version.get() + 1);
        notify(&self.cell);
        result
    }

    pub fn as_state(&self) -> State<T> {
        State {
            cell: Rc::clone(&self.cell),
        }
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> StateSubscription<T> {
        subscribe(&self.cell, observer)
    }
}

impl<T: Clone + 'static> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

/// Read-only view of a [`MutableState`].
pub struct State<T: Clone + 'static> {
    cell: Rc<StateCell<T>>,
}

impl<T: Clone + 'static> State<T> {
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.value.borrow())
    }

    pub fn version(&self) -> u64 {
        self.cell.version.get()
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> StateSubscription<T> {
        subscribe(&self.cell, observer)
    }
}

impl<T: Clone + 'static> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

/// Keeps an observer registered. Dropping it unsubscribes.
pub struct StateSubscription<T: 'static> {
    cell: Weak<StateCell<T>>,
    id: u64,
}

impl<T: 'static> Drop for StateSubscription<T> {
    fn drop(&mut self) {
        if let Some(cell) = self.cell.upgrade() {
            cell.observers
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

fn subscribe<T: 'static>(
    cell: &Rc<StateCell<T>>,
    observer: impl Fn(&T) + 'static,
) -> StateSubscription<T> {
    let id = cell.next_observer_id.get();
    cell.next_observer_id.set(id + 1);
    cell.observers.borrow_mut().push((id, Rc::new(observer)));
    StateSubscription {
        cell: Rc::downgrade(cell),
        id,
    }
}

fn notify<T: Clone + 'static>(cell: &Rc<StateCell<T>>) {
    // Observers may subscribe, unsubscribe or write back while being notified.
    let observers: SmallVec<[Observer<T>; 2]> = cell
        .observers
        .borrow()
        .iter()
        .map(|(_, observer)| Rc::clone(observer))
        .collect();
    if observers.is_empty() {
        return;
    }
    let value = cell.value.borrow().clone();
    for observer in observers {
        observer(&value);
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
