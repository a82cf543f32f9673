use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEndReason {
    /// The animation reached its target.
    Finished,
    /// Another command took over before the target was reached.
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationResult {
    pub end_reason: AnimationEndReason,
    /// Value at the moment the animation ended.
    pub end_value: f32,
}

impl AnimationResult {
    pub fn is_finished(&self) -> bool {
        self.end_reason == AnimationEndReason::Finished
    }
}

type Listener = Box<dyn FnOnce(AnimationResult) + 'static>;

struct SignalInner {
    result: Option<AnimationResult>,
    listeners: SmallVec<[Listener; 1]>,
}

/// Resolves exactly once when the animation that produced it ends.
///
/// Cloning shares the same signal.
#[derive(Clone)]
pub struct CompletionSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl CompletionSignal {
    pub(crate) fn pending() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                result: None,
                listeners: SmallVec::new(),
            })),
        }
    }

    pub fn result(&self) -> Option<AnimationResult> {
        self.inner.borrow().result
    }

    pub fn is_complete(&self) -> bool {
        self.inner.borrow().result.is_some()
    }

    /// Runs `listener` once the signal resolves, or right away if it already
    /// has.
    pub fn on_complete(&self, listener: impl FnOnce(AnimationResult) + 'static) {
        let resolved = self.inner.borrow().result;
        match resolved {
            Some(result) => listener(result),
            None => self.inner.borrow_mut().listeners.push(Box::new(listener)),
        }
    }

    /// Later resolutions are ignored.
    pub(crate) fn complete(&self, result: AnimationResult) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.result.is_some() {
                return;
            }
            inner.result = Some(result);
            std::mem::take(&mut inner.listeners)
        };
        for listener in listeners {
            listener(result);
        }
    }
}

impl fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("CompletionSignal")
            .field("result", &inner.result)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}
