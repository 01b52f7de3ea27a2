use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;

/// Trailing-edge debounce: only the last call within `wait_ms` runs.
///
/// Each call replaces the pending timer; dropping a gloo `Timeout` cancels it.
#[derive(Clone)]
pub struct Debouncer {
    wait_ms: u32,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn call<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        let timeout = Timeout::new(self.wait_ms, callback);
        // A timer that already fired stays in the slot until replaced here
        self.pending.replace(Some(timeout));
    }

    pub fn cancel(&self) {
        self.pending.replace(None);
    }
}
