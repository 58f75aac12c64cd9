//! Event-loop abstraction: a clock plus cancellable one-shot timers.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

pub trait TimerHost: 'static {
    /// Dropping the handle cancels the timer if it has not fired yet.
    type Handle: 'static;

    /// Monotonic milliseconds.
    fn now_ms(&self) -> f64;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

struct Pending {
    id: u64,
    due: f64,
    callback: Box<dyn FnOnce()>,
}

type Queue = Rc<RefCell<Vec<Pending>>>;

/// Virtual clock that only moves when told to. Timers fire in due order
/// (ties in scheduling order) while [`ManualHost::advance`] walks the clock.
#[derive(Default)]
pub struct ManualHost {
    now: Cell<f64>,
    next_id: Cell<u64>,
    queue: Queue,
}

pub struct ManualHandle {
    id: u64,
    queue: Weak<RefCell<Vec<Pending>>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().retain(|pending| pending.id != self.id);
        }
    }
}

impl fmt::Debug for ManualHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualHandle").field("id", &self.id).finish()
    }
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Moves the clock forward by `ms`, firing every timer that comes due.
    /// Returns how many fired.
    pub fn advance(&self, ms: f64) -> usize {
        let target = self.now.get() + ms;
        let mut fired = 0;
        while let Some(pending) = self.pop_due(target) {
            self.now.set(pending.due.max(self.now.get()));
            (pending.callback)();
            fired += 1;
        }
        self.now.set(target);
        fired
    }

    fn pop_due(&self, target: f64) -> Option<Pending> {
        let mut queue = self.queue.borrow_mut();
        let index = queue
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.due <= target)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(index, _)| index)?;
        Some(queue.remove(index))
    }
}

impl fmt::Debug for ManualHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualHost")
            .field("now", &self.now.get())
            .field("pending", &self.pending())
            .finish()
    }
}

impl TimerHost for ManualHost {
    type Handle = ManualHandle;

    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.queue.borrow_mut().push(Pending {
            id,
            due: self.now.get() + f64::from(delay_ms),
            callback,
        });
        ManualHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }
}
