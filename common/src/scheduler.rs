//! Self-sustaining perturbation loop.
//!
//! Every dataset change (its own writes included) re-arms a one-shot timer;
//! when that timer fires the dataset is perturbed and written back, which
//! arms the next one. At most one timer is pending at any time.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::config::Extent;
use crate::jitter::{perturb, Jitter};
use crate::point::Point;
use crate::store::{Store, Subscription};
use crate::timer::TimerHost;

enum TimerState<T> {
    /// A timer is armed; dropping the handle clears it.
    Idle(T),
    Cancelled,
}

struct Inner<H: TimerHost> {
    host: Rc<H>,
    store: Store<Vec<Point>>,
    jitter: RefCell<Box<dyn Jitter>>,
    x_extent: Extent,
    y_extent: Extent,
    delay_ms: u32,
    state: RefCell<TimerState<H::Handle>>,
    stopped: Cell<bool>,
    ticks: Cell<u64>,
    subscription: RefCell<Option<Subscription>>,
}

pub struct PerturbationScheduler<H: TimerHost> {
    inner: Rc<Inner<H>>,
}

impl<H: TimerHost> PerturbationScheduler<H> {
    /// Subscribes to `store` and arms the first timer right away, so the loop
    /// runs even before any data arrives.
    pub fn start(
        host: Rc<H>,
        store: Store<Vec<Point>>,
        jitter: Box<dyn Jitter>,
        x_extent: Extent,
        y_extent: Extent,
        delay_ms: u32,
    ) -> Self {
        let inner = Rc::new(Inner {
            host,
            store: store.clone(),
            jitter: RefCell::new(jitter),
            x_extent,
            y_extent,
            delay_ms,
            state: RefCell::new(TimerState::Cancelled),
            stopped: Cell::new(false),
            ticks: Cell::new(0),
            subscription: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let subscription = store.subscribe(move |_| {
            if let Some(inner) = weak.upgrade() {
                Inner::arm(&inner);
            }
        });
        *inner.subscription.borrow_mut() = Some(subscription);
        Inner::arm(&inner);

        Self { inner }
    }

    pub fn is_armed(&self) -> bool {
        matches!(*self.inner.state.borrow(), TimerState::Idle(_))
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.get()
    }

    /// Perturbation steps applied so far.
    pub fn ticks(&self) -> u64 {
        self.inner.ticks.get()
    }

    /// Clears the pending timer and stops listening. Idempotent.
    pub fn cancel(&self) {
        if self.inner.stopped.replace(true) {
            return;
        }
        self.inner.subscription.borrow_mut().take();
        let pending = self.inner.state.replace(TimerState::Cancelled);
        drop(pending);
        debug!(ticks = self.ticks(), "perturbation loop cancelled");
    }
}

impl<H: TimerHost> Drop for PerturbationScheduler<H> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<H: TimerHost> Inner<H> {
    fn arm(this: &Rc<Self>) {
        if this.stopped.get() {
            return;
        }
        // Clear the previous timer before arming the next one.
        let previous = this.state.replace(TimerState::Cancelled);
        drop(previous);

        let weak: Weak<Self> = Rc::downgrade(this);
        let handle = this.host.schedule(
            this.delay_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Inner::fire(&inner);
                }
            }),
        );
        *this.state.borrow_mut() = TimerState::Idle(handle);
    }

    fn fire(this: &Rc<Self>) {
        if this.stopped.get() {
            return;
        }
        let fired = this.state.replace(TimerState::Cancelled);
        drop(fired);

        let current = this.store.get();
        let next = {
            let mut jitter = this.jitter.borrow_mut();
            perturb(&current, &mut **jitter, this.x_extent, this.y_extent)
        };
        let tick = this.ticks.get() + 1;
        this.ticks.set(tick);
        debug!(tick, points = next.len(), "perturbing dataset");

        this.store.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualHost;
    use pretty_assertions::assert_eq;

    const X: Extent = Extent::new(0.0, 50.0);
    const Y: Extent = Extent::new(0.0, 400.0);

    fn start(
        host: &Rc<ManualHost>,
        store: &Store<Vec<Point>>,
    ) -> PerturbationScheduler<ManualHost> {
        PerturbationScheduler::start(
            Rc::clone(host),
            store.clone(),
            Box::new(|| 1.0),
            X,
            Y,
            1500,
        )
    }

    #[test]
    fn arms_immediately_and_fires_after_delay() {
        let host = Rc::new(ManualHost::new());
        let store = Store::new(vec![Point::new("B", 25.0, 200.0)]);
        let scheduler = start(&host, &store);

        assert!(scheduler.is_armed());
        assert_eq!(host.pending(), 1);

        host.advance(1499.0);
        assert_eq!(scheduler.ticks(), 0);
        host.advance(1.0);
        assert_eq!(scheduler.ticks(), 1);
        assert_eq!(*store.get(), vec![Point::new("B", 26.0, 201.0)]);

        assert!(scheduler.is_armed());
        assert_eq!(host.pending(), 1);
    }

    #[test]
    fn loop_sustains_itself() {
        let host = Rc::new(ManualHost::new());
        let store = Store::new(vec![Point::new("B", 25.0, 200.0)]);
        let scheduler = start(&host, &store);

        host.advance(1500.0 * 4.0);
        assert_eq!(scheduler.ticks(), 4);
        assert_eq!(store.get()[0].x, 29.0);
        assert_eq!(host.pending(), 1);
    }

    #[test]
    fn external_write_rearms_without_overlap() {
        let host = Rc::new(ManualHost::new());
        let store = Store::new(Vec::new());
        let scheduler = start(&host, &store);

        host.advance(1000.0);
        store.set(vec![Point::new("B", 25.0, 200.0)]);
        assert_eq!(host.pending(), 1);

        // The timer armed at t=0 was cleared; the next fire is at t=2500.
        host.advance(1000.0);
        assert_eq!(scheduler.ticks(), 0);
        host.advance(500.0);
        assert_eq!(scheduler.ticks(), 1);
    }

    #[test]
    fn empty_dataset_loops_harmlessly() {
        let host = Rc::new(ManualHost::new());
        let store = Store::new(Vec::new());
        let scheduler = start(&host, &store);

        host.advance(4500.0);
        assert_eq!(scheduler.ticks(), 3);
        assert!(store.get().is_empty());
    }

    #[test]
    fn cancel_clears_pending_timer_and_ignores_changes() {
        let host = Rc::new(ManualHost::new());
        let store = Store::new(vec![Point::new("B", 25.0, 200.0)]);
        let scheduler = start(&host, &store);

        scheduler.cancel();
        assert!(scheduler.is_stopped());
        assert!(!scheduler.is_armed());
        assert_eq!(host.pending(), 0);
        assert_eq!(store.observer_count(), 0);

        let version = store.version();
        store.set(vec![Point::new("B", 30.0, 250.0)]);
        host.advance(10_000.0);
        assert_eq!(store.version(), version + 1);
        assert_eq!(scheduler.ticks(), 0);
    }

    #[test]
    fn dropping_scheduler_cancels() {
        let host = Rc::new(ManualHost::new());
        let store = Store::new(vec![Point::new("B", 25.0, 200.0)]);
        drop(start(&host, &store));
        assert_eq!(host.pending(), 0);
        host.advance(3000.0);
        assert_eq!(store.version(), 0);
    }
}
