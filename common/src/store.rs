//! Single-threaded observable state slot.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Observer<T> = Rc<dyn Fn(&Rc<T>)>;

struct Shared<T> {
    value: RefCell<Rc<T>>,
    observers: RefCell<Vec<(u64, Observer<T>)>>,
    next_id: Cell<u64>,
    version: Cell<u64>,
}

/// Holds one value and tells every subscriber whenever it is replaced.
///
/// Clones share the same slot. Every `set` notifies, even when the new value
/// equals the old one: replacing the value is the event.
pub struct Store<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.shared.value.borrow())
            .field("version", &self.shared.version.get())
            .field("observers", &self.shared.observers.borrow().len())
            .finish()
    }
}

impl<T: 'static> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(Rc::new(initial)),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                version: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> Rc<T> {
        Rc::clone(&self.shared.value.borrow())
    }

    /// Number of replacements since creation.
    pub fn version(&self) -> u64 {
        self.shared.version.get()
    }

    pub fn observer_count(&self) -> usize {
        self.shared.observers.borrow().len()
    }

    /// Replaces the value and notifies observers in subscription order.
    ///
    /// Observers are snapshotted first, so they may call back into the
    /// store (set, subscribe, unsubscribe) while being notified.
    pub fn set(&self, value: T) {
        let value = Rc::new(value);
        *self.shared.value.borrow_mut() = Rc::clone(&value);
        self.shared.version.set(self.shared.version.get() + 1);

        let observers: Vec<Observer<T>> = self
            .shared
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer(&value);
        }
    }

    pub fn subscribe(&self, observer: impl Fn(&Rc<T>) + 'static) -> Subscription {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);
        let observer: Observer<T> = Rc::new(observer);
        self.shared.observers.borrow_mut().push((id, observer));

        let shared: Weak<Shared<T>> = Rc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.observers.borrow_mut().retain(|(other, _)| *other != id);
            }
        })
    }
}

/// Keeps an observer registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn notifies_in_subscription_order() {
        let store = Store::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = Rc::clone(&seen);
            store.subscribe(move |v| seen.borrow_mut().push(("first", **v)))
        };
        let second = {
            let seen = Rc::clone(&seen);
            store.subscribe(move |v| seen.borrow_mut().push(("second", **v)))
        };

        store.set(7);
        store.set(8);
        assert_eq!(
            *seen.borrow(),
            vec![("first", 7), ("second", 7), ("first", 8), ("second", 8)]
        );
        assert_eq!(store.version(), 2);
        assert_eq!(*store.get(), 8);
        drop((first, second));
    }

    #[test]
    fn equal_values_still_notify() {
        let store = Store::new(vec![1, 2]);
        let count = Rc::new(Cell::new(0));
        let _sub = {
            let count = Rc::clone(&count);
            store.subscribe(move |_| count.set(count.get() + 1))
        };
        store.set(vec![1, 2]);
        store.set(vec![1, 2]);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = Store::new(0);
        let count = Rc::new(Cell::new(0));
        let sub = {
            let count = Rc::clone(&count);
            store.subscribe(move |_| count.set(count.get() + 1))
        };
        assert_eq!(store.observer_count(), 1);
        drop(sub);
        assert_eq!(store.observer_count(), 0);
        store.set(1);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn observers_may_write_back() {
        let store = Store::new(0u32);
        let writer = store.clone();
        let _sub = store.subscribe(move |v| {
            if **v < 3 {
                writer.set(**v + 1);
            }
        });
        store.set(0);
        assert_eq!(*store.get(), 3);
        assert_eq!(store.version(), 4);
    }

    #[test]
    fn subscription_outliving_store_is_harmless() {
        let store = Store::new(());
        let sub = store.subscribe(|_| {});
        drop(store);
        drop(sub);
    }
}
