use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::Dispose;

new_key_type! {
    /// Subscription handle returned by [`Signal::subscribe`].
    pub struct SubId;
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T: 'static> {
    value: T,
    subs: SlotMap<SubId, Subscriber<T>>,
}

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Default + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("Signal")
            .field("value", &inner.value)
            .field("subscribers", &inner.subs.len())
            .finish()
    }
}

impl<T: 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: SlotMap::with_key(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        self.0.borrow_mut().subs.insert(Rc::new(f))
    }

    /// Returns false if `id` was already removed.
    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.0.borrow_mut().subs.remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }

    /// Like `subscribe`, but the returned `Dispose` removes the subscriber.
    /// The handle does not keep the signal alive.
    pub fn watch(&self, f: impl Fn(&T) + 'static) -> Dispose {
        let id = self.subscribe(f);
        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.0);
        Dispose::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().subs.remove(id);
            }
        })
    }
}

impl<T: Clone + 'static> Signal<T> {
    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    /// Stores `v` and notifies only when it differs from the current value.
    /// Returns whether a change happened.
    pub fn set_if_changed(&self, v: T) -> bool
    where
        T: PartialEq,
    {
        {
            let mut inner = self.0.borrow_mut();
            if inner.value == v {
                return false;
            }
            inner.value = v;
        }
        self.notify();
        true
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    // Subscribers get a snapshot and run with no borrow held, so they are
    // free to touch this signal again.
    fn notify(&self) {
        let (value, subs) = {
            let inner = self.0.borrow();
            if inner.subs.is_empty() {
                return;
            }
            let subs: SmallVec<[Subscriber<T>; 4]> = inner.subs.values().cloned().collect();
            (inner.value.clone(), subs)
        };
        log::trace!("signal: notifying {} subscriber(s)", subs.len());
        for s in &subs {
            s(&value);
        }
    }
}

pub fn signal<T: 'static>(t: T) -> Signal<T> {
    Signal::new(t)
}
