use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::{Signal, SubId};

/// Reentrant busy counter.
///
/// Every tracked operation increments the counter when it starts and
/// decrements it when it ends, so nested or parallel operations compose:
/// the tracker reports busy while the counter is above zero. Clones share
/// the same counter.
#[derive(Clone, Default)]
pub struct Loading {
    count: Signal<usize>,
}

impl fmt::Debug for Loading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loading")
            .field("count", &self.count())
            .finish()
    }
}

impl Loading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.count() > 0
    }

    /// Number of operations currently in flight.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Marks one operation as started. The returned guard ends it on drop.
    pub fn begin(&self) -> LoadingGuard {
        self.count.update(|c| *c += 1);
        LoadingGuard {
            count: self.count.clone(),
        }
    }

    /// Tracks `fut` for as long as it runs.
    ///
    /// The counter is incremented immediately, before `fut` is first polled,
    /// and decremented once `fut` completes or the returned future is dropped.
    /// The output of `fut` is passed through untouched.
    pub fn show_until<F: Future>(&self, fut: F) -> impl Future<Output = F::Output> + use<F> {
        let guard = self.begin();
        async move {
            let _guard = guard;
            fut.await
        }
    }

    /// Calls `f` whenever the busy flag flips.
    pub fn subscribe(&self, f: impl Fn(bool) + 'static) -> SubId {
        let last = Rc::new(Cell::new(self.is_loading()));
        self.count.subscribe(move |c| {
            let busy = *c > 0;
            if last.replace(busy) != busy {
                f(busy);
            }
        })
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.count.unsubscribe(id)
    }
}

/// Ends one tracked operation when dropped.
#[must_use = "the operation is considered finished as soon as the guard is dropped"]
pub struct LoadingGuard {
    count: Signal<usize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.count.update(|c| *c = c.saturating_sub(1));
    }
}
