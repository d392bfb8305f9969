use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};

use tether_core::{Dispose, Loading, Signal, SubId, signal};

use crate::error::Result;
use crate::navigation::Navigation;
use crate::options::{PaginationOptions, Params, check_page, check_size, check_sizes};
use crate::source::{PagedResult, Source};
use crate::state::PaginationState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
}

#[derive(Clone, Copy, Debug)]
struct Request {
    params: Params,
    token: u64,
}

#[derive(Clone, Copy, Debug)]
enum Apply {
    Replace,
    Append,
}

struct Inner<T: 'static> {
    source: Source<T>,
    loading: Loading,
    sizes: Signal<Vec<usize>>,
    requested: Signal<Params>,
    state: Signal<PaginationState<T>>,
    /// Whether any result has been applied yet.
    settled: Cell<bool>,
    /// Most recently issued request token. Only a fetch carrying this token
    /// may touch `state`.
    latest: Cell<u64>,
    scheduled: Cell<Option<Request>>,
    in_flight: Cell<usize>,
}

/// Paginated view over a [`Source`].
///
/// Mutators (`set_page`, `next`, ...) only stage a request; the fetch that
/// materializes it runs when the owner awaits [`settle`](Self::settle).
/// `refresh` and `append` fetch directly. Results are applied atomically and
/// only if no newer request was issued in the meantime; older results are
/// dropped.
///
/// Clones are handles to the same controller. There is no timeout: a paged
/// source that never resolves keeps the controller in [`Phase::Fetching`]
/// and the loading tracker busy until the awaiting future is dropped.
pub struct Pagination<T: 'static> {
    inner: Rc<Inner<T>>,
}

impl<T: 'static> Clone for Pagination<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Pagination<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagination")
            .field("source", &self.inner.source)
            .field("requested", &self.inner.requested.with(|r| *r))
            .field("state", &self.inner.state)
            .field("latest", &self.inner.latest.get())
            .finish()
    }
}

impl<T: Clone + 'static> Pagination<T> {
    pub fn new(source: impl Into<Source<T>>, options: PaginationOptions) -> Result<Self> {
        Self::with_loading(source, options, Loading::new())
    }

    /// Like `new`, but reports fetches through a caller-provided tracker,
    /// which may be shared with other operations.
    pub fn with_loading(
        source: impl Into<Source<T>>,
        options: PaginationOptions,
        loading: Loading,
    ) -> Result<Self> {
        options.validate()?;
        let initial = options.params();
        let inner = Rc::new(Inner {
            source: source.into(),
            loading,
            sizes: signal(options.sizes),
            requested: signal(initial),
            state: signal(PaginationState::empty(initial)),
            settled: Cell::new(false),
            latest: Cell::new(0),
            scheduled: Cell::new(None),
            in_flight: Cell::new(0),
        });

        let weak: Weak<Inner<T>> = Rc::downgrade(&inner);
        inner.requested.subscribe(move |params| {
            if let Some(inner) = weak.upgrade() {
                inner.on_requested(*params);
            }
        });
        inner.schedule(initial);

        Ok(Self { inner })
    }

    // ---- settled state ----

    pub fn page(&self) -> usize {
        self.inner.state.with(|s| s.page)
    }

    pub fn size(&self) -> usize {
        self.inner.state.with(|s| s.size)
    }

    pub fn total(&self) -> usize {
        self.inner.state.with(|s| s.total)
    }

    pub fn items(&self) -> Vec<T> {
        self.inner.state.with(|s| s.items.clone())
    }

    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.inner.state.with(|s| f(&s.items))
    }

    pub fn state(&self) -> PaginationState<T> {
        self.inner.state.get()
    }

    /// True once any fetch has been applied.
    pub fn is_settled(&self) -> bool {
        self.inner.settled.get()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.inner.sizes.get()
    }

    /// The page/size last asked for; may be ahead of the settled state.
    pub fn requested(&self) -> Params {
        self.inner.requested.get()
    }

    // ---- navigation ----

    pub fn navigation(&self) -> Navigation {
        self.inner.state.with(PaginationState::navigation)
    }

    pub fn count(&self) -> usize {
        self.navigation().count
    }

    pub fn has_pages(&self) -> bool {
        self.navigation().has_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.navigation().has_prev()
    }

    pub fn has_next(&self) -> bool {
        self.navigation().has_next()
    }

    pub fn is_first(&self) -> bool {
        self.navigation().is_first()
    }

    pub fn is_last(&self) -> bool {
        self.navigation().is_last()
    }

    // ---- loading ----

    pub fn is_loading(&self) -> bool {
        self.inner.loading.is_loading()
    }

    pub fn loading(&self) -> &Loading {
        &self.inner.loading
    }

    pub fn phase(&self) -> Phase {
        if self.inner.in_flight.get() > 0 {
            Phase::Fetching
        } else {
            Phase::Idle
        }
    }

    // ---- observation ----

    /// Called with the new settled state after every applied fetch.
    pub fn subscribe(&self, f: impl Fn(&PaginationState<T>) + 'static) -> SubId {
        self.inner.state.subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.inner.state.unsubscribe(id)
    }

    pub fn watch(&self, f: impl Fn(&PaginationState<T>) + 'static) -> Dispose {
        self.inner.state.watch(f)
    }

    // ---- requests ----

    /// Stages `page` at the settled size.
    pub fn set_page(&self, page: usize) -> Result<()> {
        check_page(page)?;
        self.request(Params::new(page, self.size()));
        Ok(())
    }

    /// Stages `size`. A size other than the settled one goes back to page 1,
    /// the settled size keeps the settled page.
    pub fn set_size(&self, size: usize) -> Result<()> {
        check_size(size)?;
        let settled = self.inner.state.with(PaginationState::params);
        let page = if size != settled.size {
            1
        } else {
            settled.page
        };
        self.request(Params::new(page, size));
        Ok(())
    }

    pub fn set_sizes(&self, sizes: Vec<usize>) -> Result<()> {
        check_sizes(&sizes)?;
        self.inner.sizes.set(sizes);
        Ok(())
    }

    pub fn prev(&self) {
        if self.has_prev() {
            let settled = self.inner.state.with(PaginationState::params);
            self.request(Params::new(settled.page - 1, settled.size));
        }
    }

    pub fn next(&self) {
        if self.has_next() {
            let settled = self.inner.state.with(PaginationState::params);
            self.request(Params::new(settled.page + 1, settled.size));
        }
    }

    pub fn first(&self) {
        let size = self.size();
        self.request(Params::new(1, size));
    }

    /// Stages the last page, or page 1 when there are no pages.
    pub fn last(&self) {
        let size = self.size();
        self.request(Params::new(self.count().max(1), size));
    }

    // Every mutator ends up here; the propagator decides whether to fetch.
    fn request(&self, params: Params) {
        if !self.inner.requested.set_if_changed(params) {
            log::trace!(
                "pagination: page {} (size {}) already requested",
                params.page,
                params.size
            );
        }
    }

    // ---- fetching ----

    /// Runs the fetch scheduled by the last change of the requested
    /// page/size, if any, and applies its result.
    ///
    /// If that fetch fails and nothing newer was requested meanwhile, it stays
    /// scheduled and the next call retries it.
    pub async fn settle(&self) -> Result<()> {
        while let Some(request) = self.inner.scheduled.take() {
            if request.token != self.inner.latest.get() {
                log::debug!(
                    "pagination: request #{} superseded before it started",
                    request.token
                );
                continue;
            }
            if let Err(err) = self.inner.run(request, Apply::Replace).await {
                if request.token == self.inner.latest.get() {
                    self.inner.scheduled.set(Some(request));
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Whether a staged request is waiting for [`settle`](Self::settle).
    pub fn has_scheduled(&self) -> bool {
        let scheduled = self.inner.scheduled.get();
        scheduled.is_some_and(|r| r.token == self.inner.latest.get())
    }

    /// Fetches the settled page again and replaces the items with it.
    ///
    /// A staged but unsettled request is dropped.
    pub async fn refresh(&self) -> Result<()> {
        self.inner.drop_staged();
        let params = self.inner.state.with(PaginationState::params);
        let request = self.inner.issue(params);
        self.inner.run(request, Apply::Replace).await
    }

    /// Fetches the page after the settled one and appends its items.
    ///
    /// Before anything has settled the requested page itself is fetched.
    /// A staged but unsettled request is dropped.
    pub async fn append(&self) -> Result<()> {
        self.inner.drop_staged();
        let settled = self.inner.state.with(PaginationState::params);
        let page = if self.inner.settled.get() {
            settled.page + 1
        } else {
            settled.page
        };
        let request = self.inner.issue(Params::new(page, settled.size));
        self.inner.run(request, Apply::Append).await
    }
}

impl<T: Clone + 'static> Inner<T> {
    fn issue(&self, params: Params) -> Request {
        let token = self.latest.get() + 1;
        self.latest.set(token);
        Request { params, token }
    }

    fn schedule(&self, params: Params) {
        let request = self.issue(params);
        log::debug!(
            "pagination: scheduled page {} (size {}) as request #{}",
            params.page,
            params.size,
            request.token
        );
        self.scheduled.set(Some(request));
    }

    fn drop_staged(&self) {
        let settled = self.state.with(PaginationState::params);
        self.requested.set_if_changed(settled);
        self.scheduled.set(None);
    }

    fn on_requested(&self, params: Params) {
        let at_settled = self.settled.get() && self.state.with(|s| s.params() == params);
        if at_settled {
            // Back where we already are: nothing to fetch, and anything still
            // in flight is now stale.
            self.issue(params);
            self.scheduled.set(None);
            return;
        }
        self.schedule(params);
    }

    async fn run(&self, request: Request, apply: Apply) -> Result<()> {
        let _flight = FlightGuard::enter(&self.in_flight);
        let data = self.source.execute(request.params, &self.loading).await?;
        if request.token != self.latest.get() {
            log::debug!(
                "pagination: dropping stale page {} from request #{} (latest #{})",
                data.page,
                request.token,
                self.latest.get()
            );
            return Ok(());
        }
        self.apply(data, apply);
        Ok(())
    }

    fn apply(&self, data: PagedResult<T>, apply: Apply) {
        let params = data.params();
        log::debug!(
            "pagination: settled page {} (size {}), {} item(s) of {}",
            data.page,
            data.size,
            data.items.len(),
            data.total
        );
        self.settled.set(true);
        let issued = self.latest.get();
        self.state.update(move |state| match apply {
            Apply::Replace => *state = data.into(),
            Apply::Append => {
                state.items.extend(data.items);
                state.page = data.page;
                state.size = data.size;
                state.total = data.total;
            }
        });
        // Keep the requested projection in line with what is shown, unless a
        // state subscriber already asked for something else.
        if self.latest.get() == issued {
            self.requested.set_if_changed(params);
        }
    }
}

struct FlightGuard<'a>(&'a Cell<usize>);

impl<'a> FlightGuard<'a> {
    fn enter(count: &'a Cell<usize>) -> Self {
        count.set(count.get() + 1);
        Self(count)
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}
