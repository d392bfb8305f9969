use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use tether_core::Loading;
use web_time::Instant;

use crate::error::{PaginationError, Result};
use crate::options::Params;

/// One page as delivered by a source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub size: usize,
    /// Size of the whole collection, not of this page.
    pub total: usize,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, page: usize, size: usize, total: usize) -> Self {
        Self {
            items,
            page,
            size,
            total,
        }
    }

    pub fn params(&self) -> Params {
        Params::new(self.page, self.size)
    }

    fn validate(&self) -> Result<()> {
        let reason = if self.page == 0 {
            "page must be at least 1"
        } else if self.size == 0 {
            "size must be at least 1"
        } else if self.items.len() > self.size {
            "more items than the page size"
        } else if self.items.len() > self.total {
            "more items than the reported total"
        } else {
            return Ok(());
        };
        Err(PaginationError::MalformedResult {
            page: self.page,
            size: self.size,
            items: self.items.len(),
            reason,
        })
    }
}

pub type PageFuture<T> = Pin<Box<dyn Future<Output = anyhow::Result<PagedResult<T>>>>>;

type PageFn<T> = dyn Fn(usize, usize) -> PageFuture<T>;

/// Where pages come from.
///
/// `Static` owns an immutable copy of the collection and is sliced in memory.
/// `Paged` calls back into the caller with `(page, size)`; the controller only
/// holds a shared handle to the function.
pub enum Source<T: 'static> {
    Static(Rc<[T]>),
    Paged(Rc<PageFn<T>>),
}

impl<T: 'static> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(items) => Self::Static(items.clone()),
            Self::Paged(f) => Self::Paged(f.clone()),
        }
    }
}

impl<T: 'static> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(items) => f.debug_struct("Static").field("len", &items.len()).finish(),
            Self::Paged(_) => f.write_str("Paged(..)"),
        }
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Source<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Clone + 'static> Source<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::Static(items.into())
    }

    pub fn paged<F, Fut>(f: F) -> Self
    where
        F: Fn(usize, usize) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<PagedResult<T>>> + 'static,
    {
        Self::Paged(Rc::new(move |page, size| -> PageFuture<T> {
            Box::pin(f(page, size))
        }))
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }

    /// Fetches one page.
    ///
    /// Paged sources run under `loading` and their answer is checked before it
    /// is handed back; static slicing never suspends and is not tracked.
    pub(crate) async fn execute(&self, params: Params, loading: &Loading) -> Result<PagedResult<T>> {
        match self {
            Self::Static(items) => Ok(slice(items, params)),
            Self::Paged(fetch) => {
                let started = Instant::now();
                let data = loading.show_until(fetch(params.page, params.size)).await?;
                log::debug!(
                    "pagination: page {} (size {}) fetched in {:?}",
                    params.page,
                    params.size,
                    started.elapsed()
                );
                data.validate()?;
                Ok(data)
            }
        }
    }
}

/// Zero-based `[(page - 1) * size, page * size)` clipped to `items`; `total`
/// is always the full length.
pub fn slice<T: Clone>(items: &[T], params: Params) -> PagedResult<T> {
    let len = items.len();
    let start = params.page.saturating_sub(1).saturating_mul(params.size).min(len);
    let end = params.page.saturating_mul(params.size).min(len);
    PagedResult {
        items: items[start..end].to_vec(),
        page: params.page,
        size: params.size,
        total: len,
    }
}
