use crate::error::{PaginationError, Result};

/// Construction-time configuration of a [`Pagination`](crate::Pagination).
///
/// With the `serde` feature, missing fields fall back to the defaults, so a
/// partial configuration merges over [`PaginationOptions::default`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PaginationOptions {
    /// Initial page, 1-based.
    pub page: usize,
    /// Initial page size.
    pub size: usize,
    /// Page sizes offered to the user, in display order.
    pub sizes: Vec<usize>,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page: 1,
            size: 3,
            sizes: vec![3, 5, 10],
        }
    }
}

impl PaginationOptions {
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_page(self.page)?;
        check_size(self.size)?;
        check_sizes(&self.sizes)
    }

    pub fn params(&self) -> Params {
        Params {
            page: self.page,
            size: self.size,
        }
    }
}

/// A `(page, size)` pair: what a caller asks for, or what is settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Params {
    pub page: usize,
    pub size: usize,
}

impl Params {
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }
}

pub(crate) fn check_page(page: usize) -> Result<()> {
    if page == 0 {
        return Err(PaginationError::config("page is 1-based and must be at least 1"));
    }
    Ok(())
}

pub(crate) fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(PaginationError::config("page size must be at least 1"));
    }
    Ok(())
}

pub(crate) fn check_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.contains(&0) {
        return Err(PaginationError::config("offered page sizes must all be at least 1"));
    }
    Ok(())
}
