use crate::navigation::Navigation;
use crate::options::Params;
use crate::source::PagedResult;

/// What is currently materialized and visible to readers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaginationState<T> {
    pub page: usize,
    pub size: usize,
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> PaginationState<T> {
    /// Nothing loaded yet, positioned at `params`.
    pub fn empty(params: Params) -> Self {
        Self {
            page: params.page,
            size: params.size,
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn params(&self) -> Params {
        Params::new(self.page, self.size)
    }

    pub fn navigation(&self) -> Navigation {
        Navigation::derive(self.page, self.size, self.total)
    }
}

impl<T> From<PagedResult<T>> for PaginationState<T> {
    fn from(data: PagedResult<T>) -> Self {
        Self {
            page: data.page,
            size: data.size,
            items: data.items,
            total: data.total,
        }
    }
}
