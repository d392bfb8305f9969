//! # Pagination
//!
//! `Pagination<T>` pages through a [`Source`]: either an in-memory
//! collection that is sliced on demand, or an async function that fetches
//! `(page, size)` from somewhere else.
//!
//! ```rust
//! use tether_pagination::*;
//!
//! let pages = Pagination::new(vec![1, 2, 3, 4, 5, 6, 7], PaginationOptions::default())?;
//! pollster::block_on(pages.settle())?;
//! assert_eq!(pages.items(), vec![1, 2, 3]);
//! assert_eq!(pages.count(), 3);
//!
//! pages.next();
//! pollster::block_on(pages.settle())?;
//! assert_eq!(pages.items(), vec![4, 5, 6]);
//! # Ok::<(), PaginationError>(())
//! ```
//!
//! ## Requested vs. settled
//!
//! `page()`, `size()`, `items()` and `total()` always describe the last
//! fetch that was applied. Mutators such as `set_page`, `set_size` and `next`
//! only change the *requested* page/size; a watcher registered on that
//! request schedules a fetch, and `settle()` runs it. `refresh()` re-reads
//! the settled page, `append()` fetches the following one and concatenates
//! it for infinite lists.
//!
//! Every request carries a token. A result whose token is no longer the
//! latest is discarded, so a slow response can never overwrite a newer one.
//!
//! ## Loading
//!
//! Fetches from a paged source run under a [`tether_core::Loading`] tracker.
//! Pass your own with [`Pagination::with_loading`] to share one busy flag
//! between several controllers.

pub mod error;
pub mod navigation;
pub mod options;
pub mod pagination;
pub mod source;
pub mod state;


pub use error::{PaginationError, Result};
pub use navigation::{NavFlags, Navigation, page_count};
pub use options::{PaginationOptions, Params};
pub use pagination::{Pagination, Phase};
pub use source::{PageFuture, PagedResult, Source, slice};
pub use state::PaginationState;
