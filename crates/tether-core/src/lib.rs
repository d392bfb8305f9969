//! # Signals, Dispose handles, and Loading
//!
//! Tether keeps UI-facing state in a few small reactive pieces:
//!
//! - `Signal<T>` — observable, cloneable value cell.
//! - `Dispose` — run-once cleanup returned by watchers.
//! - `Loading` — reentrant busy counter shared between async operations.
//!
//! ## Signals
//!
//! ```rust
//! use tether_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Subscribers are registered explicitly; there is no ambient dependency
//! tracking. A subscriber receives a snapshot of the new value and may read
//! or write other signals (including the one that notified it).
//!
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//! use tether_core::*;
//!
//! let page = signal(1usize);
//! let seen = Rc::new(Cell::new(0));
//! let stop = page.watch({
//!     let seen = seen.clone();
//!     move |p| seen.set(*p)
//! });
//!
//! page.set(4);
//! assert_eq!(seen.get(), 4);
//!
//! stop.run();
//! page.set(5);
//! assert_eq!(seen.get(), 4);
//! ```
//!
//! ## Loading
//!
//! `Loading::show_until` wraps a future: the counter goes up before the
//! future starts and comes back down once it settles, fails, or is dropped.
//! `is_loading()` is true while any wrapped operation is still running.

pub mod effects;
pub mod loading;
pub mod signal;

pub mod tests;

pub use effects::*;
pub use loading::*;
pub use signal::*;
