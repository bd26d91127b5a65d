//! Enumeration of a user's published workbooks.
//!
//! The listing endpoint is paged; [`WorkbookLister`] walks the pages until
//! the server returns a short one.
//!
//! # Paging protocol
//!
//! - Each request asks for [`PAGE_SIZE`] workbooks starting at `index`.
//! - `index` is the running total of workbooks received, so pages of
//!   unexpected length never skip or repeat records.
//! - Every request carries a `no_cache` timestamp to defeat caching.
//! - A failure on any page aborts with a [`ListError`] that keeps the
//!   records already received.

mod client;
mod error;

pub use client::{PAGE_SIZE, WorkbookLister};
pub use error::{ListError, ListErrorKind};
