//! Workbook platform client library.
//!
//! Lists the workbooks a user has published on Tableau Public and downloads
//! individual workbooks to disk.
//!
//! # Architecture
//!
//! - [`listing`] - Paged enumeration of a user's workbooks
//! - [`download`] - Workbook export with format detection and streaming
//! - [`config`] - Base URL and timeout configuration shared by both clients
//! - [`workbook`] - Workbook metadata model
//!
//! The listing and download clients share no state; callers feed
//! [`Workbook::repository_id`] values from one into the other.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
mod http_client;
pub mod listing;
pub(crate) mod user_agent;
pub mod workbook;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL};
pub use download::{DownloadError, DownloadedWorkbook, WorkbookDownloader, WorkbookFormat};
pub use listing::{ListError, ListErrorKind, PAGE_SIZE, WorkbookLister};
pub use workbook::Workbook;
