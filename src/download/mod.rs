//! Workbook export downloads.
//!
//! The export endpoint always labels its response with the single-file
//! workbook media type; whether the body is a plain `.twb` or a packaged
//! `.twbx` is only visible in `Content-Disposition`.
//!
//! # Features
//!
//! - Existence check on `Content-Type`, reported as [`DownloadError::NotFound`]
//! - Extension inference from `Content-Disposition`
//! - Streaming body writes (memory-efficient for large packaged workbooks)
//! - Partial files removed when the transfer fails
//!
//! # Example
//!
//! ```no_run
//! use workbook_dl::download::WorkbookDownloader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = WorkbookDownloader::new()?;
//! let path = downloader
//!     .download_workbook("SalesDashboard", Path::new("./workbooks"))
//!     .await?;
//! println!("Downloaded: {}", path.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod format;

pub use client::{DownloadedWorkbook, WorkbookDownloader};
pub use error::DownloadError;
pub use format::{WORKBOOK_MEDIA_TYPE, WorkbookFormat, is_workbook_media_type};
