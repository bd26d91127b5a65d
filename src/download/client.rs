//! HTTP client for exporting workbooks to disk.
//!
//! This module provides the `WorkbookDownloader` struct which requests a
//! workbook export, checks that the platform actually served a workbook, and
//! streams the body into `destination_dir/repository_id.ext`.

use std::path::{Component, Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderName};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};
use url::Url;

use super::error::DownloadError;
use super::format::{WorkbookFormat, is_workbook_media_type};
use crate::config::{ClientConfig, ConfigError};
use crate::http_client::build_http_client;

/// Export format requested from the platform; packaged workbooks still answer it.
const EXPORT_FORMAT: &str = "twb";

/// Result of a successful workbook download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedWorkbook {
    /// Output path as constructed from the destination directory.
    pub path: PathBuf,
    /// Container format inferred from the response headers.
    pub format: WorkbookFormat,
    /// Bytes written to `path`.
    pub bytes_written: u64,
}

/// Client for the workbook export endpoint.
///
/// Create once and reuse; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use workbook_dl::WorkbookDownloader;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let downloader = WorkbookDownloader::new()?;
/// match downloader.download_workbook("SalesDashboard", Path::new("./workbooks")).await {
///     Ok(path) => println!("Downloaded to: {}", path.display()),
///     Err(e) if e.is_not_found() => println!("no such workbook"),
///     Err(e) => return Err(e.into()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WorkbookDownloader {
    client: Client,
    base_url: Url,
}

impl WorkbookDownloader {
    /// Creates a downloader for the production platform with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a downloader from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an invalid configuration.
    pub fn with_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = build_http_client(config)?;
        let base_url = config.parsed_base_url()?;
        Ok(Self { client, base_url })
    }

    /// Downloads a workbook into `destination_dir` and returns the file path.
    ///
    /// The file is named after `repository_id` with a `.twb` or `.twbx`
    /// extension; an existing file at that path is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::NotFound`] when the server does not answer
    /// with a workbook, and other [`DownloadError`] variants for transport or
    /// file system failures.
    #[must_use = "download result contains the path to the downloaded file"]
    pub async fn download_workbook(
        &self,
        repository_id: &str,
        destination_dir: &Path,
    ) -> Result<PathBuf, DownloadError> {
        Ok(self
            .download_workbook_with_metadata(repository_id, destination_dir)
            .await?
            .path)
    }

    /// Downloads a workbook and returns its path, format and size on disk.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`download_workbook`](Self::download_workbook).
    #[must_use = "download result contains path and format metadata"]
    #[instrument(skip(self), fields(repository_id = %repository_id))]
    pub async fn download_workbook_with_metadata(
        &self,
        repository_id: &str,
        destination_dir: &Path,
    ) -> Result<DownloadedWorkbook, DownloadError> {
        check_file_name(repository_id)?;
        let url = self.export_url(repository_id)?;
        debug!(url = %url, "requesting workbook export");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DownloadError::from_reqwest(url.as_str(), e))?;

        let content_type = header_str(response.headers(), &CONTENT_TYPE).unwrap_or("");
        if !is_workbook_media_type(content_type) {
            debug!(
                status = response.status().as_u16(),
                content_type, "export did not return a workbook"
            );
            return Err(DownloadError::not_found(repository_id, content_type));
        }

        let format = WorkbookFormat::from_content_disposition(header_str(
            response.headers(),
            &CONTENT_DISPOSITION,
        ));
        let path = destination_dir.join(format!("{repository_id}{}", format.extension()));
        debug!(path = %path.display(), %format, "resolved output path");

        let mut file = File::create(&path)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;

        let stream_result = stream_to_file(&mut file, response, url.as_str(), &path).await;
        drop(file);

        let bytes_written = match stream_result {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(path = %path.display(), "removing partial file after error");
                let _ = tokio::fs::remove_file(&path).await;
                return Err(error);
            }
        };

        info!(
            path = %path.display(),
            bytes = bytes_written,
            %format,
            "workbook downloaded"
        );

        Ok(DownloadedWorkbook {
            path,
            format,
            bytes_written,
        })
    }

    /// Builds `{base}/workbooks/{repository_id}?format=twb`.
    fn export_url(&self, repository_id: &str) -> Result<Url, DownloadError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DownloadError::InvalidUrl {
                repository_id: repository_id.to_string(),
            })?
            .pop_if_empty()
            .extend(["workbooks", repository_id]);
        url.query_pairs_mut()
            .clear()
            .append_pair("format", EXPORT_FORMAT);
        Ok(url)
    }
}

/// The identifier becomes `{destination_dir}/{repository_id}.ext`, so it must
/// be a single ordinary path component.
fn check_file_name(repository_id: &str) -> Result<(), DownloadError> {
    let mut components = Path::new(repository_id).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if single_normal && !repository_id.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(DownloadError::UnsafeRepositoryId {
            repository_id: repository_id.to_string(),
        })
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Streams the response body chunk by chunk, returning bytes written.
///
/// Split out so the caller can remove the file on any error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::from_reqwest(url, e))?;

        file.write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
