//! Paged enumeration of a user's published workbooks.

use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument};
use url::Url;

use super::error::{ListError, ListErrorKind};
use crate::config::{ClientConfig, ConfigError};
use crate::http_client::build_http_client;
use crate::workbook::Workbook;

/// Number of workbooks requested per listing page.
pub const PAGE_SIZE: usize = 20;

/// Client for the profile listing endpoint.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use workbook_dl::WorkbookLister;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let lister = WorkbookLister::new()?;
/// for workbook in lister.list_all_workbooks("alice").await? {
///     println!("{}", workbook.repository_id());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WorkbookLister {
    client: Client,
    base_url: Url,
}

impl WorkbookLister {
    /// Creates a lister for the production platform with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a lister from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an invalid configuration.
    pub fn with_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = build_http_client(config)?;
        let base_url = config.parsed_base_url()?;
        Ok(Self { client, base_url })
    }

    /// Lists every workbook published by `username`.
    ///
    /// Pages of [`PAGE_SIZE`] are requested with `index` set to the number of
    /// workbooks received so far; the first page shorter than [`PAGE_SIZE`]
    /// ends the enumeration. Records keep server order and are not
    /// deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`ListError`] on the first page that fails to arrive or decode.
    /// The error carries every workbook from the pages before it.
    #[instrument(skip(self), fields(username = %username))]
    pub async fn list_all_workbooks(&self, username: &str) -> Result<Vec<Workbook>, ListError> {
        let mut all = Vec::new();
        let mut index = 0usize;

        loop {
            let page = match self.fetch_page(username, index).await {
                Ok(page) => page,
                Err(kind) => return Err(ListError::new(kind, all)),
            };
            let received = page.len();
            debug!(index, received, "received workbook page");

            all.extend(page.into_iter().filter(|workbook| {
                let keep = !workbook.repository_id().is_empty();
                if !keep {
                    debug!(index, "dropping workbook without repository id");
                }
                keep
            }));

            if received < PAGE_SIZE {
                break;
            }
            index += received;
        }

        debug!(total = all.len(), "listing complete");
        Ok(all)
    }

    async fn fetch_page(&self, username: &str, index: usize) -> Result<Vec<Workbook>, ListErrorKind> {
        let url = self.page_url(username, index, unix_timestamp())?;

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ListErrorKind::from_reqwest(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListErrorKind::http_status(url.as_str(), status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ListErrorKind::from_reqwest(url.as_str(), e))?;

        serde_json::from_slice(&body).map_err(|e| ListErrorKind::decode(url.as_str(), e))
    }

    /// Builds `{base}/profile/api/{username}/workbooks?no_cache=..&index=..&count=..`.
    fn page_url(&self, username: &str, index: usize, no_cache: u64) -> Result<Url, ListErrorKind> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ListErrorKind::InvalidUrl {
                username: username.to_string(),
            })?
            .pop_if_empty()
            .extend(["profile", "api", username, "workbooks"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("no_cache", &no_cache.to_string())
            .append_pair("index", &index.to_string())
            .append_pair("count", &PAGE_SIZE.to_string());
        Ok(url)
    }
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
