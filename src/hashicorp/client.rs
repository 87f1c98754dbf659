// HTTP client for the release index and notes pages.
// Pages are fetched as opaque HTML; status handling is left to the caller.

use std::time::Duration;

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use tracing::debug;

use crate::config::Config;
use crate::error::{HornError, Result};

/// A fetched page: status plus body text.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: StatusCode,
    pub body: String,
}

impl Page {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Something that can GET a page by URL.
///
/// Non-success statuses are returned as pages, not errors. Errors mean the
/// request itself failed (DNS, connection, timeout).
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn get_page(&self, url: &str) -> Result<Page>;
}

/// `PageSource` backed by reqwest.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with the configured timeout and user agent.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(HornError::Http)?;

        Ok(Self { client })
    }
}

impl PageSource for HttpClient {
    async fn get_page(&self, url: &str) -> Result<Page> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} -> HTTP {} ({} bytes)", url, status.as_u16(), body.len());
        Ok(Page { status, body })
    }
}
