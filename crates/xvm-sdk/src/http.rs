use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::XvmError;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Shared HTTP client plus the per-request budgets used by catalogs and
/// the downloader.
#[derive(Debug, Clone)]
pub struct HttpContext {
    pub client: reqwest::Client,
    pub request_timeout: Duration,
    pub download_timeout: Duration,
}

impl HttpContext {
    /// Build a client with the given connect timeout.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(
        connect_timeout: Duration,
        request_timeout: Duration,
        download_timeout: Duration,
    ) -> Result<Self, XvmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(format!("xvm/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| XvmError::network_request("build http client", "", e))?;

        Ok(Self {
            client,
            request_timeout,
            download_timeout,
        })
    }

    /// Fetch `url` and decode the body as JSON.
    ///
    /// # Errors
    /// Returns [`XvmError::Network`] on transport failure, a non-success
    /// status, or a body that does not decode into `T`.
    pub async fn fetch_json<T>(&self, operation: &'static str, url: &str) -> Result<T, XvmError>
    where
        T: DeserializeOwned,
    {
        log::debug!("{operation}: GET {url}");

        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| XvmError::network_request(operation, url, e))?;

        if !response.status().is_success() {
            return Err(XvmError::network_status(operation, url, response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| XvmError::network_parse(operation, url, e))
    }

    /// Like [`Self::fetch_json`], with `params` appended as a query string.
    ///
    /// # Errors
    /// Returns [`XvmError::Network`] if the URL is invalid or the fetch fails.
    pub async fn fetch_json_with_query<T>(
        &self,
        operation: &'static str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, XvmError>
    where
        T: DeserializeOwned,
    {
        let url = reqwest::Url::parse_with_params(url, params)
            .map_err(|e| XvmError::network_request(operation, url, e))?;
        self.fetch_json(operation, url.as_str()).await
    }
}
