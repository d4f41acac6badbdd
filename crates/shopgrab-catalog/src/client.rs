//! HTTP client shared by every acquisition strategy.

use std::time::Duration;

use shopgrab_core::CatalogConfig;

use crate::error::CatalogError;
use crate::origin::extract_store_origin;

/// Outbound HTTP client with a fixed identity header set.
///
/// Sends the configured `User-Agent`, a broad `Accept` header, the
/// storefront origin as `Referer`, and `Cache-Control: no-cache` so
/// intermediary caches cannot mask a live failure with a stale body.
///
/// There are no retries here: when a fetch fails, the strategy it belongs
/// to fails, and ladder advancement is the retry mechanism.
pub struct CatalogClient {
    client: reqwest::Client,
    origin: String,
}

impl CatalogClient {
    /// Creates a `CatalogClient` from the pipeline configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            origin: extract_store_origin(&config.shop_url),
        })
    }

    /// Scheme+host origin of the configured storefront.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Fetches the body of `url` as text.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] — HTTP 404.
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`CatalogError::Http`] — network, timeout, or TLS failure.
    pub async fn fetch_text(&self, url: &str) -> Result<String, CatalogError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "application/json,text/xml;q=0.9,text/html;q=0.8,*/*;q=0.7",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, &self.origin)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
