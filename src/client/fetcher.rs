//! HTTP implementation of the crawl service contract
//!
//! This module handles all requests the client makes to the crawl service:
//! - Building the HTTP client with the client's user agent
//! - `POST /api/crawl` and classification of its outcome
//! - `GET /api/health`

use crate::client::types::{CrawlRequest, CrawlResult, HealthStatus};
use crate::client::CrawlService;
use crate::config::ServiceConfig;
use crate::CrawlError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Route of the crawl endpoint, relative to the service base URL
pub const CRAWL_ROUTE: &str = "api/crawl";

/// Route of the health endpoint, relative to the service base URL
pub const HEALTH_ROUTE: &str = "api/health";

/// Builds an HTTP client for talking to the crawl service
///
/// The client only times out when the settings ask for it; otherwise a slow
/// crawl is left to the service and the transport.
///
/// # Example
///
/// ```no_run
/// use crawl_studio::client::build_http_client;
/// use crawl_studio::config::ServiceConfig;
///
/// let client = build_http_client(&ServiceConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ServiceConfig) -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut builder = Client::builder().user_agent(user_agent).gzip(true).brotli(true);

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Resolves `route` against the service base URL, keeping any path prefix
pub fn resolve_route(base_url: &str, route: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(route)
}

/// Crawl service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpCrawlService {
    client: Client,
    crawl_url: Url,
    health_url: Url,
}

impl HttpCrawlService {
    /// Creates a service client from the `[service]` settings
    pub fn new(config: &ServiceConfig) -> crate::Result<Self> {
        let client = build_http_client(config)?;
        Self::with_client(client, &config.base_url)
    }

    /// Creates a service client reusing an existing HTTP client
    pub fn with_client(client: Client, base_url: &str) -> crate::Result<Self> {
        Ok(Self {
            client,
            crawl_url: resolve_route(base_url, CRAWL_ROUTE)?,
            health_url: resolve_route(base_url, HEALTH_ROUTE)?,
        })
    }

    pub fn crawl_url(&self) -> &Url {
        &self.crawl_url
    }

    /// Asks the service whether it is up
    pub async fn health_check(&self) -> crate::Result<HealthStatus> {
        tracing::debug!("GET {}", self.health_url);
        let status = self
            .client
            .get(self.health_url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<HealthStatus>()
            .await?;
        Ok(status)
    }
}

impl CrawlService for HttpCrawlService {
    /// Sends one crawl request
    ///
    /// | Outcome | Result |
    /// |---------|--------|
    /// | non-2xx status | `CrawlError::Transport` |
    /// | 2xx, body parses | `Ok(payload)`, whatever its `success` says |
    /// | connection failure, unreadable body | `CrawlError::Unknown` |
    async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlResult, CrawlError> {
        tracing::debug!("POST {} for {}", self.crawl_url, request.url);

        let response = self
            .client
            .post(self.crawl_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| CrawlError::Unknown(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Crawl service answered {}", status);
            return Err(CrawlError::Transport {
                status: status.as_u16(),
            });
        }

        response
            .json::<CrawlResult>()
            .await
            .map_err(|e| CrawlError::Unknown(e.to_string()))
    }
}
