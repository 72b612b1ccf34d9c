//! Client side of the crawl service contract
//!
//! The session controller only talks to [`CrawlService`]; the HTTP
//! implementation lives in `fetcher`, and tests plug in their own doubles.

mod fetcher;
mod types;

pub use fetcher::{build_http_client, resolve_route, HttpCrawlService, CRAWL_ROUTE, HEALTH_ROUTE};
pub use types::{CrawlMetadata, CrawlRequest, CrawlResult, HealthStatus, GENERIC_FAILURE_MESSAGE};

use crate::CrawlError;
use std::future::Future;

/// Something that can run one crawl
pub trait CrawlService {
    /// Sends `request` and returns the service's payload
    ///
    /// Implementations return the payload as received, including payloads
    /// with `success: false`; the caller decides what those mean. Non-2xx
    /// statuses map to [`CrawlError::Transport`], everything else that goes
    /// wrong to [`CrawlError::Unknown`].
    fn crawl(
        &self,
        request: &CrawlRequest,
    ) -> impl Future<Output = Result<CrawlResult, CrawlError>> + Send;
}
