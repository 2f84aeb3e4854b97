/// Upstream video search abstraction
///
/// The proxy talks to the video search API only through [`VideoSearchProvider`],
/// so the HTTP layer can be exercised without network access.
use crate::error::AppResult;

pub mod youtube;

pub use youtube::YouTubeProvider;

/// Raw reply from the upstream search endpoint.
///
/// Non-success statuses are data here, not errors: the proxy relays them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for video search backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Issues one search request.
    ///
    /// Returns `Err` only when the upstream could not be reached or its body
    /// could not be read.
    async fn search(&self, api_key: &str, query: &str, max_results: u32)
        -> AppResult<UpstreamReply>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
