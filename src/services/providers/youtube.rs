/// YouTube Data API v3 provider
///
/// Calls `GET {api_url}/search` with the fixed filters used for playlist
/// discovery (embeddable videos only, moderate safe search, relevance order).
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::AppResult,
    services::providers::{UpstreamReply, VideoSearchProvider},
};

#[derive(Clone)]
pub struct YouTubeProvider {
    http_client: HttpClient,
    api_url: String,
}

impl YouTubeProvider {
    /// `timeout` of `None` keeps reqwest's default (no overall timeout)
    pub fn new(api_url: String, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;
        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.api_url)
    }

    /// Query parameters for one search call
    fn search_params<'a>(
        api_key: &'a str,
        query: &'a str,
        max_results: &'a str,
    ) -> [(&'static str, &'a str); 8] {
        [
            ("key", api_key),
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", max_results),
            ("videoEmbeddable", "true"),
            ("safeSearch", "moderate"),
            ("order", "relevance"),
        ]
    }
}

#[async_trait::async_trait]
impl VideoSearchProvider for YouTubeProvider {
    async fn search(
        &self,
        api_key: &str,
        query: &str,
        max_results: u32,
    ) -> AppResult<UpstreamReply> {
        let max_results = max_results.to_string();

        let response = self
            .http_client
            .get(self.search_url())
            .query(&Self::search_params(api_key, query, &max_results))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::info!(
            query = %query,
            max_results = %max_results,
            status,
            provider = "youtube",
            "Upstream search completed"
        );

        Ok(UpstreamReply { status, body })
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
