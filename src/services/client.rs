//! Client for the search proxy.
//!
//! [`SearchClient`] makes one proxy call and turns the reply into renderable
//! items or a [`SearchFailure`]. [`SearchSession`] sits on top and drops
//! replies that were overtaken by a newer submission.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::classify_text,
    models::{ApiSearchResponse, ErrorCode, ErrorEnvelope, SearchResultItem, Selection},
    services::proxy::ResultLimits,
};

/// Shown when the failure points at the key, its quota or the API being disabled
pub const CREDENTIAL_FAILURE_MESSAGE: &str =
    "Failed to load data. Check the API key, quota, and whether YouTube Data API v3 is enabled.";

/// Shown for every other failure
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to load data. Please try again later.";

pub const NO_RESULTS_MESSAGE: &str = "No results. Try changing your preferences or genre.";

pub const INCOMPLETE_SELECTION_MESSAGE: &str = "Pick a mood and an activity first.";

/// Why a proxy call produced no items
#[derive(thiserror::Error, Debug)]
pub enum SearchFailure {
    #[error("Proxy returned status {status}: {}", .envelope.error)]
    Proxy { status: u16, envelope: ErrorEnvelope },

    #[error("Proxy request failed: {0}")]
    Transport(String),

    #[error("Failed to parse proxy response: {0}")]
    Decode(String),
}

impl SearchFailure {
    /// Structured error code, falling back to keyword sniffing when the proxy
    /// sent none
    pub fn code(&self) -> ErrorCode {
        match self {
            SearchFailure::Proxy { envelope, .. } => envelope
                .code
                .unwrap_or_else(|| classify_text(&envelope.text())),
            SearchFailure::Transport(_) | SearchFailure::Decode(_) => ErrorCode::RequestFailed,
        }
    }

    /// Short message safe to show to the listener
    pub fn user_message(&self) -> &'static str {
        if self.code().is_credential_problem() {
            CREDENTIAL_FAILURE_MESSAGE
        } else {
            GENERIC_FAILURE_MESSAGE
        }
    }
}

impl From<reqwest::Error> for SearchFailure {
    fn from(err: reqwest::Error) -> Self {
        SearchFailure::Transport(err.to_string())
    }
}

/// Talks to the search proxy over HTTP
#[derive(Clone)]
pub struct SearchClient {
    http_client: HttpClient,
    proxy_url: String,
    limits: ResultLimits,
}

impl SearchClient {
    pub fn new(proxy_url: impl Into<String>, limits: ResultLimits) -> Self {
        Self {
            http_client: HttpClient::new(),
            proxy_url: proxy_url.into(),
            limits,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, SearchFailure> {
        self.http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn proxy_url(&self) -> &str {
        &self.proxy_url
    }

    /// Searches for `query`, asking for at most `max_results` items (bounded
    /// by the configured cap)
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchResultItem>, SearchFailure> {
        let max_results = self.limits.bound(max_results).to_string();

        let response = self
            .http_client
            .get(&self.proxy_url)
            .query(&[("q", query), ("max", max_results.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let envelope = serde_json::from_str::<ErrorEnvelope>(&body).unwrap_or_else(|_| {
                ErrorEnvelope {
                    body: Some(body.clone()),
                    ..ErrorEnvelope::new_uncoded(status.canonical_reason().unwrap_or("error"))
                }
            });
            tracing::warn!(
                status = status.as_u16(),
                error = %envelope.error,
                code = ?envelope.code,
                "Proxy search failed"
            );
            return Err(SearchFailure::Proxy {
                status: status.as_u16(),
                envelope,
            });
        }

        let parsed: ApiSearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchFailure::Decode(e.to_string()))?;
        let total = parsed.item_count();
        let items = parsed.into_result_items();

        tracing::debug!(
            query = %query,
            received = total,
            kept = items.len(),
            "Proxy search completed"
        );

        Ok(items)
    }
}

/// Ticket handed out at submission time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Monotonic submission counter.
///
/// Only the most recently issued ticket is current; completions holding an
/// older ticket must be discarded.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// The result of one submission, ready to display
#[derive(Debug)]
pub struct SearchOutcome {
    pub ticket: RequestTicket,
    pub query: String,
    pub result: Result<Vec<SearchResultItem>, SearchFailure>,
}

impl SearchOutcome {
    /// Status line for the listener
    pub fn status_line(&self) -> String {
        match &self.result {
            Ok(items) if items.is_empty() => NO_RESULTS_MESSAGE.to_string(),
            Ok(_) => format!("Showing results for: \"{}\"", self.query),
            Err(failure) => failure.user_message().to_string(),
        }
    }

    pub fn items(&self) -> &[SearchResultItem] {
        match &self.result {
            Ok(items) => items,
            Err(_) => &[],
        }
    }
}

/// A listener's sequence of submissions against one proxy
pub struct SearchSession {
    client: SearchClient,
    sequencer: RequestSequencer,
    max_results: u32,
}

impl SearchSession {
    pub fn new(client: SearchClient, max_results: u32) -> Self {
        Self {
            client,
            sequencer: RequestSequencer::new(),
            max_results,
        }
    }

    /// Builds the query for `selection` and runs the search.
    ///
    /// Returns `None` when a newer submission was issued while this one was in
    /// flight.
    pub async fn submit(&self, selection: &Selection) -> Option<SearchOutcome> {
        let ticket = self.sequencer.issue();
        let query = selection.query();

        tracing::info!(
            sequence = ticket.sequence(),
            query = %query,
            "Searching"
        );

        let result = self.client.search(&query, self.max_results).await;
        if let Err(failure) = &result {
            tracing::error!(error = %failure, code = ?failure.code(), "Search failed");
        }

        if !self.sequencer.is_current(ticket) {
            tracing::debug!(
                sequence = ticket.sequence(),
                "Discarding stale search result"
            );
            return None;
        }

        Some(SearchOutcome {
            ticket,
            query,
            result,
        })
    }
}
