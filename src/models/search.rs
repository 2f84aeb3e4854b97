use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title shown when the upstream item has none
pub const UNTITLED: &str = "untitled";

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";

/// A video result ready to be rendered as an embedded player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
}

impl SearchResultItem {
    pub fn embed_url(&self) -> String {
        format!("{}/{}", EMBED_BASE_URL, self.video_id)
    }
}

// ============================================================================
// YouTube Data API Types
// ============================================================================

/// Raw response from GET /search.
///
/// Items stay untyped JSON so that one oddly shaped entry (a string `id`, a
/// non-object snippet) is dropped on its own instead of failing the batch.
/// `"items": null` reads as no items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSearchResponse {
    #[serde(default)]
    pub items: Option<Vec<Value>>,
}

impl ApiSearchResponse {
    /// Number of raw items, including ones that will be dropped
    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    /// Renderable items, dropping every entry without a video id
    pub fn into_result_items(self) -> Vec<SearchResultItem> {
        self.items
            .unwrap_or_default()
            .iter()
            .filter_map(result_item_from_value)
            .collect()
    }
}

fn string_at<'a>(item: &'a Value, pointer: &str) -> Option<&'a str> {
    item.pointer(pointer).and_then(Value::as_str)
}

/// Maps one upstream item, `None` unless `id.videoId` is a non-empty string
pub fn result_item_from_value(item: &Value) -> Option<SearchResultItem> {
    let video_id = string_at(item, "/id/videoId").filter(|id| !id.trim().is_empty())?;

    Some(SearchResultItem {
        video_id: video_id.to_string(),
        title: string_at(item, "/snippet/title")
            .filter(|title| !title.is_empty())
            .unwrap_or(UNTITLED)
            .to_string(),
        channel_title: string_at(item, "/snippet/channelTitle")
            .unwrap_or_default()
            .to_string(),
    })
}

/// Error body returned by Google APIs
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorReason>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorReason {
    #[serde(default)]
    pub reason: Option<String>,
}

// ============================================================================
// Proxy wire types
// ============================================================================

/// Query string accepted by the search proxy.
///
/// `max` stays a raw string so that garbage falls back to the default instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

/// Machine-readable failure class attached to every proxy error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Configuration,
    BadRequest,
    UpstreamQuota,
    UpstreamForbidden,
    UpstreamInvalid,
    UpstreamOther,
    RequestFailed,
}

impl ErrorCode {
    /// Whether the failure points at the API key, its quota or the API being disabled
    pub fn is_credential_problem(self) -> bool {
        matches!(
            self,
            ErrorCode::Configuration
                | ErrorCode::UpstreamQuota
                | ErrorCode::UpstreamForbidden
                | ErrorCode::UpstreamInvalid
        )
    }
}

/// JSON body of every non-success proxy response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            error: error.into(),
            code: Some(code),
            status: None,
            body: None,
            message: None,
        }
    }

    /// An envelope from a proxy that does not send error codes
    pub fn new_uncoded(error: impl Into<String>) -> Self {
        Self {
            code: None,
            ..Self::new(error, ErrorCode::UpstreamOther)
        }
    }

    /// All free text in the envelope, for heuristics that sniff for keywords
    pub fn text(&self) -> String {
        [
            Some(self.error.as_str()),
            self.body.as_deref(),
            self.message.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}
