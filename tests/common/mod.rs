use std::sync::{Arc, Mutex};
use std::time::Duration;

use moodtube::{
    config::Config,
    error::{AppError, AppResult},
    routes::{create_router, AppState},
    services::providers::{UpstreamReply, VideoSearchProvider},
};

/// One recorded upstream call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub api_key: String,
    pub query: String,
    pub max_results: u32,
}

/// Canned upstream behaviour
#[derive(Clone)]
pub enum FakeReply {
    Reply(UpstreamReply),
    Unreachable(String),
}

/// In-memory stand-in for the YouTube Data API
#[derive(Clone)]
pub struct FakeProvider {
    reply: FakeReply,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    /// Queries containing this word are answered after `delay`
    slow_word: Option<(&'static str, Duration)>,
}

impl FakeProvider {
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: FakeReply::Reply(UpstreamReply {
                status,
                body: body.to_string(),
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
            slow_word: None,
        }
    }

    pub fn unreachable(message: &str) -> Self {
        Self {
            reply: FakeReply::Unreachable(message.to_string()),
            ..Self::replying(200, "{}")
        }
    }

    #[allow(dead_code)]
    pub fn slow_for(mut self, word: &'static str, delay: Duration) -> Self {
        self.slow_word = Some((word, delay));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl VideoSearchProvider for FakeProvider {
    async fn search(
        &self,
        api_key: &str,
        query: &str,
        max_results: u32,
    ) -> AppResult<UpstreamReply> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.to_string(),
            query: query.to_string(),
            max_results,
        });

        if let Some((word, delay)) = self.slow_word {
            if query.contains(word) {
                tokio::time::sleep(delay).await;
            }
        }

        match &self.reply {
            FakeReply::Reply(reply) => Ok(reply.clone()),
            FakeReply::Unreachable(message) => Err(AppError::Transport(message.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn config_with_key(api_key: Option<&str>) -> Config {
    Config {
        youtube_api: api_key.map(str::to_string),
        ..Config::default()
    }
}

pub fn create_state(api_key: Option<&str>, provider: FakeProvider) -> AppState {
    AppState::new(config_with_key(api_key), Arc::new(provider))
}

/// Serves the router on an ephemeral port and returns the proxy endpoint URL
#[allow(dead_code)]
pub async fn spawn_proxy(api_key: Option<&str>, provider: FakeProvider) -> String {
    let app = create_router(create_state(api_key, provider));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1/youtube-search", addr)
}

pub const SEARCH_BODY: &str = r#"{
    "kind": "youtube#searchListResponse",
    "items": [
        { "id": { "videoId": "a1" }, "snippet": { "title": "Happy Study Lofi", "channelTitle": "Lofi Girl" } },
        { "id": { "kind": "youtube#playlist", "playlistId": "PL1" }, "snippet": { "title": "Playlist" } },
        { "id": { "videoId": "b2" }, "snippet": { "channelTitle": "Chillhop" } },
        { "snippet": { "title": "Broken" } },
        { "id": { "videoId": "c3" }, "snippet": { "title": "Focus Beats", "channelTitle": "" } }
    ]
}"#;

pub const QUOTA_BODY: &str = r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota.","errors":[{"message":"quota","domain":"youtube.quota","reason":"quotaExceeded"}]}}"#;
