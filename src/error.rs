use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ApiErrorResponse, ErrorCode, ErrorEnvelope};

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Server missing {0}")]
    Configuration(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("Upstream error ({status})")]
    Upstream {
        status: u16,
        body: String,
        code: ErrorCode,
    },

    #[error("Request failed: {0}")]
    Transport(String),
}

impl AppError {
    /// Builds an upstream error, classifying the body into an [`ErrorCode`]
    pub fn upstream(status: u16, body: String) -> Self {
        let code = classify_upstream(&body);
        AppError::Upstream { status, body, code }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Configuration(_) => ErrorCode::Configuration,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::Upstream { code, .. } => *code,
            AppError::Transport(_) => ErrorCode::RequestFailed,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration(_) | AppError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    /// The JSON body sent back to the caller
    pub fn envelope(&self) -> ErrorEnvelope {
        let code = self.code();
        match self {
            AppError::Configuration(_) | AppError::BadRequest(_) => {
                ErrorEnvelope::new(self.to_string(), code)
            }
            AppError::Upstream { status, body, .. } => ErrorEnvelope {
                status: Some(*status),
                body: Some(body.clone()),
                ..ErrorEnvelope::new("Upstream error", code)
            },
            AppError::Transport(message) => ErrorEnvelope {
                message: Some(message.clone()),
                ..ErrorEnvelope::new("Request failed", code)
            },
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key as a query parameter.
        AppError::Transport(err.without_url().to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.envelope())).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

const QUOTA_REASONS: &[&str] = &[
    "quotaexceeded",
    "dailylimitexceeded",
    "ratelimitexceeded",
    "userratelimitexceeded",
];
const FORBIDDEN_REASONS: &[&str] = &["forbidden", "accessnotconfigured", "iprefererblocked"];

/// Maps an upstream error body to an [`ErrorCode`].
///
/// Structured Google error reasons win; anything else falls back to sniffing
/// the raw text for known keywords.
pub fn classify_upstream(body: &str) -> ErrorCode {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(body) {
        for reason in parsed.error.errors.iter().filter_map(|e| e.reason.as_deref()) {
            if let Some(code) = classify_reason(reason) {
                return code;
            }
        }
        if let Some(message) = parsed.error.message.as_deref() {
            return classify_text(message);
        }
    }
    classify_text(body)
}

fn classify_reason(reason: &str) -> Option<ErrorCode> {
    let reason = reason.to_ascii_lowercase();
    if QUOTA_REASONS.contains(&reason.as_str()) {
        Some(ErrorCode::UpstreamQuota)
    } else if FORBIDDEN_REASONS.contains(&reason.as_str()) {
        Some(ErrorCode::UpstreamForbidden)
    } else if reason.starts_with("invalid") || reason == "keyinvalid" || reason == "badrequest" {
        Some(ErrorCode::UpstreamInvalid)
    } else {
        None
    }
}

/// Keyword heuristic over free text, case-insensitive
pub fn classify_text(text: &str) -> ErrorCode {
    let text = text.to_ascii_lowercase();
    if text.contains("quota") {
        ErrorCode::UpstreamQuota
    } else if text.contains("forbidden") || text.contains("accessnotconfigured") {
        ErrorCode::UpstreamForbidden
    } else if text.contains("invalid") {
        ErrorCode::UpstreamInvalid
    } else {
        ErrorCode::UpstreamOther
    }
}
