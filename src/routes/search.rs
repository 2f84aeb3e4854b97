use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension,
};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::ProxyParams,
    routes::AppState,
    services::proxy,
};

/// Lets browsers and CDNs reuse identical searches briefly
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=60";

/// Handler for the search proxy endpoint.
///
/// Relays the upstream JSON untouched on success.
pub async fn youtube_search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    params: Result<Query<ProxyParams>, QueryRejection>,
) -> AppResult<Response> {
    let Query(params) = params.map_err(|rejection| {
        tracing::warn!(
            request_id = %request_id,
            error = %rejection.body_text(),
            "Unreadable search query string"
        );
        AppError::from(rejection)
    })?;

    tracing::info!(
        request_id = %request_id,
        q = ?params.q,
        max = ?params.max,
        "Processing search request"
    );

    let body = proxy::forward_search(
        state.provider.as_ref(),
        state.config.api_key(),
        &params,
        &state.limits,
    )
    .await
    .map_err(|e| {
        tracing::warn!(
            request_id = %request_id,
            code = ?e.code(),
            error = %e,
            "Search request rejected"
        );
        e
    })?;

    tracing::info!(
        request_id = %request_id,
        bytes = body.len(),
        "Search relayed"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
        ],
        body,
    )
        .into_response())
}
