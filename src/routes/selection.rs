use axum::{
    extract::{rejection::QueryRejection, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Selection, SelectionOptions},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
}

/// Lists the known mood, activity and genre keys
pub async fn options() -> Json<SelectionOptions> {
    Json(SelectionOptions::known())
}

/// Builds the search query for a selection without searching
pub async fn build_query(
    selection: Result<Query<Selection>, QueryRejection>,
) -> AppResult<Json<QueryResponse>> {
    let Query(selection) = selection?;
    if !selection.is_complete() {
        return Err(AppError::BadRequest(
            "Pick a mood and an activity first".to_string(),
        ));
    }

    Ok(Json(QueryResponse {
        query: selection.query(),
    }))
}
