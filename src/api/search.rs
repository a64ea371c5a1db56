//! Search and surprise endpoints.

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::api::{success, ApiResult};
use crate::search::{RandomSuggestion, SearchResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/search?q=momo
///
/// A blank or missing query is not an error; it returns an empty list.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Vec<SearchResult>> {
    let results = state.search.search(&params.q).await?;
    tracing::debug!(query = %params.q.trim(), hits = results.len(), "Search completed");
    Ok(success(results))
}

/// GET /api/surprise
///
/// `data` is `null` when the catalog has no food/restaurant pairings yet.
pub async fn surprise(State(state): State<AppState>) -> ApiResult<Option<RandomSuggestion>> {
    let suggestion = state.search.random_suggestion().await?;
    Ok(success(suggestion))
}
