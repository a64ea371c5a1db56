//! Aggregate statistics endpoint.

use axum::extract::State;

use crate::api::{success, ApiResult, DEFAULT_RANKING_LIMIT};
use crate::models::StatsReport;
use crate::AppState;

/// GET /api/stats
///
/// Overview counts plus the vote and search leaderboards in one payload.
/// The three queries are independent so they run concurrently.
pub async fn stats(State(state): State<AppState>) -> ApiResult<StatsReport> {
    let (overview, top_voted_foods, top_voted_restaurants, most_searched_foods) = tokio::join!(
        state.repo.overview_stats(),
        state.repo.top_voted_foods(DEFAULT_RANKING_LIMIT),
        state.repo.top_voted_restaurants(DEFAULT_RANKING_LIMIT),
        state.repo.top_foods(DEFAULT_RANKING_LIMIT),
    );

    Ok(success(StatsReport {
        overview: overview?,
        top_voted_foods: top_voted_foods?,
        top_voted_restaurants: top_voted_restaurants?,
        most_searched_foods: most_searched_foods?,
    }))
}
