//! Restaurant endpoints: listing, detail, menu, votes, features and the
//! admin CRUD.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::{clamp_limit, success, ApiResult, LimitQuery};
use crate::errors::AppError;
use crate::models::{
    CreateRestaurantRequest, MenuItem, Restaurant, RestaurantSummary, UpdateRestaurantRequest,
    VloggerFeature, VoteCount, VoteRequest,
};
use crate::AppState;

/// GET /api/restaurants
pub async fn list_restaurants(State(state): State<AppState>) -> ApiResult<Vec<Restaurant>> {
    let restaurants = state.repo.list_restaurants().await?;
    Ok(success(restaurants))
}

/// GET /api/restaurants/top?limit=5
pub async fn top_restaurants(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> ApiResult<Vec<RestaurantSummary>> {
    let restaurants = state.repo.top_restaurants(clamp_limit(params.limit)).await?;
    Ok(success(restaurants))
}

/// GET /api/restaurants/{id}
///
/// Viewing a restaurant counts as a visit; the counter bump runs in the
/// background and a failure there never fails the read.
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Restaurant> {
    let restaurant = state
        .repo
        .get_restaurant(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))?;

    let repo = state.repo.clone();
    let restaurant_id = id.clone();
    tokio::spawn(async move {
        if let Err(err) = repo.increment_restaurant_visits(&restaurant_id).await {
            tracing::warn!(restaurant_id = %restaurant_id, "Failed to bump visit counter: {}", err);
        }
    });

    Ok(success(restaurant))
}

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// GET /api/restaurants/{id}/menu?category=Snacks
pub async fn restaurant_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<MenuQuery>,
) -> ApiResult<Vec<MenuItem>> {
    state
        .repo
        .get_restaurant(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))?;

    let menu = state
        .repo
        .restaurant_menu(&id, params.category.as_deref())
        .await?;
    Ok(success(menu))
}

/// GET /api/restaurants/{id}/features
pub async fn restaurant_features(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<VloggerFeature>> {
    state
        .repo
        .get_restaurant(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))?;

    let features = state.repo.restaurant_vlogger_features(&id).await?;
    Ok(success(features))
}

/// GET /api/restaurants/{id}/votes
pub async fn restaurant_votes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<VoteCount> {
    state
        .repo
        .get_restaurant(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))?;

    let counts = state.repo.restaurant_vote_counts(&id).await?;
    Ok(success(counts))
}

/// POST /api/restaurants/{id}/votes
///
/// Returns the tallies after the vote so the caller can render the fresh
/// counts without a second round trip.
pub async fn vote_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<VoteRequest>,
) -> ApiResult<VoteCount> {
    state
        .repo
        .get_restaurant(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))?;

    state.repo.add_restaurant_vote(&id, request.liked).await?;
    let counts = state.repo.restaurant_vote_counts(&id).await?;
    tracing::info!(restaurant_id = %id, liked = request.liked, "Restaurant vote recorded");
    Ok(success(counts))
}

/// POST /api/admin/restaurants
pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(request): Json<CreateRestaurantRequest>,
) -> ApiResult<Restaurant> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Restaurant name is required".to_string()));
    }

    let restaurant = state.repo.create_restaurant(&request).await?;
    tracing::info!(restaurant_id = %restaurant.id, name = %restaurant.name, "Restaurant created");
    Ok(success(restaurant))
}

/// PUT /api/admin/restaurants/{id}
pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRestaurantRequest>,
) -> ApiResult<Restaurant> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Restaurant name cannot be blank".to_string()));
        }
    }

    let restaurant = state.repo.update_restaurant(&id, &request).await?;
    Ok(success(restaurant))
}

/// DELETE /api/admin/restaurants/{id}
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_restaurant(&id).await?;
    tracing::info!(restaurant_id = %id, "Restaurant deleted");
    Ok(success(()))
}
