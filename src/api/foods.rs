//! Food endpoints: listing, detail, variations, serving restaurants, votes
//! and the admin CRUD. Menu links live here too since they hang foods onto
//! restaurant menus.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::api::{clamp_limit, success, ApiResult, LimitQuery};
use crate::errors::AppError;
use crate::models::{
    CreateFoodRequest, CreateMenuLinkRequest, Food, FoodSummary, FoodVariation, MenuLink,
    ServingRestaurant, UpdateFoodRequest, VoteCount, VoteRequest,
};
use crate::AppState;

/// GET /api/foods
pub async fn list_foods(State(state): State<AppState>) -> ApiResult<Vec<Food>> {
    let foods = state.repo.list_foods().await?;
    Ok(success(foods))
}

/// GET /api/foods/top?limit=5
pub async fn top_foods(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> ApiResult<Vec<FoodSummary>> {
    let foods = state.repo.top_foods(clamp_limit(params.limit)).await?;
    Ok(success(foods))
}

/// GET /api/foods/{id}
pub async fn get_food(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Food> {
    let food = state
        .repo
        .get_food(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Food {} not found", id)))?;
    Ok(success(food))
}

/// GET /api/foods/{id}/variations
pub async fn food_variations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<FoodVariation>> {
    state
        .repo
        .get_food(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Food {} not found", id)))?;

    let variations = state.repo.food_variations(&id).await?;
    Ok(success(variations))
}

/// GET /api/foods/{id}/restaurants
pub async fn food_restaurants(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<ServingRestaurant>> {
    state
        .repo
        .get_food(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Food {} not found", id)))?;

    let restaurants = state.repo.food_restaurants(&id).await?;
    Ok(success(restaurants))
}

/// GET /api/foods/{id}/votes
pub async fn food_votes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<VoteCount> {
    state
        .repo
        .get_food(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Food {} not found", id)))?;

    let counts = state.repo.food_vote_counts(&id).await?;
    Ok(success(counts))
}

/// POST /api/foods/{id}/votes
pub async fn vote_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<VoteRequest>,
) -> ApiResult<VoteCount> {
    state
        .repo
        .get_food(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Food {} not found", id)))?;

    state.repo.add_food_vote(&id, request.liked).await?;
    let counts = state.repo.food_vote_counts(&id).await?;
    tracing::info!(food_id = %id, liked = request.liked, "Food vote recorded");
    Ok(success(counts))
}

/// POST /api/admin/foods
pub async fn create_food(
    State(state): State<AppState>,
    Json(request): Json<CreateFoodRequest>,
) -> ApiResult<Food> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Food name is required".to_string()));
    }

    let food = state.repo.create_food(&request).await?;
    tracing::info!(food_id = %food.id, name = %food.name, "Food created");
    Ok(success(food))
}

/// PUT /api/admin/foods/{id}
pub async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateFoodRequest>,
) -> ApiResult<Food> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Food name cannot be blank".to_string()));
        }
    }

    let food = state.repo.update_food(&id, &request).await?;
    Ok(success(food))
}

/// DELETE /api/admin/foods/{id}
pub async fn delete_food(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_food(&id).await?;
    tracing::info!(food_id = %id, "Food deleted");
    Ok(success(()))
}

/// POST /api/admin/menu
///
/// Links a food onto a restaurant's menu. Both sides must exist.
pub async fn create_menu_link(
    State(state): State<AppState>,
    Json(request): Json<CreateMenuLinkRequest>,
) -> ApiResult<MenuLink> {
    state
        .repo
        .get_restaurant(&request.restaurant_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Restaurant {} not found", request.restaurant_id))
        })?;
    state
        .repo
        .get_food(&request.food_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Food {} not found", request.food_id)))?;

    if request.price < 0.0 {
        return Err(AppError::Validation("Price cannot be negative".to_string()));
    }

    let link = state.repo.create_menu_link(&request).await?;
    Ok(success(link))
}

/// DELETE /api/admin/menu/{id}
pub async fn delete_menu_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_menu_link(&id).await?;
    Ok(success(()))
}
