//! Vlogger feature admin endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateVloggerFeatureRequest, UpdateVloggerFeatureRequest, VloggerFeature};
use crate::AppState;

/// GET /api/admin/features
///
/// All features across the catalog, newest first, with each owning
/// restaurant's name joined in.
pub async fn list_features(State(state): State<AppState>) -> ApiResult<Vec<VloggerFeature>> {
    let features = state.repo.list_vlogger_features().await?;
    Ok(success(features))
}

/// POST /api/admin/features
pub async fn create_feature(
    State(state): State<AppState>,
    Json(request): Json<CreateVloggerFeatureRequest>,
) -> ApiResult<VloggerFeature> {
    state
        .repo
        .get_restaurant(&request.restaurant_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Restaurant {} not found", request.restaurant_id))
        })?;

    if request.vlogger_name.trim().is_empty() {
        return Err(AppError::Validation("Vlogger name is required".to_string()));
    }
    if request.content_url.trim().is_empty() {
        return Err(AppError::Validation("Content URL is required".to_string()));
    }

    let feature = state.repo.create_vlogger_feature(&request).await?;
    tracing::info!(feature_id = %feature.id, restaurant_id = %feature.restaurant_id, "Vlogger feature created");
    Ok(success(feature))
}

/// PUT /api/admin/features/{id}
pub async fn update_feature(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVloggerFeatureRequest>,
) -> ApiResult<VloggerFeature> {
    if let Some(restaurant_id) = &request.restaurant_id {
        state
            .repo
            .get_restaurant(restaurant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", restaurant_id)))?;
    }

    let feature = state.repo.update_vlogger_feature(&id, &request).await?;
    Ok(success(feature))
}

/// DELETE /api/admin/features/{id}
pub async fn delete_feature(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_vlogger_feature(&id).await?;
    tracing::info!(feature_id = %id, "Vlogger feature deleted");
    Ok(success(()))
}
