//! Version lifecycle endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    ConfirmQuery, RegisterVersionRequest, SetActiveVersionRequest, VersionMeta,
};
use crate::AppState;

/// GET /api/platforms/:platform/brands/:brand/versions - The version catalog.
pub async fn list_versions(
    State(state): State<AppState>,
    Path((platform, brand)): Path<(String, String)>,
) -> ApiResult<Vec<VersionMeta>> {
    let summary = state.repo.brand_summary(&platform, &brand).await?;
    success(summary.versions)
}

/// POST /api/platforms/:platform/brands/:brand/versions - Register a version.
pub async fn register_version(
    State(state): State<AppState>,
    Path((platform, brand)): Path<(String, String)>,
    Json(request): Json<RegisterVersionRequest>,
) -> ApiResult<()> {
    if request.versionname.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter version name".to_string(),
        ));
    }

    state
        .repo
        .register_version(&platform, &brand, &request.versionname, &request.created_by)
        .await?;

    tracing::info!(
        "Registered version '{}' under brand '{}' on platform '{}'",
        request.versionname,
        brand,
        platform
    );
    success(())
}

/// PUT /api/platforms/:platform/brands/:brand/active-version - Set the live version.
pub async fn set_active_version(
    State(state): State<AppState>,
    Path((platform, brand)): Path<(String, String)>,
    Json(request): Json<SetActiveVersionRequest>,
) -> ApiResult<()> {
    if !request.confirm {
        return Err(AppError::Validation(
            "Setting a version live requires confirmation".to_string(),
        ));
    }

    state
        .repo
        .set_active_version(&platform, &brand, &request.versionname)
        .await?;

    tracing::info!(
        "Version '{}' of brand '{}' is now live on platform '{}'",
        request.versionname,
        brand,
        platform
    );
    success(())
}

/// DELETE /api/platforms/:platform/brands/:brand/versions/:version - Delete a version.
pub async fn delete_version(
    State(state): State<AppState>,
    Path((platform, brand, version)): Path<(String, String, String)>,
    Query(query): Query<ConfirmQuery>,
) -> ApiResult<()> {
    if !query.confirm {
        return Err(AppError::Validation(
            "Deleting a version requires confirmation".to_string(),
        ));
    }

    state
        .repo
        .delete_version(&platform, &brand, &version)
        .await?;

    tracing::info!(
        "Deleted version '{}' of brand '{}' on platform '{}'",
        version,
        brand,
        platform
    );
    success(())
}
