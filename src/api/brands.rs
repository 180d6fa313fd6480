//! Brand endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{BrandSummary, RegisterBrandRequest};
use crate::AppState;

/// GET /api/platforms/:platform/brands - List registered brand names.
pub async fn list_brands(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> ApiResult<Vec<String>> {
    let brands = state.repo.list_brands(&platform).await?;
    success(brands)
}

/// POST /api/platforms/:platform/brands - Register a brand with its first version.
pub async fn register_brand(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    Json(request): Json<RegisterBrandRequest>,
) -> ApiResult<()> {
    if request.brandname.trim().is_empty() {
        return Err(AppError::Validation("Please enter brand name".to_string()));
    }
    if request.versionname.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter version name".to_string(),
        ));
    }

    state
        .repo
        .register_brand(
            &platform,
            &request.brandname,
            &request.versionname,
            &request.created_by,
        )
        .await?;

    tracing::info!(
        "Registered brand '{}' on platform '{}'",
        request.brandname,
        platform
    );
    success(())
}

/// GET /api/platforms/:platform/brands/:brand - Active version and version catalog.
pub async fn get_brand(
    State(state): State<AppState>,
    Path((platform, brand)): Path<(String, String)>,
) -> ApiResult<BrandSummary> {
    let summary = state.repo.brand_summary(&platform, &brand).await?;
    success(summary)
}
