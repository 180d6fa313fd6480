//! User directory endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{BrandUser, RegisterUserRequest, UserDocument};
use crate::AppState;

/// GET /api/users/:email - Fetch a user document.
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<UserDocument> {
    let user = state
        .users
        .get_user(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", email)))?;
    success(user)
}

/// POST /api/users - Register a user under a brand.
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> ApiResult<BrandUser> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("Please enter an email".to_string()));
    }
    if request.brandname.trim().is_empty() {
        return Err(AppError::Validation("Please choose a brand".to_string()));
    }

    let entry = state
        .users
        .register_user(
            &request.registered_by,
            &request.email,
            &request.designation,
            &request.brandname,
        )
        .await?;

    tracing::info!(
        "Registered user '{}' under brand '{}'",
        request.email,
        request.brandname
    );
    success(entry)
}
