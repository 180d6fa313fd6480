//! Asset storage endpoints.
//!
//! Uploaded binaries (brand logos, slides, product images) live on the local
//! filesystem under `/{platform}/{sectionKind}/{generatedId}`. An upload
//! answers with the URL the editor embeds in its section data.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::AppState;

/// Where an uploaded asset can be fetched back from.
#[derive(Debug, Serialize)]
pub struct AssetUrl {
    pub url: String,
}

/// Path segments come straight from the URL; keep them from escaping the
/// assets directory.
fn checked_segment(name: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(AppError::BadRequest(format!("Invalid {} '{}'", name, value)));
    }
    Ok(())
}

/// POST /api/assets/:platform/:kind - Store raw bytes, answer with their URL.
pub async fn upload_asset(
    State(state): State<AppState>,
    Path((platform, kind)): Path<(String, String)>,
    body: Bytes,
) -> ApiResult<AssetUrl> {
    checked_segment("platform", &platform)?;
    checked_segment("kind", &kind)?;
    if body.is_empty() {
        return Err(AppError::Validation("Empty upload".to_string()));
    }

    let id = Uuid::new_v4().to_string();
    let dir = state.config.assets_path.join(&platform).join(&kind);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Store(format!("Asset storage unavailable: {}", e)))?;
    tokio::fs::write(dir.join(&id), &body)
        .await
        .map_err(|e| AppError::Store(format!("Asset write failed: {}", e)))?;

    tracing::info!("Stored asset /{}/{}/{} ({} bytes)", platform, kind, id, body.len());
    success(AssetUrl {
        url: format!("/api/assets/{}/{}/{}", platform, kind, id),
    })
}

/// GET /api/assets/:platform/:kind/:asset - Fetch stored bytes.
pub async fn fetch_asset(
    State(state): State<AppState>,
    Path((platform, kind, asset)): Path<(String, String, String)>,
) -> Result<Response, AppError> {
    checked_segment("platform", &platform)?;
    checked_segment("kind", &kind)?;
    checked_segment("asset", &asset)?;

    let path = state
        .config
        .assets_path
        .join(&platform)
        .join(&kind)
        .join(&asset);

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            bytes,
        )
            .into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(format!(
            "Asset '{}/{}/{}' not found",
            platform, kind, asset
        ))),
        Err(e) => Err(AppError::Store(format!("Asset read failed: {}", e))),
    }
}
