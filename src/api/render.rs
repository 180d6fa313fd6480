//! Live and preview render endpoints.
//!
//! Both resolve a template through the repository and feed it to the same
//! renderer; they differ only in how the version is addressed. Live is
//! public and follows the brand's active version; preview takes an explicit
//! version and sits behind the operator key.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::render::{render_template, RenderedPage};
use crate::AppState;

/// GET /api/live/:platform/:brand - Render the active version.
pub async fn render_live(
    State(state): State<AppState>,
    Path((platform, brand)): Path<(String, String)>,
) -> ApiResult<RenderedPage> {
    let template = state.repo.load_template(&platform, &brand, None).await?;
    success(render_template(&template))
}

/// GET /api/preview/:platform/:brand/:version - Render an explicit version.
pub async fn render_preview(
    State(state): State<AppState>,
    Path((platform, brand, version)): Path<(String, String, String)>,
) -> ApiResult<RenderedPage> {
    let template = state
        .repo
        .load_template(&platform, &brand, Some(&version))
        .await?;
    success(render_template(&template))
}
