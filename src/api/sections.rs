//! Section editor endpoints.
//!
//! Each of the eight sections is loaded and saved through the same pair of
//! handlers; the section name in the path picks the payload shape. Validation
//! happens here, at the editor boundary — the repository stores any payload
//! it is handed.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    validate_theme, CarouselSection, ContentSection, FooterSection, FormSection, NavbarSection,
    ProductsSection, SaveSectionRequest, SectionKind, SliderContentSection,
};
use crate::AppState;

fn parse_kind(section: &str) -> Result<SectionKind, AppError> {
    SectionKind::from_str(section)
        .ok_or_else(|| AppError::Validation(format!("Unknown section '{}'", section)))
}

/// Check a payload against the owning editor's shape and limits.
fn validate_section(kind: SectionKind, payload: &Value) -> Result<(), AppError> {
    fn typed<T: serde::de::DeserializeOwned>(
        kind: SectionKind,
        payload: &Value,
    ) -> Result<T, AppError> {
        serde_json::from_value(payload.clone())
            .map_err(|e| AppError::Validation(format!("Malformed {} payload: {}", kind, e)))
    }

    match kind {
        SectionKind::Navbar => typed::<NavbarSection>(kind, payload)?.validate(),
        SectionKind::Carousel => typed::<CarouselSection>(kind, payload)?.validate(),
        SectionKind::Products => typed::<ProductsSection>(kind, payload)?.validate(),
        SectionKind::Form => typed::<FormSection>(kind, payload)?.validate(),
        SectionKind::Content => typed::<ContentSection>(kind, payload)?.validate(),
        SectionKind::Slidercontent => typed::<SliderContentSection>(kind, payload)?.validate(),
        SectionKind::Footer => typed::<FooterSection>(kind, payload)?.validate(),
        SectionKind::Theme => validate_theme(payload),
    }
}

/// GET .../versions/:version/sections/:section - Load one section's data.
///
/// An unconfigured section responds with an empty object; that is a normal
/// state for the editor, not an error.
pub async fn load_section(
    State(state): State<AppState>,
    Path((platform, brand, version, section)): Path<(String, String, String, String)>,
) -> ApiResult<Value> {
    let kind = parse_kind(&section)?;
    let payload = state
        .repo
        .load_section(&platform, &brand, &version, kind)
        .await?;
    success(payload.unwrap_or_else(|| Value::Object(Default::default())))
}

/// PUT .../versions/:version/sections/:section - Overwrite one section's data.
pub async fn save_section(
    State(state): State<AppState>,
    Path((platform, brand, version, section)): Path<(String, String, String, String)>,
    Json(request): Json<SaveSectionRequest>,
) -> ApiResult<()> {
    let kind = parse_kind(&section)?;

    if !request.confirm {
        return Err(AppError::Validation(
            "Saving changes requires confirmation".to_string(),
        ));
    }
    validate_section(kind, &request.payload)?;

    state
        .repo
        .save_section(&platform, &brand, &version, kind, request.payload)
        .await?;

    tracing::info!(
        "Saved section '{}' of {}/{}/{}",
        kind,
        platform,
        brand,
        version
    );
    success(())
}
