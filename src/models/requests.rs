//! Request bodies for the admin API.
//!
//! Saves that replace stored data carry an explicit `confirm` flag; the
//! handlers reject unconfirmed writes so destructive saves are never silent.

use serde::Deserialize;
use serde_json::Value;

/// POST /api/platforms/:platform/brands
#[derive(Debug, Deserialize)]
pub struct RegisterBrandRequest {
    pub brandname: String,
    pub versionname: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

/// POST /api/platforms/:platform/brands/:brand/versions
#[derive(Debug, Deserialize)]
pub struct RegisterVersionRequest {
    pub versionname: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

/// PUT /api/platforms/:platform/brands/:brand/active-version
#[derive(Debug, Deserialize)]
pub struct SetActiveVersionRequest {
    pub versionname: String,
    #[serde(default)]
    pub confirm: bool,
}

/// PUT /api/platforms/:platform/brands/:brand/versions/:version/sections/:section
#[derive(Debug, Deserialize)]
pub struct SaveSectionRequest {
    pub payload: Value,
    #[serde(default)]
    pub confirm: bool,
}

/// Query flag for DELETE endpoints.
#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// POST /api/users
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub designation: String,
    pub brandname: String,
    /// Email of the admin whose roster the new user lands in.
    #[serde(rename = "registeredBy")]
    pub registered_by: String,
}
