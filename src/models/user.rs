//! User directory shapes.
//!
//! One document per email in the `users` collection. Admin accounts carry a
//! per-brand roster of the users they registered.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A document in the `users` collection, keyed by email.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    pub email: String,
    pub platformname: String,
    /// `Admin` or `User`; gates which routes the UI exposes.
    pub designation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brandname: Option<String>,
    /// brand name -> users registered under that brand (admin documents only).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub users: BTreeMap<String, Vec<BrandUser>>,
}

/// Roster entry under an admin's brand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandUser {
    pub email: String,
    pub designation: String,
    pub brandname: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}
