//! User directory over the `users` collection.
//!
//! Admins register users under a brand; the registration touches two
//! documents (the admin's roster and the new user's own record), each with
//! its own whole-document write. There is no cross-document transaction.

use chrono::Utc;

use crate::db::{DocumentStore, USERS_COLLECTION};
use crate::errors::AppError;
use crate::models::{BrandUser, UserDocument};

#[derive(Clone)]
pub struct UserDirectory {
    store: DocumentStore,
}

impl UserDirectory {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Fetch a user document by email.
    pub async fn get_user(&self, email: &str) -> Result<Option<UserDocument>, AppError> {
        match self.store.get_document(USERS_COLLECTION, email).await? {
            Some(value) => {
                let user = serde_json::from_value(value).map_err(|e| {
                    AppError::Store(format!("Corrupt user document '{}': {}", email, e))
                })?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    /// Register a user under a brand on the admin's platform. Updates the
    /// admin's roster and creates the new user's own document.
    pub async fn register_user(
        &self,
        admin_email: &str,
        email: &str,
        designation: &str,
        brand: &str,
    ) -> Result<BrandUser, AppError> {
        let mut admin = self.get_user(admin_email).await?.ok_or_else(|| {
            AppError::NotFound(format!("Admin account '{}' not found", admin_email))
        })?;

        if admin.designation != "Admin" {
            return Err(AppError::InvalidState(format!(
                "Account '{}' cannot register users",
                admin_email
            )));
        }

        let entry = BrandUser {
            email: email.to_string(),
            designation: designation.to_string(),
            brandname: brand.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        admin
            .users
            .entry(brand.to_string())
            .or_default()
            .push(entry.clone());

        let new_user = UserDocument {
            email: email.to_string(),
            platformname: admin.platformname.clone(),
            designation: designation.to_string(),
            brandname: Some(brand.to_string()),
            users: Default::default(),
        };

        self.put_user(&admin).await?;
        self.put_user(&new_user).await?;

        Ok(entry)
    }

    /// Write a user document, replacing any existing image.
    pub async fn put_user(&self, user: &UserDocument) -> Result<(), AppError> {
        let value = serde_json::to_value(user)
            .map_err(|e| AppError::Internal(format!("Unserializable user document: {}", e)))?;
        self.store
            .set_document(USERS_COLLECTION, &user.email, &value)
            .await
    }
}
