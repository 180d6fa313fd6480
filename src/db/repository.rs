//! Template repository: the merge/save/load protocol over platform documents.
//!
//! This is the only component that reads or writes a platform document. Every
//! operation is a whole-document read-modify-write with no concurrency token:
//! the store's atomic single-document write protects each cycle against
//! corruption, but two concurrent cycles whose reads both precede either
//! write race, and the later write wins. Last write wins is the contract
//! callers get; see the test at the bottom pinning that behavior.

use chrono::Utc;

use crate::db::{DocumentStore, PLATFORMS_COLLECTION};
use crate::errors::AppError;
use crate::models::{
    BrandRecord, BrandSummary, PlatformDocument, SectionKind, TemplateMap, VersionMeta,
    VersionRecord,
};

/// Free-form per-section payload. The repository stores whatever shape the
/// section editor produced.
pub use serde_json::Value as SectionPayload;

/// Repository for all platform document operations.
#[derive(Clone)]
pub struct TemplateRepository {
    store: DocumentStore,
}

impl TemplateRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Read the whole platform document. `None` when the platform has no
    /// document yet (no brand was ever registered).
    async fn load_platform(&self, platform: &str) -> Result<Option<PlatformDocument>, AppError> {
        match self
            .store
            .get_document(PLATFORMS_COLLECTION, platform)
            .await?
        {
            Some(value) => {
                let doc = serde_json::from_value(value).map_err(|e| {
                    AppError::Store(format!("Corrupt platform document '{}': {}", platform, e))
                })?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Write the whole platform document back, replacing the stored image.
    async fn store_platform(
        &self,
        platform: &str,
        doc: &PlatformDocument,
    ) -> Result<(), AppError> {
        let value = serde_json::to_value(doc)
            .map_err(|e| AppError::Internal(format!("Unserializable platform document: {}", e)))?;
        self.store
            .set_document(PLATFORMS_COLLECTION, platform, &value)
            .await
    }

    /// Read the document and fail with `NotFound` when it does not exist.
    async fn require_platform(&self, platform: &str) -> Result<PlatformDocument, AppError> {
        self.load_platform(platform)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Platform '{}' not found", platform)))
    }

    /// List the brand names registered under a platform.
    pub async fn list_brands(&self, platform: &str) -> Result<Vec<String>, AppError> {
        let doc = self.require_platform(platform).await?;
        Ok(doc.keys().cloned().collect())
    }

    /// Active version marker plus the version catalog for one brand.
    pub async fn brand_summary(
        &self,
        platform: &str,
        brand: &str,
    ) -> Result<BrandSummary, AppError> {
        let doc = self.require_platform(platform).await?;
        let record = brand_record(&doc, platform, brand)?;
        Ok(BrandSummary {
            activeversion: record.activeversion.clone(),
            versions: record.versions.clone(),
        })
    }

    /// Register a brand with its first (empty) version. Fails with `Conflict`
    /// when the brand already exists; creates the platform document on first
    /// registration.
    pub async fn register_brand(
        &self,
        platform: &str,
        brand: &str,
        first_version: &str,
        created_by: &str,
    ) -> Result<(), AppError> {
        let mut doc = self.load_platform(platform).await?.unwrap_or_default();

        if doc.contains_key(brand) {
            return Err(AppError::Conflict(format!(
                "Brand '{}' is already registered",
                brand
            )));
        }

        let now = Utc::now().to_rfc3339();
        let mut record = BrandRecord {
            activeversion: String::new(),
            versions: vec![VersionMeta {
                name: first_version.to_string(),
                created_by: created_by.to_string(),
                created_at: now.clone(),
            }],
            created_by: created_by.to_string(),
            created_at: now.clone(),
            records: Default::default(),
        };
        record.records.insert(
            first_version.to_string(),
            VersionRecord {
                template: Default::default(),
                created_by: created_by.to_string(),
                created_at: now,
            },
        );

        doc.insert(brand.to_string(), record);
        self.store_platform(platform, &doc).await
    }

    /// Append a version to a brand's catalog and create its empty record.
    ///
    /// Name uniqueness is not checked: a duplicate name appends a second
    /// catalog entry while the new record shadows the old one in the map.
    pub async fn register_version(
        &self,
        platform: &str,
        brand: &str,
        version: &str,
        created_by: &str,
    ) -> Result<(), AppError> {
        let mut doc = self.require_platform(platform).await?;
        let record = brand_record_mut(&mut doc, platform, brand)?;

        let now = Utc::now().to_rfc3339();
        record.versions.push(VersionMeta {
            name: version.to_string(),
            created_by: created_by.to_string(),
            created_at: now.clone(),
        });
        record.records.insert(
            version.to_string(),
            VersionRecord {
                template: Default::default(),
                created_by: created_by.to_string(),
                created_at: now,
            },
        );

        self.store_platform(platform, &doc).await
    }

    /// Point the live path at a version. The version record must exist.
    pub async fn set_active_version(
        &self,
        platform: &str,
        brand: &str,
        version: &str,
    ) -> Result<(), AppError> {
        let mut doc = self.require_platform(platform).await?;
        let record = brand_record_mut(&mut doc, platform, brand)?;

        if !record.records.contains_key(version) {
            return Err(AppError::NotFound(format!(
                "Version '{}' not found under brand '{}'",
                version, brand
            )));
        }

        record.activeversion = version.to_string();
        self.store_platform(platform, &doc).await
    }

    /// Remove a version record and its catalog entry in one write. The active
    /// version cannot be deleted.
    pub async fn delete_version(
        &self,
        platform: &str,
        brand: &str,
        version: &str,
    ) -> Result<(), AppError> {
        let mut doc = self.require_platform(platform).await?;
        let record = brand_record_mut(&mut doc, platform, brand)?;

        if record.activeversion == version {
            return Err(AppError::InvalidState(format!(
                "Version '{}' is live; pick another active version before deleting it",
                version
            )));
        }
        if record.records.remove(version).is_none() {
            return Err(AppError::NotFound(format!(
                "Version '{}' not found under brand '{}'",
                version, brand
            )));
        }
        record.versions.retain(|v| v.name != version);

        self.store_platform(platform, &doc).await
    }

    /// Load one section's payload. `None` means the section is not yet
    /// configured, which is a normal state rather than an error.
    pub async fn load_section(
        &self,
        platform: &str,
        brand: &str,
        version: &str,
        kind: SectionKind,
    ) -> Result<Option<SectionPayload>, AppError> {
        let doc = self.require_platform(platform).await?;
        let record = brand_record(&doc, platform, brand)?;
        let version_record = version_record(record, brand, version)?;
        Ok(version_record.template.get(kind.as_str()).cloned())
    }

    /// Overwrite one section's payload, leaving every other section, brand
    /// and version untouched, and write the whole document back.
    ///
    /// No optimistic-concurrency check: a save whose read predates another
    /// editor's write silently discards that write (lost update).
    pub async fn save_section(
        &self,
        platform: &str,
        brand: &str,
        version: &str,
        kind: SectionKind,
        payload: SectionPayload,
    ) -> Result<(), AppError> {
        let mut doc = self.require_platform(platform).await?;
        let record = brand_record_mut(&mut doc, platform, brand)?;
        let version_record = version_record_mut(record, brand, version)?;

        version_record
            .template
            .insert(kind.as_str().to_string(), payload);

        self.store_platform(platform, &doc).await
    }

    /// Load the full template map of a version.
    ///
    /// Live mode (`version == None`) resolves the brand's `activeversion`; an
    /// empty marker means no live version yet and yields an empty template.
    /// Preview mode uses the explicit version and fails with `NotFound` when
    /// it does not exist.
    pub async fn load_template(
        &self,
        platform: &str,
        brand: &str,
        version: Option<&str>,
    ) -> Result<TemplateMap, AppError> {
        let doc = self.require_platform(platform).await?;
        let record = brand_record(&doc, platform, brand)?;

        let name = match version {
            Some(name) => name,
            None if record.activeversion.is_empty() => return Ok(Default::default()),
            None => record.activeversion.as_str(),
        };

        let version_record = version_record(record, brand, name)?;
        Ok(version_record.template.clone())
    }
}

fn brand_record<'a>(
    doc: &'a PlatformDocument,
    platform: &str,
    brand: &str,
) -> Result<&'a BrandRecord, AppError> {
    doc.get(brand).ok_or_else(|| {
        AppError::NotFound(format!(
            "Brand '{}' not found under platform '{}'",
            brand, platform
        ))
    })
}

fn brand_record_mut<'a>(
    doc: &'a mut PlatformDocument,
    platform: &str,
    brand: &str,
) -> Result<&'a mut BrandRecord, AppError> {
    doc.get_mut(brand).ok_or_else(|| {
        AppError::NotFound(format!(
            "Brand '{}' not found under platform '{}'",
            brand, platform
        ))
    })
}

fn version_record<'a>(
    record: &'a BrandRecord,
    brand: &str,
    version: &str,
) -> Result<&'a VersionRecord, AppError> {
    record.records.get(version).ok_or_else(|| {
        AppError::NotFound(format!(
            "Version '{}' not found under brand '{}'",
            version, brand
        ))
    })
}

fn version_record_mut<'a>(
    record: &'a mut BrandRecord,
    brand: &str,
    version: &str,
) -> Result<&'a mut VersionRecord, AppError> {
    record.records.get_mut(version).ok_or_else(|| {
        AppError::NotFound(format!(
            "Version '{}' not found under brand '{}'",
            version, brand
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use serde_json::json;
    use tempfile::TempDir;

    async fn fixture() -> (TemplateRepository, DocumentStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        let store = DocumentStore::new(pool);
        (TemplateRepository::new(store.clone()), store, temp_dir)
    }

    #[tokio::test]
    async fn test_register_brand_conflict_leaves_record_unchanged() {
        let (repo, _store, _dir) = fixture().await;

        repo.register_brand("acme", "Shoes", "v1", "a@b.c")
            .await
            .unwrap();

        let err = repo
            .register_brand("acme", "Shoes", "v2", "x@y.z")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let summary = repo.brand_summary("acme", "Shoes").await.unwrap();
        assert_eq!(summary.versions.len(), 1);
        assert_eq!(summary.versions[0].name, "v1");
        assert_eq!(summary.versions[0].created_by, "a@b.c");
    }

    #[tokio::test]
    async fn test_section_roundtrip_and_sibling_isolation() {
        let (repo, _store, _dir) = fixture().await;

        repo.register_brand("acme", "Shoes", "v1", "a@b.c")
            .await
            .unwrap();

        // Fresh version starts with an empty template
        let template = repo.load_template("acme", "Shoes", Some("v1")).await.unwrap();
        assert!(template.is_empty());

        let navbar = json!({"brandlogo": "url1", "menuitems": {"Home": "/home"}});
        repo.save_section("acme", "Shoes", "v1", SectionKind::Navbar, navbar.clone())
            .await
            .unwrap();

        let loaded = repo
            .load_section("acme", "Shoes", "v1", SectionKind::Navbar)
            .await
            .unwrap();
        assert_eq!(loaded, Some(navbar.clone()));

        // Saving the footer must not disturb the navbar
        repo.save_section(
            "acme",
            "Shoes",
            "v1",
            SectionKind::Footer,
            json!({"headers": {}}),
        )
        .await
        .unwrap();

        let loaded = repo
            .load_section("acme", "Shoes", "v1", SectionKind::Navbar)
            .await
            .unwrap();
        assert_eq!(loaded, Some(navbar));
    }

    #[tokio::test]
    async fn test_unconfigured_section_loads_empty() {
        let (repo, _store, _dir) = fixture().await;

        repo.register_brand("acme", "Shoes", "v1", "a@b.c")
            .await
            .unwrap();

        let loaded = repo
            .load_section("acme", "Shoes", "v1", SectionKind::Carousel)
            .await
            .unwrap();
        assert_eq!(loaded, None);

        let err = repo
            .load_section("acme", "Shoes", "ghost", SectionKind::Carousel)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = repo
            .load_section("acme", "Hats", "v1", SectionKind::Carousel)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_active_version_lifecycle() {
        let (repo, _store, _dir) = fixture().await;

        repo.register_brand("acme", "Shoes", "v1", "a@b.c")
            .await
            .unwrap();
        repo.register_version("acme", "Shoes", "v2", "a@b.c")
            .await
            .unwrap();

        repo.save_section(
            "acme",
            "Shoes",
            "v1",
            SectionKind::Content,
            json!({"sectionTitle": "old"}),
        )
        .await
        .unwrap();
        repo.save_section(
            "acme",
            "Shoes",
            "v2",
            SectionKind::Content,
            json!({"sectionTitle": "new"}),
        )
        .await
        .unwrap();

        // No live version yet: the live template is empty
        let live = repo.load_template("acme", "Shoes", None).await.unwrap();
        assert!(live.is_empty());

        repo.set_active_version("acme", "Shoes", "v1").await.unwrap();
        let live = repo.load_template("acme", "Shoes", None).await.unwrap();
        assert_eq!(live["content"]["sectionTitle"], "old");

        // Switching resolves the new version's template, not the previous one
        repo.set_active_version("acme", "Shoes", "v2").await.unwrap();
        let live = repo.load_template("acme", "Shoes", None).await.unwrap();
        assert_eq!(live["content"]["sectionTitle"], "new");

        let err = repo
            .set_active_version("acme", "Shoes", "ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_active_version_refused() {
        let (repo, _store, _dir) = fixture().await;

        repo.register_brand("acme", "Shoes", "v1", "a@b.c")
            .await
            .unwrap();
        repo.register_version("acme", "Shoes", "v2", "a@b.c")
            .await
            .unwrap();
        repo.set_active_version("acme", "Shoes", "v1").await.unwrap();

        let err = repo
            .delete_version("acme", "Shoes", "v1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        // Document unchanged
        let summary = repo.brand_summary("acme", "Shoes").await.unwrap();
        assert_eq!(summary.activeversion, "v1");
        assert_eq!(summary.versions.len(), 2);

        // Deleting a non-active version removes record and catalog entry
        repo.delete_version("acme", "Shoes", "v2").await.unwrap();
        let summary = repo.brand_summary("acme", "Shoes").await.unwrap();
        assert_eq!(summary.versions.len(), 1);
        let err = repo
            .load_template("acme", "Shoes", Some("v2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_version_names_shadow_in_record_map() {
        let (repo, _store, _dir) = fixture().await;

        repo.register_brand("acme", "Shoes", "v1", "a@b.c")
            .await
            .unwrap();
        repo.save_section(
            "acme",
            "Shoes",
            "v1",
            SectionKind::Content,
            json!({"sectionTitle": "original"}),
        )
        .await
        .unwrap();

        // Same name again: catalog grows, record map shadows the old template
        repo.register_version("acme", "Shoes", "v1", "x@y.z")
            .await
            .unwrap();

        let summary = repo.brand_summary("acme", "Shoes").await.unwrap();
        assert_eq!(summary.versions.len(), 2);

        let template = repo.load_template("acme", "Shoes", Some("v1")).await.unwrap();
        assert!(template.is_empty());
    }

    /// Two editors read the document, then both write. The second write's
    /// snapshot predates the first write, so the first save is silently lost.
    /// This pins the documented last-write-wins behavior; it is not a safety
    /// guarantee.
    #[tokio::test]
    async fn test_lost_update_between_interleaved_saves() {
        let (repo, store, _dir) = fixture().await;

        repo.register_brand("acme", "Shoes", "v1", "a@b.c")
            .await
            .unwrap();

        // Editor B takes its snapshot before editor A writes
        let stale_snapshot = store
            .get_document(PLATFORMS_COLLECTION, "acme")
            .await
            .unwrap()
            .unwrap();

        // Editor A saves the carousel
        repo.save_section(
            "acme",
            "Shoes",
            "v1",
            SectionKind::Carousel,
            json!({"slides": [{"id": "s1", "image": "url"}]}),
        )
        .await
        .unwrap();

        // Editor B merges products into its stale snapshot and writes whole
        let mut doc = stale_snapshot;
        doc["Shoes"]["v1"]["template"]["products"] = json!({"products": []});
        store
            .set_document(PLATFORMS_COLLECTION, "acme", &doc)
            .await
            .unwrap();

        // B's write survives, A's carousel save is gone
        let products = repo
            .load_section("acme", "Shoes", "v1", SectionKind::Products)
            .await
            .unwrap();
        assert!(products.is_some());

        let carousel = repo
            .load_section("acme", "Shoes", "v1", SectionKind::Carousel)
            .await
            .unwrap();
        assert_eq!(carousel, None);
    }
}
