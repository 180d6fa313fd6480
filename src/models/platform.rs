//! Platform document shapes.
//!
//! One document per platform in the `platforms` collection, keyed by platform
//! name. The document maps brand names to brand records; each brand record
//! holds the active version marker, the append-only version catalog, and one
//! version record per version name flattened alongside the fixed fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A whole platform document: brand name -> brand record.
pub type PlatformDocument = BTreeMap<String, BrandRecord>;

/// A version's template: section name -> free-form section data.
pub type TemplateMap = BTreeMap<String, Value>;

/// Metadata entry in a brand's append-only version catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionMeta {
    pub name: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// One version of a brand's page. `template` maps section name to free-form
/// section data; the repository never inspects the payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub template: TemplateMap,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// A brand entry inside a platform document.
///
/// Version records are keyed by version name at the same nesting level as the
/// fixed fields, so they are captured through `flatten`. Duplicate version
/// names therefore shadow each other in `records` even though `versions`
/// keeps both catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandRecord {
    /// Version currently served on the live path; empty string means
    /// "no live version yet".
    pub activeversion: String,
    pub versions: Vec<VersionMeta>,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(flatten)]
    pub records: BTreeMap<String, VersionRecord>,
}

/// What the versions screen needs to draw a brand: the live marker plus the
/// catalog, without the template payloads.
#[derive(Debug, Clone, Serialize)]
pub struct BrandSummary {
    pub activeversion: String,
    pub versions: Vec<VersionMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_brand_record_roundtrip_keeps_version_records() {
        let doc = json!({
            "activeversion": "v1",
            "versions": [
                {"name": "v1", "createdBy": "a@b.c", "createdAt": "2024-01-01T00:00:00Z"}
            ],
            "createdBy": "a@b.c",
            "createdAt": "2024-01-01T00:00:00Z",
            "v1": {
                "template": {"theme": "#5BE49B"},
                "createdBy": "a@b.c",
                "createdAt": "2024-01-01T00:00:00Z"
            }
        });

        let record: BrandRecord = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(record.activeversion, "v1");
        assert_eq!(record.versions.len(), 1);
        assert!(record.records.contains_key("v1"));
        assert_eq!(
            record.records["v1"].template["theme"],
            Value::String("#5BE49B".into())
        );

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_empty_activeversion_means_no_live_version() {
        let record = BrandRecord {
            activeversion: String::new(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["activeversion"], "");
    }
}
