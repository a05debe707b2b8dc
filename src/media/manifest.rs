//! # Media Manifest
//!
//! Declares collections and conversions as data instead of code, so a
//! registry can be built once at startup from a JSON document.
//!
//! ```json
//! {
//!   "collections": [
//!     {
//!       "name": "logo",
//!       "accepts_mime_types": ["image/jpeg", "image/png"],
//!       "conversions": [
//!         { "name": "admin-panel", "width": 100, "height": 140, "crop": "center" }
//!       ]
//!     }
//!   ],
//!   "conversions": [{ "name": "thumb", "width": 40, "height": 40 }]
//! }
//! ```
//!
//! Acceptance predicates cannot be expressed as data; attach them to the
//! built registry with [`MediaRegistry::add_media_collection`] instead.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::media::RegistrationError;

use super::collection::MediaCollection;
use super::conversion::{ConversionSet, MediaConversion};
use super::registry::MediaRegistry;

/// One collection as declared in a manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionManifest {
    pub name: String,
    #[serde(default)]
    pub accepts_mime_types: Vec<String>,
    #[serde(default)]
    pub conversions: Vec<MediaConversion>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaManifest {
    #[serde(default)]
    pub collections: Vec<CollectionManifest>,
    /// Global conversions.
    #[serde(default)]
    pub conversions: Vec<MediaConversion>,
}

impl MediaManifest {
    /// Parses and validates a manifest, returning the registry it declares.
    pub fn from_json(json: &str) -> Result<MediaRegistry> {
        let manifest: MediaManifest =
            serde_json::from_str(json).context("parse media manifest")?;
        manifest
            .into_registry()
            .context("validate media manifest")
    }

    /// Builds and validates the declared registry.
    pub fn into_registry(self) -> Result<MediaRegistry, RegistrationError> {
        let mut registry = MediaRegistry::new();
        for decl in self.collections {
            let mut collection = MediaCollection::new(decl.name);
            collection
                .accepts_mime_types(&decl.accepts_mime_types)
                .register_media_conversions(|set| {
                    *set = ConversionSet::from(decl.conversions);
                });
            registry.insert_collection(collection);
        }
        *registry.global_conversions_mut() = ConversionSet::from(self.conversions);
        registry.validate()?;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::conversion::CropPosition;
    use crate::rules::dimension::DimensionRuleResolver;

    const LOGO: &str = r#"{
        "collections": [
            {
                "name": "logo",
                "accepts_mime_types": ["image/jpeg", "image/png"],
                "conversions": [
                    { "name": "admin-panel", "width": 100, "height": 140, "crop": "center" },
                    { "name": "mail", "width": 120, "height": 100 }
                ]
            },
            { "name": "docs", "accepts_mime_types": ["application/pdf"] }
        ],
        "conversions": [{ "name": "thumb", "width": 40, "height": 40 }]
    }"#;

    #[test]
    fn manifest_builds_registry() -> anyhow::Result<()> {
        let registry = MediaManifest::from_json(LOGO)?;
        assert_eq!(registry.collection_names(), ["docs", "logo"]);

        let logo = registry.collection("logo").unwrap();
        assert_eq!(logo.conversions().len(), 2);
        assert_eq!(
            logo.conversions().get("admin-panel").and_then(|c| c.crop),
            Some(CropPosition::Center)
        );
        assert_eq!(registry.global_conversions().len(), 1);
        Ok(())
    }

    #[test]
    fn manifest_registry_resolves_rules() -> anyhow::Result<()> {
        let registry = MediaManifest::from_json(LOGO)?;
        let resolver = DimensionRuleResolver::default();
        assert_eq!(
            resolver.resolve_for(&registry, "logo"),
            "dimensions:min_width=120,min_height=140"
        );
        assert_eq!(resolver.resolve_for(&registry, "docs"), "");
        Ok(())
    }

    #[test]
    fn empty_manifest_is_valid() -> anyhow::Result<()> {
        let registry = MediaManifest::from_json("{}")?;
        assert!(registry.collections().is_empty());
        assert!(registry.global_conversions().is_empty());
        Ok(())
    }

    #[test]
    fn malformed_json_reports_parse_context() {
        let err = MediaManifest::from_json("{ not json").unwrap_err();
        assert!(format!("{err:#}").contains("parse media manifest"));
    }

    #[test]
    fn invalid_declarations_are_rejected() {
        let json = r#"{ "collections": [{ "name": "logo" }, { "name": "logo" }] }"#;
        let err = MediaManifest::from_json(json).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("validate media manifest"));
        assert!(msg.contains("registered more than once"));

        let zero = MediaManifest {
            conversions: vec![MediaConversion {
                name: "thumb".into(),
                width: Some(0),
                height: None,
                crop: None,
            }],
            ..MediaManifest::default()
        };
        assert!(matches!(
            zero.into_registry(),
            Err(RegistrationError::ZeroDimension { .. })
        ));
    }
}
