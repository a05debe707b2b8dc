//! # Media Registry
//!
//! Holds everything a model declares about its media: the collections,
//! keyed by name, and the global conversions that apply to every
//! collection lacking conversions of its own.
//!
//! The registry is filled once (usually by [`HasMedia`](super::model::HasMedia))
//! and read afterwards; it is `Send + Sync` and can be shared freely.

use std::collections::{HashMap, hash_map::Entry};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::media::{ConfigError, RegistrationError};
use crate::rules::dimension::effective_conversions;

use super::collection::MediaCollection;
use super::conversion::{ConversionSet, MediaConversion};

/// How collection-scoped conversions combine with global ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopePolicy {
    /// Scoped conversions, when present, replace the global ones entirely.
    #[default]
    Override,
    /// Scoped and global conversions are considered together.
    Merge,
}

impl std::str::FromStr for ScopePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "override" => Ok(ScopePolicy::Override),
            "merge" => Ok(ScopePolicy::Merge),
            other => Err(ConfigError::UnknownScopePolicy(other.to_string())),
        }
    }
}

/// Where the conversions used for a collection came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionScope {
    Global,
    Collection(String),
}

/// The conversions that apply to one collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConversions<'a> {
    pub scope: ConversionScope,
    pub conversions: Vec<&'a MediaConversion>,
}

#[derive(Clone, Debug, Default)]
pub struct MediaRegistry {
    collections: HashMap<String, MediaCollection>,
    global: ConversionSet,
    duplicates: Vec<String>,
}

impl MediaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection and returns it for further declaration.
    ///
    /// Registering the same name twice replaces the first declaration and
    /// makes [`validate`](Self::validate) fail.
    pub fn add_media_collection(&mut self, name: impl Into<String>) -> &mut MediaCollection {
        match self.collections.entry(name.into()) {
            Entry::Occupied(mut entry) => {
                warn!(collection = %entry.key(), "media collection registered twice, replacing");
                self.duplicates.push(entry.key().clone());
                entry.insert(MediaCollection::new(entry.key().clone()));
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                let collection = MediaCollection::new(entry.key().clone());
                entry.insert(collection)
            }
        }
    }

    /// Registers a global conversion and returns it for further declaration.
    pub fn add_media_conversion(&mut self, name: impl Into<String>) -> &mut MediaConversion {
        self.global.add_media_conversion(name)
    }

    /// Registers an already built collection, keyed by its name.
    pub fn insert_collection(&mut self, collection: MediaCollection) {
        let name = collection.name().to_string();
        if self.collections.insert(name.clone(), collection).is_some() {
            self.duplicates.push(name);
        }
    }

    /// Conversions declared outside any collection.
    pub fn global_conversions(&self) -> &ConversionSet {
        &self.global
    }

    /// Mutable access to the global conversions, for declaration hooks.
    pub fn global_conversions_mut(&mut self) -> &mut ConversionSet {
        &mut self.global
    }

    /// Looks up a collection by name.
    pub fn collection(&self, name: &str) -> Option<&MediaCollection> {
        self.collections.get(name)
    }

    /// All collections, keyed by name.
    pub fn collections(&self) -> &HashMap<String, MediaCollection> {
        &self.collections
    }

    /// Collection names in sorted order.
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the conversions that apply to `collection_name`, or `None`
    /// if no such collection is registered.
    pub fn effective_conversions(
        &self,
        collection_name: &str,
        policy: ScopePolicy,
    ) -> Option<EffectiveConversions<'_>> {
        self.collection(collection_name)
            .map(|c| effective_conversions(c, self.global.as_slice(), policy))
    }

    /// Checks every declaration and reports the first problem found.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if let Some(name) = self.duplicates.first() {
            return Err(RegistrationError::DuplicateCollection(name.clone()));
        }
        self.global.validate()?;
        for name in self.collection_names() {
            if let Some(c) = self.collections.get(name) {
                c.validate()?;
            }
        }
        Ok(())
    }

    /// Checks only what the rule for `collection_name` depends on: the
    /// collection itself and the conversions that apply to it.
    ///
    /// An unregistered collection is valid; it simply has no rule.
    pub fn validate_for(
        &self,
        collection_name: &str,
        policy: ScopePolicy,
    ) -> Result<(), RegistrationError> {
        if self.duplicates.iter().any(|d| d == collection_name) {
            return Err(RegistrationError::DuplicateCollection(
                collection_name.to_string(),
            ));
        }
        let Some(collection) = self.collection(collection_name) else {
            return Ok(());
        };
        if collection.name().trim().is_empty() {
            return Err(RegistrationError::EmptyName { kind: "collection" });
        }
        effective_conversions(collection, self.global.as_slice(), policy)
            .conversions
            .into_iter()
            .try_for_each(MediaConversion::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::conversion::CropPosition;

    fn logo_registry() -> MediaRegistry {
        let mut r = MediaRegistry::new();
        r.add_media_collection("logo")
            .accepts_mime_types(["image/jpeg", "image/png"])
            .register_media_conversions(|set| {
                set.add_media_conversion("admin-panel").crop(CropPosition::Center, 100, 140);
            });
        r.add_media_collection("avatar");
        r.add_media_conversion("thumb").crop(CropPosition::Center, 40, 40);
        r
    }

    #[test]
    fn collections_are_looked_up_by_name() {
        let r = logo_registry();
        assert_eq!(r.collection_names(), ["avatar", "logo"]);
        assert!(r.collection("logo").is_some());
        assert!(r.collection("banner").is_none());
        assert_eq!(r.global_conversions().len(), 1);
    }

    #[test]
    fn scoped_conversions_override_globals() {
        let r = logo_registry();
        let eff = r.effective_conversions("logo", ScopePolicy::Override).unwrap();
        assert_eq!(eff.scope, ConversionScope::Collection("logo".into()));
        let names: Vec<_> = eff.conversions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["admin-panel"]);
    }

    #[test]
    fn merge_policy_includes_globals() {
        let r = logo_registry();
        let eff = r.effective_conversions("logo", ScopePolicy::Merge).unwrap();
        let names: Vec<_> = eff.conversions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["thumb", "admin-panel"]);
    }

    #[test]
    fn collections_without_own_conversions_use_globals() {
        let r = logo_registry();
        let eff = r.effective_conversions("avatar", ScopePolicy::Override).unwrap();
        assert_eq!(eff.scope, ConversionScope::Global);
        assert_eq!(eff.conversions.len(), 1);
        assert!(r.effective_conversions("banner", ScopePolicy::Override).is_none());
    }

    #[test]
    fn duplicate_collection_replaces_and_fails_validation() {
        let mut r = MediaRegistry::new();
        r.add_media_collection("logo").accepts_mime_types(["application/pdf"]);
        r.add_media_collection("logo");

        assert!(r.collection("logo").unwrap().accepted_mime_types().is_empty());
        assert_eq!(
            r.validate(),
            Err(RegistrationError::DuplicateCollection("logo".into()))
        );
    }

    #[test]
    fn validate_reports_zero_sized_global_conversion() {
        let mut r = logo_registry();
        r.add_media_conversion("broken").width(0);
        assert!(matches!(
            r.validate(),
            Err(RegistrationError::ZeroDimension { .. })
        ));
        assert!(logo_registry().validate().is_ok());
    }

    #[test]
    fn validate_for_ignores_unrelated_collections() {
        let mut r = logo_registry();
        r.add_media_collection("docs");
        r.add_media_collection("docs");

        assert!(r.validate().is_err());
        assert!(r.validate_for("logo", ScopePolicy::Override).is_ok());
        assert!(r.validate_for("avatar", ScopePolicy::Override).is_ok());
        assert_eq!(
            r.validate_for("docs", ScopePolicy::Override),
            Err(RegistrationError::DuplicateCollection("docs".into()))
        );
        assert!(r.validate_for("banner", ScopePolicy::Override).is_ok());
    }

    #[test]
    fn validate_for_checks_effective_conversions_only() {
        let mut r = logo_registry();
        r.add_media_conversion("broken").height(0);

        // logo's own conversions shadow the globals unless merged
        assert!(r.validate_for("logo", ScopePolicy::Override).is_ok());
        assert!(matches!(
            r.validate_for("logo", ScopePolicy::Merge),
            Err(RegistrationError::ZeroDimension { .. })
        ));
        assert!(matches!(
            r.validate_for("avatar", ScopePolicy::Override),
            Err(RegistrationError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn scope_policy_parses_case_insensitively() {
        assert_eq!("Merge".parse::<ScopePolicy>(), Ok(ScopePolicy::Merge));
        assert_eq!(" override ".parse::<ScopePolicy>(), Ok(ScopePolicy::Override));
        assert!("both".parse::<ScopePolicy>().is_err());
        assert_eq!(ScopePolicy::default(), ScopePolicy::Override);
    }
}
