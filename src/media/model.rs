//! # Models With Media
//!
//! [`HasMedia`] is implemented by any model that carries media. The model
//! declares its collections and global conversions; the trait derives the
//! registry and the validation rules from those declarations.
//!
//! # Example
//! ```rust
//! use wzs_media::media::conversion::{ConversionSet, CropPosition};
//! use wzs_media::media::model::HasMedia;
//! use wzs_media::media::registry::MediaRegistry;
//!
//! struct Company;
//!
//! impl HasMedia for Company {
//!     fn register_media_collections(&self, registry: &mut MediaRegistry) {
//!         registry
//!             .add_media_collection("logo")
//!             .accepts_mime_types(["image/jpeg", "image/png"]);
//!     }
//!
//!     fn register_media_conversions(&self, conversions: &mut ConversionSet) {
//!         conversions
//!             .add_media_conversion("thumb")
//!             .crop(CropPosition::Center, 60, 20);
//!     }
//! }
//!
//! assert_eq!(
//!     Company.dimension_validation_rules("logo"),
//!     "dimensions:min_width=60,min_height=20"
//! );
//! ```

use tracing::warn;

use crate::error::media::RegistrationError;
use crate::rules::dimension::DimensionRuleResolver;

use super::conversion::ConversionSet;
use super::registry::MediaRegistry;

pub trait HasMedia {
    /// Declares the model's media collections.
    fn register_media_collections(&self, _registry: &mut MediaRegistry) {}

    /// Declares conversions that apply to every collection without its own.
    fn register_media_conversions(&self, _conversions: &mut ConversionSet) {}

    /// Runs both declaration hooks without validating the result.
    fn declared_media(&self) -> MediaRegistry {
        let mut registry = MediaRegistry::new();
        self.register_media_collections(&mut registry);
        self.register_media_conversions(registry.global_conversions_mut());
        registry
    }

    /// Runs both declaration hooks and validates every declaration.
    fn media_registry(&self) -> Result<MediaRegistry, RegistrationError> {
        let registry = self.declared_media();
        registry.validate()?;
        Ok(registry)
    }

    /// Dimension rule for uploads into `collection_name`, using the default resolver.
    fn dimension_validation_rules(&self, collection_name: &str) -> String {
        self.dimension_validation_rules_with(&DimensionRuleResolver::default(), collection_name)
    }

    /// Dimension rule for uploads into `collection_name`.
    ///
    /// Yields no rule only when the collection itself or one of the
    /// conversions applying to it is invalid; problems elsewhere in the
    /// model are reported by [`media_registry`](Self::media_registry).
    fn dimension_validation_rules_with(
        &self,
        resolver: &DimensionRuleResolver,
        collection_name: &str,
    ) -> String {
        let registry = self.declared_media();
        match registry.validate_for(collection_name, resolver.policy()) {
            Ok(()) => resolver.resolve_for(&registry, collection_name),
            Err(err) => {
                warn!(error = %err, collection = collection_name, "invalid media registration");
                String::new()
            }
        }
    }
}
