//! # Media Collections
//!
//! A collection is a named bucket of files on a model (`"logo"`, `"avatar"`).
//! It restricts which MIME types it accepts, may carry an acceptance
//! predicate, and may declare conversions of its own that take precedence
//! over the model's global conversions.
//!
//! # Example
//! ```rust
//! use wzs_media::media::collection::{MediaCollection, MediaFile};
//! use wzs_media::media::conversion::CropPosition;
//!
//! let mut logo = MediaCollection::new("logo");
//! logo.accepts_mime_types(["image/jpeg", "image/png"])
//!     .register_media_conversions(|set| {
//!         set.add_media_conversion("admin-panel")
//!             .crop(CropPosition::Center, 100, 140);
//!     });
//!
//! assert!(logo.accepts(&MediaFile::new("a.png", "image/png", 10)));
//! assert!(!logo.accepts(&MediaFile::new("a.pdf", "application/pdf", 10)));
//! assert_eq!(logo.conversions().len(), 1);
//! ```

use std::{fmt, sync::Arc};

use crate::error::media::RegistrationError;
use crate::image::mime::{ImageTypeDetector, essence};

use super::conversion::ConversionSet;

/// A file offered to a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl MediaFile {
    /// Describes a file by name, MIME type and size in bytes.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Predicate deciding whether a file may be added to a collection.
pub type AcceptsFile = Arc<dyn Fn(&MediaFile) -> bool + Send + Sync>;

/// A named collection with its MIME restriction, optional acceptance
/// predicate and scoped conversions.
#[derive(Clone)]
pub struct MediaCollection {
    name: String,
    accepted_mime_types: Vec<String>,
    accepts_file: Option<AcceptsFile>,
    conversions: ConversionSet,
}

impl MediaCollection {
    /// Creates an unrestricted collection without conversions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accepted_mime_types: Vec::new(),
            accepts_file: None,
            conversions: ConversionSet::new(),
        }
    }

    /// Restricts the collection to the given MIME types.
    ///
    /// An empty list (the default) accepts any type.
    pub fn accepts_mime_types<I, S>(&mut self, mime_types: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.accepted_mime_types = mime_types
            .into_iter()
            .map(|m| essence(m.as_ref()))
            .collect();
        self
    }

    /// Sets the predicate consulted by [`accepts`](Self::accepts).
    pub fn accepts_file<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&MediaFile) -> bool + Send + Sync + 'static,
    {
        self.accepts_file = Some(Arc::new(predicate));
        self
    }

    /// Declares the conversions scoped to this collection.
    pub fn register_media_conversions<F>(&mut self, declare: F) -> &mut Self
    where
        F: FnOnce(&mut ConversionSet),
    {
        declare(&mut self.conversions);
        self
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted MIME types, normalized; empty means any.
    pub fn accepted_mime_types(&self) -> &[String] {
        &self.accepted_mime_types
    }

    /// Conversions scoped to this collection.
    pub fn conversions(&self) -> &ConversionSet {
        &self.conversions
    }

    /// Returns `true` if the collection declares conversions of its own.
    pub fn has_conversions(&self) -> bool {
        !self.conversions.is_empty()
    }

    /// Returns `true` if the collection may hold images.
    ///
    /// A collection without a MIME restriction accepts images too.
    pub fn accepts_images(&self, detector: &dyn ImageTypeDetector) -> bool {
        self.accepted_mime_types.is_empty()
            || self.accepted_mime_types.iter().any(|m| detector.is_image(m))
    }

    /// Applies the MIME restriction and then the acceptance predicate.
    pub fn accepts(&self, file: &MediaFile) -> bool {
        let mime = essence(&file.mime_type);
        let mime_ok =
            self.accepted_mime_types.is_empty() || self.accepted_mime_types.contains(&mime);
        mime_ok && self.accepts_file.as_ref().is_none_or(|accept| accept(file))
    }

    /// Checks the name and every scoped conversion.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationError::EmptyName { kind: "collection" });
        }
        self.conversions.validate()
    }
}

impl fmt::Debug for MediaCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaCollection")
            .field("name", &self.name)
            .field("accepted_mime_types", &self.accepted_mime_types)
            .field("accepts_file", &self.accepts_file.is_some())
            .field("conversions", &self.conversions)
            .finish()
    }
}
