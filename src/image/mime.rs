//! # Image MIME-Type Detection
//!
//! Defines the capability used to decide whether a MIME type denotes an image.
//!
//! This module provides:
//! - [`ImageTypeDetector`]: a trait abstraction so that the rule resolver
//!   does not depend on any particular MIME registry.
//! - [`StaticImageMimeTypes`]: a detector backed by a fixed list of types.
//!
//! Any `Fn(&str) -> bool` closure is also a detector, which keeps tests small.
//!
//! # Example
//! ```rust
//! use wzs_media::image::mime::{ImageTypeDetector, StaticImageMimeTypes};
//!
//! let detector = StaticImageMimeTypes::default();
//! assert!(detector.is_image("image/png"));
//! assert!(!detector.is_image("application/pdf"));
//!
//! let only_png = |mime: &str| mime == "image/png";
//! assert!(!only_png.is_image("image/gif"));
//! ```

/// Trait deciding whether a MIME type is a recognized image type.
pub trait ImageTypeDetector: Send + Sync {
    /// Returns `true` if `mime_type` denotes an image.
    fn is_image(&self, mime_type: &str) -> bool;
}

impl<F> ImageTypeDetector for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_image(&self, mime_type: &str) -> bool {
        self(mime_type)
    }
}

/// Image types recognized by [`StaticImageMimeTypes::default`].
pub const DEFAULT_IMAGE_MIME_TYPES: &[&str] = &[
    "image/avif",
    "image/bmp",
    "image/gif",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/svg+xml",
    "image/tiff",
    "image/webp",
];

/// Lowercases a MIME type and strips any `;` parameters.
pub fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Detector backed by a fixed list of MIME types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticImageMimeTypes {
    types: Vec<String>,
}

impl StaticImageMimeTypes {
    /// Builds a detector recognizing exactly `types`.
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            types: types.into_iter().map(|t| essence(t.as_ref())).collect(),
        }
    }

    /// Adds further recognized types, e.g. from configuration.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for t in extra {
            let t = essence(t.as_ref());
            if !t.is_empty() && !self.types.contains(&t) {
                self.types.push(t);
            }
        }
        self
    }

}

impl Default for StaticImageMimeTypes {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_MIME_TYPES)
    }
}

impl ImageTypeDetector for StaticImageMimeTypes {
    fn is_image(&self, mime_type: &str) -> bool {
        let mime = essence(mime_type);
        self.types.iter().any(|t| *t == mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn default_list_detects_common_images() {
        let d = StaticImageMimeTypes::default();
        assert!(d.is_image("image/jpeg"));
        assert!(d.is_image("image/png"));
        assert!(d.is_image("image/webp"));
        assert!(!d.is_image("application/pdf"));
        assert!(!d.is_image("text/plain"));
    }

    #[test]
    fn detection_ignores_case_and_parameters() {
        let d = StaticImageMimeTypes::default();
        assert!(d.is_image("IMAGE/PNG"));
        assert!(d.is_image(" image/jpeg; charset=binary"));
    }

    #[test]
    fn with_extra_adds_types_once() {
        let d = StaticImageMimeTypes::new(["image/png"]).with_extra(["image/heic", "IMAGE/HEIC", ""]);
        assert_eq!(d, StaticImageMimeTypes::new(["image/png", "image/heic"]));
        assert!(d.is_image("image/heic"));
    }

    #[test]
    fn closures_are_detectors() {
        let never = |_: &str| false;
        assert!(!never.is_image("image/png"));

        let shared: Arc<dyn ImageTypeDetector> = Arc::new(|m: &str| m.starts_with("image/"));
        assert!(shared.is_image("image/tiff"));
    }

    fn assert_send_sync<T: ?Sized + Send + Sync>() {}
    #[test]
    fn dyn_detector_is_send_sync() {
        assert_send_sync::<dyn ImageTypeDetector>();
    }
}
