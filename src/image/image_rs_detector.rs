//! # Image Type Detector (image-rs)
//!
//! Provides an [`ImageTypeDetector`] implementation using the [`image`] crate.
//!
//! A MIME type is considered an image when `image` knows a format for it,
//! so the recognized set tracks the codecs the crate understands
//! (JPEG, PNG, GIF, WebP, TIFF, BMP, AVIF, ...).
//!
//! # Example
//! ```rust
//! use wzs_media::image::image_rs_detector::ImageRsDetector;
//! use wzs_media::image::mime::ImageTypeDetector;
//!
//! let detector = ImageRsDetector::default();
//! assert!(detector.is_image("image/png"));
//! assert!(!detector.is_image("application/pdf"));
//! ```

use image::ImageFormat;

use super::mime::{ImageTypeDetector, essence};

/// A concrete implementation of [`ImageTypeDetector`] using the `image` crate.
#[derive(Clone, Debug, Default)]
pub struct ImageRsDetector;

impl ImageRsDetector {
    /// Returns the `image` format registered for `mime_type`, if any.
    pub fn format_for(&self, mime_type: &str) -> Option<ImageFormat> {
        ImageFormat::from_mime_type(essence(mime_type))
    }
}

impl ImageTypeDetector for ImageRsDetector {
    fn is_image(&self, mime_type: &str) -> bool {
        self.format_for(mime_type).is_some()
    }
}
