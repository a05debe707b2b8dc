//! # wzs_media
//!
//! Media attachment declarations for models and the validation rules
//! derived from them.
//!
//! This crate provides:
//! - Declarative media collections and conversions (`media`)
//! - Image MIME-type detection backends (`image`)
//! - Dimension validation rules derived from declared conversions (`rules`)
//! - Environment-driven configuration (`config`)
//!
//! ## Example usage (in another crate)
//!
//! ```rust
//! use wzs_media::media::conversion::CropPosition;
//! use wzs_media::media::registry::MediaRegistry;
//! use wzs_media::rules::dimension::DimensionRuleResolver;
//!
//! let mut registry = MediaRegistry::new();
//! registry
//!     .add_media_collection("logo")
//!     .accepts_mime_types(["image/jpeg", "image/png"]);
//! registry
//!     .add_media_conversion("thumb")
//!     .crop(CropPosition::Center, 60, 20);
//!
//! let resolver = DimensionRuleResolver::default();
//! assert_eq!(
//!     resolver.resolve_for(&registry, "logo"),
//!     "dimensions:min_width=60,min_height=20"
//! );
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use anyhow;
pub use dotenvy;
pub use serde;
pub use serde_json;

// ===============================
// Public modules
// ===============================
pub mod config;
pub mod error;
pub mod image;
pub mod media;
pub mod rules;
