//! # Media Conversions
//!
//! A conversion is a named image-transform preset (a thumbnail, a crop for
//! an admin panel, ...) that may declare the target width and height it
//! produces. Only the declared dimensions matter for validation; the
//! transform itself is carried out elsewhere.
//!
//! # Example
//! ```rust
//! use wzs_media::media::conversion::{CropPosition, MediaConversion};
//!
//! let mut thumb = MediaConversion::new("thumb");
//! thumb.crop(CropPosition::Center, 60, 20);
//!
//! assert_eq!(thumb.width, Some(60));
//! assert_eq!(thumb.height, Some(20));
//! assert!(thumb.has_dimensions());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::media::{Axis, RegistrationError};

/// Anchor used when cropping an image to the target size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CropPosition {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// A named conversion and the dimensions it declares.
///
/// `None` means the axis is unconstrained, not zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConversion {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropPosition>,
}

impl MediaConversion {
    /// Creates a conversion with no declared dimensions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: None,
            height: None,
            crop: None,
        }
    }

    /// Crops to exactly `width` x `height`, anchored at `position`.
    pub fn crop(&mut self, position: CropPosition, width: u32, height: u32) -> &mut Self {
        self.crop = Some(position);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Declares the target width only.
    pub fn width(&mut self, width: u32) -> &mut Self {
        self.width = Some(width);
        self
    }

    /// Declares the target height only.
    pub fn height(&mut self, height: u32) -> &mut Self {
        self.height = Some(height);
        self
    }

    /// Returns `true` if either axis is declared.
    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }

    /// Checks the declaration: non-empty name and no zero-sized axis.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationError::EmptyName { kind: "conversion" });
        }
        for (axis, value) in [(Axis::Width, self.width), (Axis::Height, self.height)] {
            if value == Some(0) {
                return Err(RegistrationError::ZeroDimension {
                    conversion: self.name.clone(),
                    axis,
                });
            }
        }
        Ok(())
    }
}

/// An ordered list of conversions, either global or scoped to one collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionSet {
    conversions: Vec<MediaConversion>,
}

impl ConversionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new conversion and returns it for further declaration.
    pub fn add_media_conversion(&mut self, name: impl Into<String>) -> &mut MediaConversion {
        self.conversions.push(MediaConversion::new(name));
        let last = self.conversions.len() - 1;
        &mut self.conversions[last]
    }

    /// Finds the first conversion named `name`.
    pub fn get(&self, name: &str) -> Option<&MediaConversion> {
        self.conversions.iter().find(|c| c.name == name)
    }

    /// Conversions in declaration order.
    pub fn as_slice(&self) -> &[MediaConversion] {
        &self.conversions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MediaConversion> {
        self.conversions.iter()
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    /// Validates every conversion, stopping at the first error.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        self.conversions.iter().try_for_each(MediaConversion::validate)
    }
}

impl From<Vec<MediaConversion>> for ConversionSet {
    fn from(conversions: Vec<MediaConversion>) -> Self {
        Self { conversions }
    }
}

impl<'a> IntoIterator for &'a ConversionSet {
    type Item = &'a MediaConversion;
    type IntoIter = std::slice::Iter<'a, MediaConversion>;

    fn into_iter(self) -> Self::IntoIter {
        self.conversions.iter()
    }
}
