//! Per-image inputs and reports.

use serde::{Deserialize, Serialize};

use super::{Emoji, FaceGeometry};
use crate::compositor::Placement;

/// Report for one processed image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmojifyReport {
    /// Path to the source image.
    pub path: String,
    /// Where the emojified image was written, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Timestamp of processing (ISO 8601).
    pub timestamp: String,
    /// Image dimensions.
    pub dimensions: ImageDimensions,
    /// Per-face outcomes in detection order. Empty when no faces were found.
    pub faces: Vec<FaceReport>,
}

impl EmojifyReport {
    /// Whether the detector found at least one face.
    #[must_use]
    pub fn found_faces(&self) -> bool {
        !self.faces.is_empty()
    }
}

/// Outcome for a single face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceReport {
    /// Category chosen by the classifier.
    pub emoji: Emoji,
    /// Face bounding box as detected.
    pub geometry: FaceGeometry,
    /// Where the sticker was drawn. Absent when it was not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    /// Whether the sticker was drawn.
    pub status: FaceStatus,
}

/// What happened to a face during compositing.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceStatus {
    /// The sticker was drawn over the face.
    Composited,
    /// No artwork exists for the chosen category; the face was left as is.
    AssetMissing,
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A decoded photo and where it came from.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path to the image file.
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: image::DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, reading its dimensions.
    #[must_use]
    pub fn new(path: impl Into<String>, image: image::DynamicImage) -> Self {
        Self {
            path: path.into(),
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    /// Returns the image dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }
}

impl std::ops::Deref for ImageInfo {
    type Target = image::DynamicImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}
