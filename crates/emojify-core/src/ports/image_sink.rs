//! Image sink port for persisting emojified images.

use image::DynamicImage;

/// Port for storing a processed image.
pub trait ImageSink: Send + Sync {
    /// Stores `image`, produced from the photo at `source_path`.
    ///
    /// Returns a description of where the image went (typically a path).
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be stored.
    fn save(&self, source_path: &str, image: &DynamicImage) -> anyhow::Result<String>;
}
