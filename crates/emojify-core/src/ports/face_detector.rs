//! Face detection port.

use crate::domain::{DetectedFace, ImageInfo};

/// Port for locating faces and their expression signals in an image.
///
/// Detection itself happens outside this crate; implementations adapt
/// whatever detector produced the faces.
pub trait FaceDetector: Send + Sync {
    /// Returns the faces found in `image`, in detection order.
    ///
    /// # Errors
    ///
    /// Returns an error if detection data for the image is unavailable.
    fn detect(&self, image: &ImageInfo) -> anyhow::Result<Vec<DetectedFace>>;
}
