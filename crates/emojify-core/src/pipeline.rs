//! Per-image orchestration: detect, classify, look up, composite.

use anyhow::{Context, Result};
use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::classifier::{classify_with, Thresholds};
use crate::compositor::{composite_at, Placement};
use crate::domain::{DetectedFace, FaceReport, FaceStatus, ImageInfo};
use crate::error::EmojifyError;
use crate::ports::{EmojiAssets, FaceDetector};

/// An emojified image together with what happened to each face.
#[derive(Debug, Clone)]
pub struct Emojified {
    /// The resulting image. Identical to the input when nothing was drawn.
    pub image: DynamicImage,
    /// Per-face outcomes in detection order.
    pub faces: Vec<FaceReport>,
}

impl Emojified {
    /// Whether any face was detected.
    #[must_use]
    pub fn found_faces(&self) -> bool {
        !self.faces.is_empty()
    }

    /// Number of faces that received a sticker.
    #[must_use]
    pub fn composited_count(&self) -> usize {
        self.faces
            .iter()
            .filter(|f| f.status == FaceStatus::Composited)
            .count()
    }
}

/// Overlays a matching emoji on every face a detector reports.
pub struct Emojifier {
    detector: Box<dyn FaceDetector>,
    assets: Box<dyn EmojiAssets>,
    thresholds: Thresholds,
}

impl Emojifier {
    /// Creates an emojifier with the default classification thresholds.
    #[must_use]
    pub fn new(detector: Box<dyn FaceDetector>, assets: Box<dyn EmojiAssets>) -> Self {
        Self {
            detector,
            assets,
            thresholds: Thresholds::default(),
        }
    }

    /// Replaces the classification thresholds.
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Returns the classification thresholds in use.
    #[must_use]
    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Detects faces in `image` and overlays an emoji on each.
    ///
    /// # Errors
    ///
    /// Returns an error if detection fails or a face has invalid geometry.
    pub fn emojify(&self, image: &ImageInfo) -> Result<Emojified> {
        let faces = self
            .detector
            .detect(image)
            .with_context(|| format!("Face detection failed for {}", image.path))?;

        debug!("{}: number of faces = {}", image.path, faces.len());

        if faces.is_empty() {
            info!("No faces found in {}", image.path);
        }

        self.emojify_faces(&image.image, &faces)
            .with_context(|| format!("Failed to composite {}", image.path))
    }

    /// Overlays an emoji on each of `faces`, in order, starting from `image`.
    ///
    /// Each sticker is drawn onto the result of the previous one, so
    /// overlapping stickers occlude in detection order. Faces whose artwork is
    /// missing are reported and left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EmojifyError::InvalidGeometry`] if a face or sticker has a
    /// non-positive dimension.
    pub fn emojify_faces(
        &self,
        image: &DynamicImage,
        faces: &[DetectedFace],
    ) -> Result<Emojified, EmojifyError> {
        let mut result = image.clone();
        let mut reports = Vec::with_capacity(faces.len());

        for (index, face) in faces.iter().enumerate() {
            let emoji = classify_with(&face.signal, &self.thresholds);

            let sticker = match self.assets.lookup(emoji) {
                Ok(sticker) => sticker,
                Err(EmojifyError::AssetMissing(missing)) => {
                    warn!("Face {index}: no sticker for {missing}, leaving face as is");
                    reports.push(FaceReport {
                        emoji,
                        geometry: face.geometry,
                        placement: None,
                        status: FaceStatus::AssetMissing,
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let placement = Placement::compute(sticker.width(), sticker.height(), &face.geometry)?;
            result = composite_at(&result, sticker, &placement)?;

            debug!(
                "Face {index}: drew {emoji} at ({:.1}, {:.1}) size {}x{}",
                placement.x, placement.y, placement.width, placement.height
            );

            reports.push(FaceReport {
                emoji,
                geometry: face.geometry,
                placement: Some(placement),
                status: FaceStatus::Composited,
            });
        }

        Ok(Emojified {
            image: result,
            faces: reports,
        })
    }
}
