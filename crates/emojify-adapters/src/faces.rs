//! Face manifest adapter.
//!
//! Face detection runs outside emojify. The detector's output for `photo.jpg`
//! is read from a `photo.faces.json` manifest, either next to the photo or in
//! a dedicated manifest directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use emojify_core::{DetectedFace, FaceDetector, ImageInfo};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::claims::PathClaims;

/// Suffix appended to a photo's file stem to locate its manifest.
pub const MANIFEST_SUFFIX: &str = ".faces.json";

/// Faces detected in one photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceManifest {
    /// Faces in detection order.
    pub faces: Vec<DetectedFace>,
}

impl FaceManifest {
    /// Parses a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid face manifest")
    }

    /// Reads a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read face manifest: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("In {}", path.display()))
    }
}

/// `FaceDetector` backed by JSON manifests on disk.
///
/// Manifests are found by file stem, so `party.jpg` and `party.png` share
/// one; reading it for a second photo is warned about.
#[derive(Debug, Default)]
pub struct ManifestFaceDetector {
    manifest_dir: Option<PathBuf>,
    read: PathClaims,
}

impl ManifestFaceDetector {
    /// Looks for each manifest next to its photo.
    #[must_use]
    pub fn sidecar() -> Self {
        Self::default()
    }

    /// Looks for every manifest in `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            manifest_dir: Some(dir.into()),
            read: PathClaims::default(),
        }
    }

    /// Returns the manifest path for the photo at `image_path`.
    #[must_use]
    pub fn manifest_path(&self, image_path: &Path) -> PathBuf {
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = format!("{stem}{MANIFEST_SUFFIX}");

        match &self.manifest_dir {
            Some(dir) => dir.join(file_name),
            None => image_path
                .parent()
                .map_or_else(|| PathBuf::from(&file_name), |p| p.join(&file_name)),
        }
    }
}

impl FaceDetector for ManifestFaceDetector {
    fn detect(&self, image: &ImageInfo) -> Result<Vec<DetectedFace>> {
        let path = self.manifest_path(Path::new(&image.path));
        debug!("Reading faces for {} from {}", image.path, path.display());
        if let Some(earlier) = self.read.claim(&path, &image.path) {
            warn!(
                "{} shares face manifest {} with {earlier}",
                image.path,
                path.display()
            );
        }

        let manifest = FaceManifest::load(&path)?;

        for (index, face) in manifest.faces.iter().enumerate() {
            let s = &face.signal;
            let probabilities = [
                s.smiling_probability,
                s.left_eye_open_probability,
                s.right_eye_open_probability,
            ];
            if probabilities.iter().any(|p| !(0.0..=1.0).contains(p)) {
                warn!(
                    "{}: face {index} has probabilities outside 0.0-1.0: {probabilities:?}",
                    path.display()
                );
            }
        }

        Ok(manifest.faces)
    }
}
