//! Filesystem adapter for writing emojified images.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use emojify_core::ImageSink;
use image::{ColorType, DynamicImage};
use tracing::{debug, warn};

use crate::claims::PathClaims;

/// Suffix appended to the source file stem for output images.
pub const OUTPUT_SUFFIX: &str = "_emojified";

/// Writes `<stem>_emojified.png` files, next to the source or into a directory.
///
/// Two sources with the same stem map to the same output; the later one
/// overwrites the earlier one with a warning.
#[derive(Debug, Default)]
pub struct FsImageSink {
    output_dir: Option<PathBuf>,
    written: PathClaims,
}

impl FsImageSink {
    /// Creates a sink that writes into `output_dir`, or next to each source
    /// image when `None`.
    #[must_use]
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self {
            output_dir,
            written: PathClaims::default(),
        }
    }

    /// Returns the output path for the image at `source_path`.
    #[must_use]
    pub fn output_path(&self, source_path: &Path) -> PathBuf {
        let stem = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("image"));
        let file_name = format!("{stem}{OUTPUT_SUFFIX}.png");

        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => source_path
                .parent()
                .map_or_else(|| PathBuf::from(&file_name), |p| p.join(&file_name)),
        }
    }
}

impl ImageSink for FsImageSink {
    fn save(&self, source_path: &str, image: &DynamicImage) -> Result<String> {
        let path = self.output_path(Path::new(source_path));
        if let Some(earlier) = self.written.claim(&path, source_path) {
            warn!(
                "{} overwrites the output of {earlier}: both write {}",
                source_path,
                path.display()
            );
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }

        // PNG has no float samples.
        let encodable = match image.color() {
            ColorType::Rgb32F | ColorType::Rgba32F => {
                Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16()))
            }
            _ => Cow::Borrowed(image),
        };

        encodable
            .save(&path)
            .with_context(|| format!("Failed to write image: {}", path.display()))?;

        debug!("Wrote {}", path.display());
        Ok(path.to_string_lossy().into_owned())
    }
}
