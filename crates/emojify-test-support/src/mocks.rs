//! Mock implementations of core port traits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use emojify_core::domain::{DetectedFace, Emoji, EmojifyReport, ImageInfo};
use emojify_core::ports::{
    EmojiAssets, FaceDetector, ImageSink, ImageSource, ProgressEvent, ProgressSink, ResultOutput,
};
use emojify_core::EmojifyError;
use image::DynamicImage;

use crate::SyntheticImageBuilder;

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built images, optionally interleaved with load failures.
pub struct MockImageSource {
    images: Vec<Result<ImageInfo, String>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given images.
    #[must_use]
    pub fn new(images: Vec<ImageInfo>) -> Self {
        Self {
            images: images.into_iter().map(Ok).collect(),
        }
    }

    /// Appends an entry that fails to load with `reason`.
    #[must_use]
    pub fn with_failure(mut self, reason: impl Into<String>) -> Self {
        self.images.push(Err(reason.into()));
        self
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_> {
        Box::new(
            self.images
                .iter()
                .map(|entry| entry.clone().map_err(|reason| anyhow::anyhow!(reason))),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len())
    }
}

/// Mock implementation of `FaceDetector` for testing.
///
/// Returns the same faces for every image unless per-path faces are
/// registered, and counts calls for assertions.
pub struct MockFaceDetector {
    faces: Vec<DetectedFace>,
    by_path: HashMap<String, Vec<DetectedFace>>,
    fail: bool,
    call_count: Arc<Mutex<usize>>,
}

impl MockFaceDetector {
    /// Creates a detector that reports `faces` for every image.
    #[must_use]
    pub fn new(faces: Vec<DetectedFace>) -> Self {
        Self {
            faces,
            by_path: HashMap::new(),
            fail: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates a detector that never finds a face.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Creates a detector whose every call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    /// Reports `faces` for the image at `path` instead of the default set.
    #[must_use]
    pub fn with_faces_for(mut self, path: impl Into<String>, faces: Vec<DetectedFace>) -> Self {
        self.by_path.insert(path.into(), faces);
        self
    }

    /// Returns the number of times `detect` was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self
            .call_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl FaceDetector for MockFaceDetector {
    fn detect(&self, image: &ImageInfo) -> anyhow::Result<Vec<DetectedFace>> {
        if let Ok(mut c) = self.call_count.lock() {
            *c += 1;
        }
        if self.fail {
            anyhow::bail!("mock detector failure for {}", image.path);
        }
        Ok(self
            .by_path
            .get(&image.path)
            .unwrap_or(&self.faces)
            .clone())
    }
}

/// Mock implementation of `EmojiAssets` for testing.
pub struct MockAssets {
    stickers: HashMap<Emoji, DynamicImage>,
}

impl MockAssets {
    /// Creates an asset table with no stickers at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            stickers: HashMap::new(),
        }
    }

    /// Maps every category to the same solid sticker.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let sticker = SyntheticImageBuilder::solid_sticker(width, height, rgba);
        Self {
            stickers: Emoji::ALL.iter().map(|&e| (e, sticker.clone())).collect(),
        }
    }

    /// Registers (or replaces) the sticker for one category.
    #[must_use]
    pub fn with(mut self, emoji: Emoji, sticker: DynamicImage) -> Self {
        self.stickers.insert(emoji, sticker);
        self
    }

    /// Removes the sticker for one category.
    #[must_use]
    pub fn without(mut self, emoji: Emoji) -> Self {
        self.stickers.remove(&emoji);
        self
    }
}

impl EmojiAssets for MockAssets {
    fn lookup(&self, emoji: Emoji) -> Result<&DynamicImage, EmojifyError> {
        self.stickers.lookup(emoji)
    }
}

/// Mock implementation of `ImageSink` for testing.
///
/// Captures saved images in memory.
pub struct MockImageSink {
    saved: Arc<Mutex<Vec<(String, DynamicImage)>>>,
}

impl MockImageSink {
    /// Creates a new mock sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all saved `(source_path, image)` pairs.
    #[must_use]
    pub fn saved(&self) -> Vec<(String, DynamicImage)> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockImageSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSink for MockImageSink {
    fn save(&self, source_path: &str, image: &DynamicImage) -> anyhow::Result<String> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((source_path.to_string(), image.clone()));
        Ok(format!("memory://{source_path}"))
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<EmojifyReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<EmojifyReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &EmojifyReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `Completed` events.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Completed { .. }))
            .count()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Finished` event, if any.
    #[must_use]
    pub fn finished_counts(&self) -> Option<(usize, usize)> {
        self.events().iter().find_map(|e| match e {
            ProgressEvent::Finished { processed, skipped } => Some((*processed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
