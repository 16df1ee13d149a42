//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod emoji_assets;
mod face_detector;
mod image_sink;
mod image_source;
mod progress;
mod result_output;

pub use emoji_assets::EmojiAssets;
pub use face_detector::FaceDetector;
pub use image_sink::ImageSink;
pub use image_source::ImageSource;
pub use progress::{ProgressEvent, ProgressSink};
pub use result_output::ResultOutput;
