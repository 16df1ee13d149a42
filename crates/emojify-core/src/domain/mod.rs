//! Core domain types for emoji overlay.

mod emoji;
mod face;
mod result;

pub use emoji::Emoji;
pub use face::{DetectedFace, FaceGeometry, FaceSignal, Point};
pub use result::{EmojifyReport, FaceReport, FaceStatus, ImageDimensions, ImageInfo};
