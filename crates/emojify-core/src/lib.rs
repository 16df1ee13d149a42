//! Emojify Core - Domain logic for emoji face overlays
//!
//! This crate contains the domain types, the expression classifier, the
//! sticker compositor, and the ports that connect them to face detectors,
//! sticker artwork, and image storage.

pub mod classifier;
pub mod compositor;
pub mod domain;
mod error;
pub mod pipeline;
pub mod ports;

pub use classifier::{classify, classify_with, Expression, Thresholds};
pub use compositor::{composite, composite_at, Placement};
pub use domain::{
    DetectedFace, Emoji, EmojifyReport, FaceGeometry, FaceReport, FaceSignal, FaceStatus,
    ImageDimensions, ImageInfo, Point,
};
pub use error::EmojifyError;
pub use pipeline::{Emojified, Emojifier};
pub use ports::{
    EmojiAssets, FaceDetector, ImageSink, ImageSource, ProgressEvent, ProgressSink, ResultOutput,
};
