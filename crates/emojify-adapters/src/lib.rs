//! Emojify Adapters - External adapters for emojify.
//!
//! This crate provides adapters for:
//! - Filesystem photo source
//! - Face manifests written by an external detector
//! - Emoji sticker artwork on disk
//! - Writing emojified images

pub mod assets;
mod claims;
pub mod faces;
pub mod fs;
pub mod sink;

pub use assets::{default_assets_dir, AssetLibrary, AssetStatus};
pub use faces::{FaceManifest, ManifestFaceDetector};
pub use fs::FsImageSource;
pub use sink::FsImageSink;
