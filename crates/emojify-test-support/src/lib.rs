//! Test support utilities for emojify.
//!
//! Provides mocks of the core ports and synthetic image builders for testing
//! the classification and compositing pipeline.
//!
//! # Example
//!
//! ```
//! use emojify_test_support::{MockAssets, MockFaceDetector, SyntheticImageBuilder};
//!
//! // A plain photo with one smiling face
//! let photo = SyntheticImageBuilder::rgb_uniform(200, 200, 40, 40, 40);
//! let detector = MockFaceDetector::new(vec![SyntheticImageBuilder::smiling_face(50.0, 50.0, 100.0)]);
//!
//! // Every category mapped to a solid sticker
//! let assets = MockAssets::solid(16, 16, [255, 200, 0, 255]);
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use mocks::{
    MockAssets, MockFaceDetector, MockImageSink, MockImageSource, MockProgressSink,
    MockResultOutput,
};
