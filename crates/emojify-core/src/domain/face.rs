//! Face descriptors produced by an external detector.

use serde::{Deserialize, Serialize};

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Expression probabilities for one detected face.
///
/// Each probability is expected in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceSignal {
    /// Probability that the face is smiling.
    pub smiling_probability: f32,
    /// Probability that the subject's left eye is open.
    pub left_eye_open_probability: f32,
    /// Probability that the subject's right eye is open.
    pub right_eye_open_probability: f32,
}

impl FaceSignal {
    /// Creates a signal from smiling, left-eye-open and right-eye-open probabilities.
    #[must_use]
    pub const fn new(smiling: f32, left_eye_open: f32, right_eye_open: f32) -> Self {
        Self {
            smiling_probability: smiling,
            left_eye_open_probability: left_eye_open,
            right_eye_open_probability: right_eye_open,
        }
    }
}

/// Bounding box of a detected face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceGeometry {
    /// Top-left corner of the box.
    pub position: Point,
    /// Box width in pixels.
    pub width: f32,
    /// Box height in pixels.
    pub height: f32,
}

impl FaceGeometry {
    /// Creates a face box with its top-left corner at `(x, y)`.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Point::new(x, y),
            width,
            height,
        }
    }

    /// Whether the position is finite and both dimensions are finite and
    /// strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// One face as reported by the detector: where it is and how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    /// Face bounding box.
    #[serde(flatten)]
    pub geometry: FaceGeometry,
    /// Expression probabilities.
    #[serde(flatten)]
    pub signal: FaceSignal,
}

impl DetectedFace {
    /// Pairs a geometry with its signal.
    #[must_use]
    pub const fn new(geometry: FaceGeometry, signal: FaceSignal) -> Self {
        Self { geometry, signal }
    }
}
