//! Expression classification.
//!
//! Each probability is thresholded into a boolean with a strict `>` comparison,
//! and the resulting triple selects one of the eight [`Emoji`] categories.

use tracing::debug;

use crate::domain::{Emoji, FaceSignal};

/// Smiling probability a face must exceed to count as smiling.
pub const SMILING_THRESHOLD: f32 = 0.15;

/// Eye-open probability an eye must exceed to count as open.
pub const EYE_OPEN_THRESHOLD: f32 = 0.5;

/// Cut-off points for thresholding a [`FaceSignal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum (exclusive) smiling probability.
    pub smiling: f32,
    /// Minimum (exclusive) eye-open probability, applied to each eye.
    pub eye_open: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            smiling: SMILING_THRESHOLD,
            eye_open: EYE_OPEN_THRESHOLD,
        }
    }
}

/// Thresholded expression state of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Expression {
    /// The face is smiling.
    pub smiling: bool,
    /// The subject's left eye is open.
    pub left_eye_open: bool,
    /// The subject's right eye is open.
    pub right_eye_open: bool,
}

impl Expression {
    /// Thresholds a signal. A probability equal to its threshold counts as
    /// not smiling / closed.
    #[must_use]
    pub fn from_signal(signal: &FaceSignal, thresholds: &Thresholds) -> Self {
        Self {
            smiling: signal.smiling_probability > thresholds.smiling,
            left_eye_open: signal.left_eye_open_probability > thresholds.eye_open,
            right_eye_open: signal.right_eye_open_probability > thresholds.eye_open,
        }
    }

    /// The emoji matching this expression.
    #[must_use]
    pub const fn emoji(self) -> Emoji {
        match (self.smiling, self.left_eye_open, self.right_eye_open) {
            (true, true, true) => Emoji::Smiling,
            (false, true, true) => Emoji::Frowning,
            (false, false, false) => Emoji::ClosedEyeFrowning,
            (true, false, false) => Emoji::ClosedEyeSmiling,
            (true, false, true) => Emoji::LeftWink,
            (false, false, true) => Emoji::LeftWinkFrowning,
            (true, true, false) => Emoji::RightWink,
            (false, true, false) => Emoji::RightWinkFrowning,
        }
    }
}

/// Classifies a face using the default thresholds.
#[must_use]
pub fn classify(signal: &FaceSignal) -> Emoji {
    classify_with(signal, &Thresholds::default())
}

/// Classifies a face using custom thresholds.
#[must_use]
pub fn classify_with(signal: &FaceSignal, thresholds: &Thresholds) -> Emoji {
    debug!(
        "smiling={:.3}, left_eye_open={:.3}, right_eye_open={:.3}",
        signal.smiling_probability,
        signal.left_eye_open_probability,
        signal.right_eye_open_probability
    );

    let emoji = Expression::from_signal(signal, thresholds).emoji();
    debug!("Selected emoji: {emoji}");
    emoji
}
