//! Emoji categories selected from a face's expression.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the eight expression classes an emoji sticker can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emoji {
    /// Smiling with both eyes open.
    Smiling,
    /// Not smiling, both eyes open.
    Frowning,
    /// Smiling with the left eye closed.
    LeftWink,
    /// Smiling with the right eye closed.
    RightWink,
    /// Smiling with both eyes closed.
    ClosedEyeSmiling,
    /// Not smiling, both eyes closed.
    ClosedEyeFrowning,
    /// Not smiling, left eye closed.
    LeftWinkFrowning,
    /// Not smiling, right eye closed.
    RightWinkFrowning,
}

impl Emoji {
    /// Every category, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Smiling,
        Self::Frowning,
        Self::LeftWink,
        Self::RightWink,
        Self::ClosedEyeSmiling,
        Self::ClosedEyeFrowning,
        Self::LeftWinkFrowning,
        Self::RightWinkFrowning,
    ];

    /// Stable `snake_case` name, matching the serialized form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Smiling => "smiling",
            Self::Frowning => "frowning",
            Self::LeftWink => "left_wink",
            Self::RightWink => "right_wink",
            Self::ClosedEyeSmiling => "closed_eye_smiling",
            Self::ClosedEyeFrowning => "closed_eye_frowning",
            Self::LeftWinkFrowning => "left_wink_frowning",
            Self::RightWinkFrowning => "right_wink_frowning",
        }
    }

    /// File stem of the bundled sticker artwork for this category.
    #[must_use]
    pub const fn asset_stem(self) -> &'static str {
        match self {
            Self::Smiling => "smile",
            Self::Frowning => "frown",
            Self::LeftWink => "leftwink",
            Self::RightWink => "rightwink",
            Self::ClosedEyeSmiling => "closed_smile",
            Self::ClosedEyeFrowning => "closed_frown",
            Self::LeftWinkFrowning => "leftwinkfrown",
            Self::RightWinkFrowning => "rightwinkfrown",
        }
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
