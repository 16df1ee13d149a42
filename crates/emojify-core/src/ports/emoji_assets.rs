//! Sticker artwork lookup port.

use std::collections::HashMap;

use image::DynamicImage;

use crate::domain::Emoji;
use crate::error::EmojifyError;

/// Port for resolving an emoji category to its sticker image.
pub trait EmojiAssets: Send + Sync {
    /// Returns the sticker for `emoji`.
    ///
    /// # Errors
    ///
    /// Returns [`EmojifyError::AssetMissing`] if no artwork is registered.
    fn lookup(&self, emoji: Emoji) -> Result<&DynamicImage, EmojifyError>;
}

impl EmojiAssets for HashMap<Emoji, DynamicImage> {
    fn lookup(&self, emoji: Emoji) -> Result<&DynamicImage, EmojifyError> {
        self.get(&emoji).ok_or(EmojifyError::AssetMissing(emoji))
    }
}
