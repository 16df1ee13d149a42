use thiserror::Error;

use crate::domain::Emoji;

/// Errors raised by the compositing core.
#[derive(Debug, Error)]
pub enum EmojifyError {
    /// A face box or image has a non-positive or non-finite dimension.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// No sticker artwork is available for the category.
    #[error("no emoji asset for {0}")]
    AssetMissing(Emoji),
}
