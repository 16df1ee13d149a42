//! Photo source port.

use crate::domain::ImageInfo;

/// Port for enumerating the photos to emojify.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over decoded photos, in a stable order.
    ///
    /// # Errors
    ///
    /// Individual items are errors when a photo cannot be read or decoded;
    /// the remaining photos are still yielded.
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageInfo>> + Send + '_>;

    /// Returns the number of photos the iterator will yield, if known up front.
    fn count_hint(&self) -> Option<usize>;
}
