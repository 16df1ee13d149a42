//! Emoji sticker artwork loaded from disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use emojify_core::{Emoji, EmojiAssets, EmojifyError};
use image::DynamicImage;
use tracing::{debug, info, warn};

/// File extension of sticker artwork.
pub const ASSET_EXTENSION: &str = "png";

/// Returns the default sticker directory.
///
/// Uses `XDG_DATA_HOME/emojify/emoji` or `~/.local/share/emojify/emoji`.
#[must_use]
pub fn default_assets_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("emojify")
        .join("emoji")
}

/// Returns the file name expected for `emoji`'s sticker.
#[must_use]
pub fn asset_file_name(emoji: Emoji) -> String {
    format!("{}.{ASSET_EXTENSION}", emoji.asset_stem())
}

/// Whether a category's sticker is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStatus {
    /// The category.
    pub emoji: Emoji,
    /// Expected file location.
    pub path: PathBuf,
    /// Whether the file exists.
    pub installed: bool,
}

/// Sticker table loaded from a directory of `<stem>.png` files.
pub struct AssetLibrary {
    dir: PathBuf,
    stickers: HashMap<Emoji, DynamicImage>,
}

impl AssetLibrary {
    /// Loads every sticker present in `dir`.
    ///
    /// Missing files are logged and left out; lookups for them fail with
    /// [`EmojifyError::AssetMissing`].
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is not a directory or a present file cannot
    /// be decoded.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!(
                "Emoji asset directory not found: {}. Use --assets-dir or set assets.dir in the config.",
                dir.display()
            );
        }

        let mut stickers = HashMap::new();
        for emoji in Emoji::ALL {
            let path = dir.join(asset_file_name(emoji));
            if !path.exists() {
                warn!("No sticker for {emoji}: {} not found", path.display());
                continue;
            }

            let sticker = image::open(&path)
                .with_context(|| format!("Failed to decode sticker: {}", path.display()))?;
            debug!(
                "Loaded {emoji} sticker {}x{} from {}",
                sticker.width(),
                sticker.height(),
                path.display()
            );
            stickers.insert(emoji, sticker);
        }

        info!(
            "Loaded {}/{} stickers from {}",
            stickers.len(),
            Emoji::ALL.len(),
            dir.display()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            stickers,
        })
    }

    /// Directory the stickers were loaded from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of categories with a sticker.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    /// Whether no sticker was found at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    /// Lists which stickers are installed in `dir`, without decoding them.
    #[must_use]
    pub fn status(dir: &Path) -> Vec<AssetStatus> {
        Emoji::ALL
            .iter()
            .map(|&emoji| {
                let path = dir.join(asset_file_name(emoji));
                let installed = path.is_file();
                AssetStatus {
                    emoji,
                    path,
                    installed,
                }
            })
            .collect()
    }
}

impl EmojiAssets for AssetLibrary {
    fn lookup(&self, emoji: Emoji) -> Result<&DynamicImage, EmojifyError> {
        self.stickers.lookup(emoji)
    }
}
