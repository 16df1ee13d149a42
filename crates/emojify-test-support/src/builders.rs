//! Synthetic images and faces for testing.

use emojify_core::{DetectedFace, FaceGeometry, FaceSignal, ImageInfo};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

/// Builder for creating synthetic photos, stickers and face descriptors.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Photos ===

    /// Creates a uniform RGB photo.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> ImageInfo {
        let img = RgbImage::from_pixel(width, height, Rgb([r, g, b]));
        ImageInfo::new("synthetic://rgb_uniform", DynamicImage::ImageRgb8(img))
    }

    /// Creates a uniform gray photo.
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> ImageInfo {
        let img = GrayImage::from_pixel(width, height, Luma([value]));
        ImageInfo::new("synthetic://uniform_gray", DynamicImage::ImageLuma8(img))
    }

    /// Creates an RGB photo where every pixel differs from its neighbours.
    ///
    /// Useful for pixel-identity assertions.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn gradient(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x * 7 + y * 13) % 256) as u8])
        });
        ImageInfo::new("synthetic://gradient", DynamicImage::ImageRgb8(img))
    }

    // === Stickers ===

    /// Creates a solid RGBA sticker.
    #[must_use]
    pub fn solid_sticker(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    /// Creates a fully transparent sticker.
    #[must_use]
    pub fn transparent_sticker(width: u32, height: u32) -> DynamicImage {
        Self::solid_sticker(width, height, [0, 0, 0, 0])
    }

    /// Creates a round sticker: opaque disc of `rgba` on a transparent square.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn disc_sticker(size: u32, rgba: [u8; 4]) -> DynamicImage {
        let r = size as f32 / 2.0;
        let img = RgbaImage::from_fn(size, size, |x, y| {
            let dx = x as f32 + 0.5 - r;
            let dy = y as f32 + 0.5 - r;
            if dx * dx + dy * dy <= r * r {
                Rgba(rgba)
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    // === Faces ===

    /// A face with the given probabilities and a square box.
    #[must_use]
    pub fn face(x: f32, y: f32, size: f32, signal: FaceSignal) -> DetectedFace {
        DetectedFace::new(FaceGeometry::new(x, y, size, size), signal)
    }

    /// A clearly smiling face with both eyes open.
    #[must_use]
    pub fn smiling_face(x: f32, y: f32, size: f32) -> DetectedFace {
        Self::face(x, y, size, FaceSignal::new(0.9, 0.9, 0.9))
    }

    /// A clearly frowning face with both eyes open.
    #[must_use]
    pub fn frowning_face(x: f32, y: f32, size: f32) -> DetectedFace {
        Self::face(x, y, size, FaceSignal::new(0.05, 0.9, 0.9))
    }

    /// A smiling face winking its left eye.
    #[must_use]
    pub fn left_wink_face(x: f32, y: f32, size: f32) -> DetectedFace {
        Self::face(x, y, size, FaceSignal::new(0.9, 0.1, 0.9))
    }
}
