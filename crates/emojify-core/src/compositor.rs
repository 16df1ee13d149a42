//! Sticker placement and compositing.
//!
//! The sticker is scaled to 90% of the face width, then its height is derived
//! from the sticker's aspect ratio and damped by the same factor once more.
//! It is centred horizontally on the face and anchored one third of its height
//! above the face centre.

// Pixel geometry mixes float boxes with integer rasters.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use image::{ColorType, DynamicImage, ImageBuffer, Pixel, Primitive, Rgba};
use serde::{Deserialize, Serialize};

use crate::domain::FaceGeometry;
use crate::error::EmojifyError;

/// Fraction of the face width the sticker is scaled to.
pub const SCALE_FACTOR: f32 = 0.9;

/// Size and position of a scaled sticker on the background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Scaled sticker width in pixels.
    pub width: u32,
    /// Scaled sticker height in pixels.
    pub height: u32,
    /// Left edge of the sticker in background coordinates.
    pub x: f32,
    /// Top edge of the sticker in background coordinates.
    pub y: f32,
}

impl Placement {
    /// Computes where a sticker of the given size lands on `face`.
    ///
    /// Sizes truncate to whole pixels, and the centring offsets use integer
    /// halves/thirds of the scaled sticker.
    ///
    /// # Errors
    ///
    /// Returns [`EmojifyError::InvalidGeometry`] if the sticker or face has a
    /// non-positive dimension, or if the scaled sticker would be empty.
    pub fn compute(
        overlay_width: u32,
        overlay_height: u32,
        face: &FaceGeometry,
    ) -> Result<Self, EmojifyError> {
        if overlay_width == 0 || overlay_height == 0 {
            return Err(EmojifyError::InvalidGeometry(format!(
                "overlay is {overlay_width}x{overlay_height}"
            )));
        }
        if !face.is_valid() {
            return Err(EmojifyError::InvalidGeometry(format!(
                "face box is {}x{} at ({}, {})",
                face.width, face.height, face.position.x, face.position.y
            )));
        }

        let width = (face.width * SCALE_FACTOR) as u32;
        // The factor is applied a second time here, on top of its effect on `width`.
        let aspect_height = u64::from(overlay_height) * u64::from(width) / u64::from(overlay_width);
        let height = (aspect_height as f32 * SCALE_FACTOR) as u32;

        if width == 0 || height == 0 {
            return Err(EmojifyError::InvalidGeometry(format!(
                "scaled overlay is {width}x{height} for a {}x{} face",
                face.width, face.height
            )));
        }

        let x = face.position.x + face.width / 2.0 - (width / 2) as f32;
        let y = face.position.y + face.height / 2.0 - (height / 3) as f32;
        if !x.is_finite() || !y.is_finite() {
            return Err(EmojifyError::InvalidGeometry(format!(
                "sticker position ({x}, {y}) is out of range"
            )));
        }

        Ok(Self {
            width,
            height,
            x,
            y,
        })
    }

    /// Whole-pixel drawing offset of the sticker's top-left corner.
    #[must_use]
    pub fn offset(&self) -> (i64, i64) {
        (self.x.floor() as i64, self.y.floor() as i64)
    }
}

/// Draws `overlay` over `face` on a copy of `background`.
///
/// The result has the background's dimensions and color type. Sticker pixels
/// that fall outside the background are clipped.
///
/// # Errors
///
/// Returns [`EmojifyError::InvalidGeometry`] if either image is empty or the
/// face box has a non-positive dimension.
pub fn composite(
    background: &DynamicImage,
    overlay: &DynamicImage,
    face: &FaceGeometry,
) -> Result<DynamicImage, EmojifyError> {
    let placement = Placement::compute(overlay.width(), overlay.height(), face)?;
    composite_at(background, overlay, &placement)
}

/// Scales `overlay` to `placement`'s size and draws it at its offset on a copy
/// of `background`.
///
/// # Errors
///
/// Returns [`EmojifyError::InvalidGeometry`] if either image or the placement
/// is empty, or the placement position is not finite.
pub fn composite_at(
    background: &DynamicImage,
    overlay: &DynamicImage,
    placement: &Placement,
) -> Result<DynamicImage, EmojifyError> {
    if background.width() == 0 || background.height() == 0 {
        return Err(EmojifyError::InvalidGeometry(format!(
            "background is {}x{}",
            background.width(),
            background.height()
        )));
    }
    if overlay.width() == 0 || overlay.height() == 0 {
        return Err(EmojifyError::InvalidGeometry(format!(
            "overlay is {}x{}",
            overlay.width(),
            overlay.height()
        )));
    }
    if placement.width == 0 || placement.height == 0 {
        return Err(EmojifyError::InvalidGeometry(format!(
            "placement is {}x{}",
            placement.width, placement.height
        )));
    }
    if !placement.x.is_finite() || !placement.y.is_finite() {
        return Err(EmojifyError::InvalidGeometry(format!(
            "placement position is ({}, {})",
            placement.x, placement.y
        )));
    }

    let canvas = match background.color() {
        ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16 => {
            let mut canvas = background.to_rgba16();
            draw_sticker(&mut canvas, &overlay.to_rgba16(), placement);
            DynamicImage::ImageRgba16(canvas)
        }
        ColorType::Rgb32F | ColorType::Rgba32F => {
            let mut canvas = background.to_rgba32f();
            draw_sticker(&mut canvas, &overlay.to_rgba32f(), placement);
            DynamicImage::ImageRgba32F(canvas)
        }
        _ => {
            let mut canvas = background.to_rgba8();
            draw_sticker(&mut canvas, &overlay.to_rgba8(), placement);
            DynamicImage::ImageRgba8(canvas)
        }
    };

    Ok(with_color_type(canvas, background.color()))
}

/// Half-open range of canvas coordinates covered by a span of `length`
/// pixels starting at `start`, clipped to `0..limit`.
fn clip_span(start: i64, length: u32, limit: u32) -> std::ops::Range<i64> {
    let begin = start.max(0);
    let end = start
        .saturating_add(i64::from(length))
        .min(i64::from(limit));
    begin..end.max(begin)
}

/// Nearest source index for destination index `offset` of a span scaled
/// from `source_len` to `scaled_len` pixels.
fn nearest(offset: u64, scaled_len: u32, source_len: u32) -> u32 {
    let index =
        (u128::from(offset) * 2 + 1) * u128::from(source_len) / (u128::from(scaled_len) * 2);
    u32::try_from(index).map_or(source_len - 1, |i| i.min(source_len - 1))
}

/// Alpha-blends `sticker`, scaled to `placement`'s size, onto `canvas`.
///
/// Only the part of the placement that overlaps the canvas is sampled, each
/// destination pixel taking its nearest sticker pixel.
fn draw_sticker<S>(
    canvas: &mut ImageBuffer<Rgba<S>, Vec<S>>,
    sticker: &ImageBuffer<Rgba<S>, Vec<S>>,
    placement: &Placement,
) where
    S: Primitive,
    Rgba<S>: Pixel<Subpixel = S>,
{
    let (canvas_width, canvas_height) = canvas.dimensions();
    let (sticker_width, sticker_height) = sticker.dimensions();
    let (x, y) = placement.offset();

    let columns = clip_span(x, placement.width, canvas_width);
    let rows = clip_span(y, placement.height, canvas_height);

    for dy in rows {
        // `dy - y` lies in `0..placement.height` inside the clipped span.
        let sy = nearest((dy - y) as u64, placement.height, sticker_height);
        for dx in columns.clone() {
            let sx = nearest((dx - x) as u64, placement.width, sticker_width);
            let pixel = sticker.get_pixel(sx, sy);

            let alpha = pixel.0[3];
            if alpha <= S::DEFAULT_MIN_VALUE {
                continue;
            }

            let target = canvas.get_pixel_mut(dx as u32, dy as u32);
            if alpha >= S::DEFAULT_MAX_VALUE {
                *target = *pixel;
            } else {
                target.blend(pixel);
            }
        }
    }
}

/// Converts a working canvas back to the background's original color type.
fn with_color_type(canvas: DynamicImage, color: ColorType) -> DynamicImage {
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(canvas.into_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(canvas.into_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(canvas.into_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(canvas.into_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(canvas.into_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(canvas.into_rgb16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(canvas.into_rgb32f()),
        _ => canvas,
    }
}
