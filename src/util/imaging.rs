//! Image decoding, cropping and encoding helpers
//!
//! Captured images travel as opaque encoded bytes. These helpers are the
//! only place the crate looks inside them: to size thumbnails and previews,
//! to hand RGBA pixels to the clipboard, and to cut a selection out of a
//! frozen screen image.
//!
//! # Examples
//!
//! ```
//! use image::{DynamicImage, RgbaImage};
//! use screenshot_overlay::{
//!     model::{CoordinateSpace, Rect},
//!     util::imaging::{crop_selection, image_dimensions},
//! };
//!
//! let screen = DynamicImage::ImageRgba8(RgbaImage::new(200, 100));
//! let png = crop_selection(&screen, Rect::new(10.0, 10.0, 50.0, 40.0), CoordinateSpace::TopLeft, 1.0)
//!     .unwrap();
//!
//! assert_eq!(image_dimensions(&png).unwrap(), (50, 40));
//! ```

use std::io::Cursor;

use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};

use crate::{
    error::{OverlayError, OverlayResult},
    model::{CoordinateSpace, Rect},
};

/// Decodes encoded bytes into pixels
pub fn decode_image(bytes: &[u8]) -> OverlayResult<DynamicImage> {
    if bytes.is_empty() {
        return Err(OverlayError::decode("image data is empty"));
    }
    image::load_from_memory(bytes).map_err(OverlayError::decode)
}

/// Reads width and height from the image header without decoding pixels
pub fn image_dimensions(bytes: &[u8]) -> OverlayResult<(u32, u32)> {
    if bytes.is_empty() {
        return Err(OverlayError::decode("image data is empty"));
    }
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(OverlayError::decode)?
        .into_dimensions()
        .map_err(OverlayError::decode)
}

/// Identifies the encoded format from the leading magic bytes
pub fn sniff_format(bytes: &[u8]) -> OverlayResult<ImageFormat> {
    if bytes.is_empty() {
        return Err(OverlayError::decode("image data is empty"));
    }
    image::guess_format(bytes).map_err(OverlayError::decode)
}

/// File extension matching the encoded format, or `"bin"` if unknown
pub fn extension_for(bytes: &[u8]) -> &'static str {
    sniff_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("bin")
}

/// Encodes an image as PNG with default compression
pub fn encode_png(pixels: &DynamicImage) -> OverlayResult<Vec<u8>> {
    let mut output = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        Cursor::new(&mut output),
        CompressionType::Default,
        FilterType::Adaptive,
    );

    let rgba = pixels.to_rgba8();
    let (width, height) = rgba.dimensions();

    encoder
        .write_image(rgba.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|e| OverlayError::EncodingFailed {
            format: "png".to_string(),
            reason: e.to_string(),
        })?;

    Ok(output)
}

/// Crops a selection out of a frozen screen image and encodes it as PNG
///
/// `selection` is in surface-local points using `space`; `scale` converts
/// points to pixels (2.0 on a Retina display). The selection is clamped to
/// the image bounds. A non-finite selection or scale, an empty selection,
/// or one entirely outside the image is rejected.
pub fn crop_selection(
    screen: &DynamicImage,
    selection: Rect,
    space: CoordinateSpace,
    scale: f64,
) -> OverlayResult<Vec<u8>> {
    if !selection.is_finite() || !scale.is_finite() {
        return Err(OverlayError::InvalidParameter {
            parameter: "selection".to_string(),
            reason:    format!("{:?} at scale {} is not finite", selection, scale),
        });
    }
    if selection.is_empty() || scale <= 0.0 {
        return Err(OverlayError::InvalidParameter {
            parameter: "selection".to_string(),
            reason:    format!(
                "{}x{} selection at scale {} has no area",
                selection.size.width, selection.size.height, scale
            ),
        });
    }

    let (img_width, img_height) = (screen.width() as f64, screen.height() as f64);

    let left = (selection.min_x() * scale).max(0.0);
    let right = (selection.max_x() * scale).min(img_width);
    // Image rows run top-down; flip bottom-left selections
    let (top, bottom) = match space {
        CoordinateSpace::TopLeft => (selection.min_y() * scale, selection.max_y() * scale),
        CoordinateSpace::BottomLeft => (
            img_height - selection.max_y() * scale,
            img_height - selection.min_y() * scale,
        ),
    };
    let top = top.max(0.0);
    let bottom = bottom.min(img_height);

    if right <= left || bottom <= top {
        return Err(OverlayError::InvalidParameter {
            parameter: "selection".to_string(),
            reason:    format!(
                "selection lies outside the {}x{} screen image",
                screen.width(),
                screen.height()
            ),
        });
    }

    let x = left.floor() as u32;
    let y = top.floor() as u32;
    let width = ((right.ceil() as u32).saturating_sub(x)).max(1);
    let height = ((bottom.ceil() as u32).saturating_sub(y)).max(1);

    let cropped = screen.crop_imm(x, y, width, height);
    encode_png(&cropped)
}
