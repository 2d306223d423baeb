//! Contain-fit image normalization.
//!
//! Uploaded images are scaled to fit inside a fixed bounding box without
//! cropping; leftover space is letterboxed black. The payload is re-encoded
//! in its source format so the stored object keeps the declared MIME type.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

/// Output bounding box, width then height.
pub const BOUNDS: (u32, u32) = (1920, 1080);

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("unrecognized image payload")]
    UnknownFormat,
    #[error("could not process image: {0}")]
    Image(#[from] image::ImageError),
}

pub type TransformResult<T> = Result<T, TransformError>;

/// Decode `data`, fit it within [`BOUNDS`] and re-encode in the source format.
///
/// The declared MIME type picks the decoder when it names a supported
/// format; otherwise the format is sniffed from the payload bytes. Small
/// images are scaled up to the box, matching contain-fit semantics.
pub fn fit_to_bounds(data: &[u8], declared_mime: Option<&str>) -> TransformResult<Vec<u8>> {
    let format = match declared_mime.and_then(ImageFormat::from_mime_type) {
        Some(format) => format,
        None => image::guess_format(data).map_err(|_| TransformError::UnknownFormat)?,
    };

    let decoded = image::load_from_memory_with_format(data, format)?;
    let fitted = letterbox(&decoded, BOUNDS.0, BOUNDS.1);

    // JPEG carries no alpha channel
    let fitted = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(fitted.to_rgb8()),
        _ => fitted,
    };

    let mut buf = Cursor::new(Vec::new());
    fitted.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

/// Scale to fit inside `width` x `height` (aspect preserved) and center the
/// result on a black canvas of exactly those dimensions.
fn letterbox(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let resized = img.resize(width, height, FilterType::Lanczos3);
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    let x = i64::from((width - resized.width()) / 2);
    let y = i64::from((height - resized.height()) / 2);
    imageops::overlay(&mut canvas, &resized.to_rgba8(), x, y);
    DynamicImage::ImageRgba8(canvas)
}
