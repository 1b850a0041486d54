use image::imageops::{self, FilterType};
use tracing::info;

use crate::error::Result;
use crate::io::encode::{derive_filename, encode_with_fallback, Encoder, Quality};
use crate::io::source::{decode, SourceFile};
use crate::raster::CropResult;

/// Downscale an image to at most `max_width` pixels wide and re-encode it.
///
/// Aspect ratio is kept (height rounded). Narrower images keep their size.
pub fn resize_image(
    file: &SourceFile,
    max_width: u32,
    quality: Quality,
    encoder: &dyn Encoder,
) -> Result<CropResult> {
    let source = decode(file)?;
    let (w, h) = (source.natural_width(), source.natural_height());

    let scaled;
    let pixels = if max_width > 0 && w > max_width {
        let new_h = ((h as f64 * max_width as f64 / w as f64).round() as u32).max(1);
        scaled = imageops::resize(source.pixels(), max_width, new_h, FilterType::Triangle);
        &scaled
    } else {
        source.pixels()
    };

    let encoded = encode_with_fallback(encoder, pixels, quality)?;
    let filename = derive_filename(&file.name, encoded.format);
    info!(
        from_w = w,
        from_h = h,
        to_w = pixels.width(),
        to_h = pixels.height(),
        format = %encoded.format,
        "Resized image"
    );
    Ok(CropResult {
        data: encoded.data,
        content_type: encoded.format.mime(),
        filename,
        width: pixels.width(),
        height: pixels.height(),
    })
}
