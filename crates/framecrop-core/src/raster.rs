//! Rendering the visible part of the source into the fixed output raster.

use image::RgbaImage;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::OutputSpec;
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{CropError, Result};
use crate::io::encode::{derive_filename, encode_with_fallback, Encoder, Quality};
use crate::io::source::SourceImage;
use crate::viewport::{FrameSize, ViewportState};

/// Region of the source image, in source pixels, that the frame shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Exported crop. Ownership passes to the caller.
#[derive(Clone, Debug)]
pub struct CropResult {
    pub data: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

/// Inverse of the viewport mapping applied to the frame's four edges.
pub fn source_rect(state: &ViewportState, frame: FrameSize) -> SourceRect {
    SourceRect {
        x: -state.offset_x / state.scale,
        y: -state.offset_y / state.scale,
        width: frame.width / state.scale,
        height: frame.height / state.scale,
    }
}

/// Sample `rect` of `src` into a new `output.width x output.height` raster.
pub fn rasterize(src: &RgbaImage, rect: &SourceRect, output: OutputSpec) -> Result<RgbaImage> {
    if output.width == 0 || output.height == 0 {
        return Err(CropError::CanvasUnavailable(format!(
            "output surface {}x{} has no pixels",
            output.width, output.height
        )));
    }
    if src.width() == 0 || src.height() == 0 {
        return Err(CropError::CanvasUnavailable("source has no pixels".into()));
    }

    let stride = output.width as usize * 4;
    let len = stride.checked_mul(output.height as usize).ok_or_else(|| {
        CropError::CanvasUnavailable(format!(
            "output surface {}x{} is too large",
            output.width, output.height
        ))
    })?;
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| CropError::CanvasUnavailable(e.to_string()))?;
    buf.resize(len, 0);

    let sampler = RowSampler::new(src, rect, output);
    if output.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(row, out)| sampler.fill_row(row as u32, out));
    } else {
        for (row, out) in buf.chunks_mut(stride).enumerate() {
            sampler.fill_row(row as u32, out);
        }
    }

    RgbaImage::from_raw(output.width, output.height, buf)
        .ok_or_else(|| CropError::CanvasUnavailable("buffer size mismatch".into()))
}

/// Rasterize the current view and encode it, WebP first.
pub fn export(
    state: &ViewportState,
    frame: FrameSize,
    image: &SourceImage,
    output: OutputSpec,
    quality: Quality,
    encoder: &dyn Encoder,
) -> Result<CropResult> {
    let rect = source_rect(state, frame);
    debug!(
        x = rect.x,
        y = rect.y,
        w = rect.width,
        h = rect.height,
        "Source rect"
    );
    let raster = rasterize(image.pixels(), &rect, output)?;
    let encoded = encode_with_fallback(encoder, &raster, quality)?;
    let filename = derive_filename(image.name(), encoded.format);
    info!(
        filename = %filename,
        format = %encoded.format,
        bytes = encoded.data.len(),
        width = output.width,
        height = output.height,
        "Exported crop"
    );
    Ok(CropResult {
        data: encoded.data,
        content_type: encoded.format.mime(),
        filename,
        width: raster.width(),
        height: raster.height(),
    })
}

// ---------------------------------------------------------------------------
// Bilinear sampling
// ---------------------------------------------------------------------------

/// Maps output pixel centers back into the source rect.
struct RowSampler<'a> {
    src: &'a RgbaImage,
    rect: SourceRect,
    out_w: u32,
    step_x: f64,
    step_y: f64,
}

impl<'a> RowSampler<'a> {
    fn new(src: &'a RgbaImage, rect: &SourceRect, output: OutputSpec) -> Self {
        Self {
            src,
            rect: *rect,
            out_w: output.width,
            step_x: rect.width / output.width as f64,
            step_y: rect.height / output.height as f64,
        }
    }

    fn fill_row(&self, row: u32, out: &mut [u8]) {
        let sy = self.rect.y + (row as f64 + 0.5) * self.step_y - 0.5;
        for col in 0..self.out_w {
            let sx = self.rect.x + (col as f64 + 0.5) * self.step_x - 0.5;
            let i = col as usize * 4;
            out[i..i + 4].copy_from_slice(&bilinear_rgba(self.src, sx, sy));
        }
    }
}

/// Bilinear sample with coordinates clamped to the image edge.
pub fn bilinear_rgba(src: &RgbaImage, x: f64, y: f64) -> [u8; 4] {
    let max_x = src.width() - 1;
    let max_y = src.height() - 1;
    let x = x.clamp(0.0, max_x as f64);
    let y = y.clamp(0.0, max_y as f64);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = src.get_pixel(x0, y0).0;
    let p10 = src.get_pixel(x1, y0).0;
    let p01 = src.get_pixel(x0, y1).0;
    let p11 = src.get_pixel(x1, y1).0;

    let mut px = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        px[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    px
}
