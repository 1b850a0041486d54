mod common;

use std::cell::RefCell;

use image::RgbaImage;

use common::gradient_image;
use framecrop_core::error::{CropError, Result};
use framecrop_core::io::{
    encode_with_fallback, Encoder, ImageCrateEncoder, OutputFormat, Quality,
};

/// Scripted encoder that records which formats were requested.
struct ScriptedEncoder {
    webp: Outcome,
    jpeg: Outcome,
    calls: RefCell<Vec<OutputFormat>>,
}

#[derive(Clone, Copy)]
enum Outcome {
    Bytes,
    Empty,
    Fail,
}

impl ScriptedEncoder {
    fn new(webp: Outcome, jpeg: Outcome) -> Self {
        Self {
            webp,
            jpeg,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Encoder for ScriptedEncoder {
    fn encode(&self, _image: &RgbaImage, format: OutputFormat, _q: Quality) -> Result<Vec<u8>> {
        self.calls.borrow_mut().push(format);
        let outcome = match format {
            OutputFormat::WebP => self.webp,
            OutputFormat::Jpeg => self.jpeg,
        };
        match outcome {
            Outcome::Bytes => Ok(vec![1, 2, 3]),
            Outcome::Empty => Ok(Vec::new()),
            Outcome::Fail => Err(CropError::EncodeFailure(format!("{format} unsupported"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Fallback order
// ---------------------------------------------------------------------------

#[test]
fn test_webp_success_skips_jpeg() {
    let enc = ScriptedEncoder::new(Outcome::Bytes, Outcome::Bytes);
    let out = encode_with_fallback(&enc, &gradient_image(4, 4), Quality::new(0.82)).unwrap();
    assert_eq!(out.format, OutputFormat::WebP);
    assert_eq!(*enc.calls.borrow(), vec![OutputFormat::WebP]);
}

#[test]
fn test_webp_error_falls_back_to_jpeg() {
    let enc = ScriptedEncoder::new(Outcome::Fail, Outcome::Bytes);
    let out = encode_with_fallback(&enc, &gradient_image(4, 4), Quality::new(0.82)).unwrap();
    assert_eq!(out.format, OutputFormat::Jpeg);
    assert_eq!(
        *enc.calls.borrow(),
        vec![OutputFormat::WebP, OutputFormat::Jpeg]
    );
}

#[test]
fn test_webp_empty_output_falls_back_to_jpeg() {
    let enc = ScriptedEncoder::new(Outcome::Empty, Outcome::Bytes);
    let out = encode_with_fallback(&enc, &gradient_image(4, 4), Quality::new(0.82)).unwrap();
    assert_eq!(out.format, OutputFormat::Jpeg);
    assert_eq!(out.data, vec![1, 2, 3]);
}

#[test]
fn test_both_failing_is_encode_failure() {
    for jpeg in [Outcome::Fail, Outcome::Empty] {
        let enc = ScriptedEncoder::new(Outcome::Fail, jpeg);
        match encode_with_fallback(&enc, &gradient_image(4, 4), Quality::new(0.82)) {
            Err(CropError::EncodeFailure(_)) => {}
            other => panic!("expected EncodeFailure, got {:?}", other.map(|e| e.format)),
        }
        assert_eq!(enc.calls.borrow().len(), 2);
    }
}

// ---------------------------------------------------------------------------
// image crate backend
// ---------------------------------------------------------------------------

/// Gradient with a fine checker laid over it, so lossy codecs have detail to drop.
fn textured_image(width: u32, height: u32) -> RgbaImage {
    let mut img = gradient_image(width, height);
    for (x, y, px) in img.enumerate_pixels_mut() {
        if (x / 3 + y / 3) % 2 == 0 {
            px.0[2] = 255 - px.0[0];
        }
    }
    img
}

#[test]
fn test_image_crate_webp_is_lossy_at_default_quality() {
    let img = textured_image(64, 36);
    let bytes = ImageCrateEncoder
        .encode(&img, OutputFormat::WebP, Quality::new(0.82))
        .unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::WebP);
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (64, 36));
    assert_ne!(decoded.as_raw(), img.as_raw());
}

#[test]
fn test_webp_quality_changes_output() {
    let img = textured_image(800, 450);
    let high = encode_with_fallback(&ImageCrateEncoder, &img, Quality::new(0.82)).unwrap();
    let low = encode_with_fallback(&ImageCrateEncoder, &img, Quality::new(0.10)).unwrap();
    assert_eq!(high.format, OutputFormat::WebP);
    assert_eq!(low.format, OutputFormat::WebP);
    assert_ne!(high.data, low.data);
    assert!(low.data.len() < high.data.len());
}

#[test]
fn test_image_crate_jpeg_round_trips_dimensions() {
    let img = gradient_image(64, 36);
    let bytes = ImageCrateEncoder
        .encode(&img, OutputFormat::Jpeg, Quality::new(0.82))
        .unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 36));
}

#[test]
fn test_output_format_metadata() {
    assert_eq!(OutputFormat::WebP.extension(), "webp");
    assert_eq!(OutputFormat::WebP.mime(), "image/webp");
    assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
    assert_eq!(OutputFormat::Jpeg.mime(), "image/jpeg");
}
