#![allow(dead_code)]

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use framecrop_core::config::{EditorConfig, OutputSpec};
use framecrop_core::io::SourceFile;
use framecrop_core::viewport::FrameSize;

/// Horizontal red ramp, vertical green ramp, constant blue.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
        let g = (y * 255 / height.max(2).saturating_sub(1)).min(255) as u8;
        Rgba([r, g, 128, 255])
    })
}

pub fn solid_image(width: u32, height: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(px))
}

pub fn encode_as(img: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    let dynamic = image::DynamicImage::ImageRgba8(img.clone());
    let dynamic = if format == ImageFormat::Jpeg {
        image::DynamicImage::ImageRgb8(dynamic.to_rgb8())
    } else {
        dynamic
    };
    dynamic
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("encode test image");
    buf
}

pub fn png_file(name: &str, width: u32, height: u32) -> SourceFile {
    let bytes = encode_as(&gradient_image(width, height), ImageFormat::Png);
    SourceFile::from_bytes(name, "image/png", bytes)
}

pub fn jpeg_file(name: &str, width: u32, height: u32) -> SourceFile {
    let bytes = encode_as(&gradient_image(width, height), ImageFormat::Jpeg);
    SourceFile::from_bytes(name, "image/jpeg", bytes)
}

/// Config whose frame and output share the given size.
pub fn config_with(frame_w: f64, frame_h: f64, out_w: u32, out_h: u32) -> EditorConfig {
    EditorConfig {
        frame: FrameSize::new(frame_w, frame_h),
        output: OutputSpec::new(out_w, out_h),
        ..EditorConfig::default()
    }
}

pub fn close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps * a.abs().max(b.abs()).max(1.0)
}
