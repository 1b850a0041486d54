use std::fmt;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, RgbaImage};
use tracing::{debug, warn};

use crate::error::{CropError, Result};

/// Formats an export can end up in. WebP is preferred; JPEG is the only fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    WebP,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::WebP => "webp",
            Self::Jpeg => "jpg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::WebP => "image/webp",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WebP => "WebP",
            Self::Jpeg => "JPEG",
        })
    }
}

/// Encode quality in (0.0, 1.0].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quality(f32);

impl Quality {
    /// Out-of-range values are clamped to [0.01, 1.0].
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(1.0);
        }
        Self(value.clamp(0.01, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Quality on the 1..=100 scale used by JPEG encoders.
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// A codec backend. Implementations return the encoded bytes of `image`.
pub trait Encoder {
    fn encode(&self, image: &RgbaImage, format: OutputFormat, quality: Quality) -> Result<Vec<u8>>;
}

/// Encoder backed by libwebp for WebP and the `image` crate for JPEG.
///
/// Both formats are lossy at the given quality.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateEncoder;

impl Encoder for ImageCrateEncoder {
    fn encode(&self, image: &RgbaImage, format: OutputFormat, quality: Quality) -> Result<Vec<u8>> {
        let (width, height) = image.dimensions();
        let mut buffer = Vec::new();
        match format {
            OutputFormat::WebP => {
                let mem = webp::Encoder::from_rgba(image.as_raw(), width, height)
                    .encode_simple(false, quality.percent() as f32)
                    .map_err(|e| CropError::EncodeFailure(format!("WebP: {e:?}")))?;
                buffer.extend_from_slice(&mem);
            }
            OutputFormat::Jpeg => {
                let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
                let mut enc =
                    JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality.percent());
                enc.encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| CropError::EncodeFailure(format!("JPEG: {e}")))?;
            }
        }
        Ok(buffer)
    }
}

/// Encoded bytes plus the format that produced them.
#[derive(Clone, Debug)]
pub struct Encoded {
    pub data: Vec<u8>,
    pub format: OutputFormat,
}

/// WebP first. On an error or empty output, one retry as JPEG at the same quality.
pub fn encode_with_fallback(
    encoder: &dyn Encoder,
    image: &RgbaImage,
    quality: Quality,
) -> Result<Encoded> {
    match encoder.encode(image, OutputFormat::WebP, quality) {
        Ok(data) if !data.is_empty() => {
            debug!(bytes = data.len(), "Encoded WebP");
            return Ok(Encoded {
                data,
                format: OutputFormat::WebP,
            });
        }
        Ok(_) => warn!("WebP encoder returned no data, falling back to JPEG"),
        Err(e) => warn!(error = %e, "WebP encoding failed, falling back to JPEG"),
    }

    match encoder.encode(image, OutputFormat::Jpeg, quality) {
        Ok(data) if !data.is_empty() => {
            debug!(bytes = data.len(), quality = quality.percent(), "Encoded JPEG");
            Ok(Encoded {
                data,
                format: OutputFormat::Jpeg,
            })
        }
        Ok(_) => Err(CropError::EncodeFailure(
            "JPEG encoder returned no data".into(),
        )),
        Err(e @ CropError::EncodeFailure(_)) => Err(e),
        Err(e) => Err(CropError::EncodeFailure(e.to_string())),
    }
}

/// Replace the extension of `source` with the format's own.
///
/// Only a trailing `.xyz` with at least one character after the dot counts as
/// an extension; names without one get the extension appended.
pub fn derive_filename(source: &str, format: OutputFormat) -> String {
    let stem = match source.rfind('.') {
        Some(idx) => {
            let ext = &source[idx + 1..];
            if ext.is_empty() || ext.contains(|c: char| c == '/' || c == '\\') {
                source
            } else {
                &source[..idx]
            }
        }
        None => source,
    };
    format!("{stem}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_replaces_extension() {
        assert_eq!(derive_filename("photo.jpg", OutputFormat::WebP), "photo.webp");
        assert_eq!(derive_filename("photo.JPEG", OutputFormat::Jpeg), "photo.jpg");
        assert_eq!(derive_filename("archive.tar.gz", OutputFormat::WebP), "archive.tar.webp");
    }

    #[test]
    fn filename_without_extension_gets_one() {
        assert_eq!(derive_filename("photo", OutputFormat::WebP), "photo.webp");
        assert_eq!(derive_filename("photo.", OutputFormat::WebP), "photo..webp");
        assert_eq!(derive_filename("dir.v1/photo", OutputFormat::Jpeg), "dir.v1/photo.jpg");
    }

    #[test]
    fn dotfile_loses_its_name() {
        assert_eq!(derive_filename(".hidden", OutputFormat::WebP), ".webp");
    }

    #[test]
    fn quality_percent_rounds_and_clamps() {
        assert_eq!(Quality::new(0.82).percent(), 82);
        assert_eq!(Quality::new(1.5).percent(), 100);
        assert_eq!(Quality::new(0.0).percent(), 1);
    }
}
