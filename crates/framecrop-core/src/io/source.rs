use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::consts::{FALLBACK_MIME, IMAGE_MIME_PREFIX};
use crate::error::{CropError, Result};
use crate::viewport::ImageSize;

/// A user-selected file before any decoding.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// File handed over with a declared MIME type (picker or drag-drop).
    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk. The MIME type comes from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_for_path(path);
        debug!(name = %name, mime = %mime, bytes = bytes.len(), "Read source file");
        Ok(Self { name, mime, bytes })
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with(IMAGE_MIME_PREFIX)
    }
}

/// MIME type for a path, looked up from its extension.
pub fn mime_for_path(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_MIME.to_string())
}

/// Decoded source bitmap. Cheap to clone; the pixels are shared.
#[derive(Clone, Debug)]
pub struct SourceImage {
    name: String,
    pixels: Arc<RgbaImage>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            name: name.into(),
            pixels: Arc::new(pixels),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.pixels.width(), self.pixels.height())
    }
}

/// Reject anything that does not declare an `image/` MIME type.
pub fn check_mime(file: &SourceFile) -> Result<()> {
    if file.is_image() {
        Ok(())
    } else {
        Err(CropError::InvalidFileType {
            name: file.name.clone(),
            mime: file.mime.clone(),
        })
    }
}

/// Decode an accepted file. The format is sniffed from the bytes.
pub fn decode(file: &SourceFile) -> Result<SourceImage> {
    check_mime(file)?;
    let img = image::load_from_memory(&file.bytes)
        .map_err(|e| CropError::ImageDecodeFailure(format!("{}: {e}", file.name)))?;
    let pixels = img.to_rgba8();
    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(CropError::ImageDecodeFailure(format!(
            "{}: image has no pixels",
            file.name
        )));
    }
    info!(
        name = %file.name,
        width = pixels.width(),
        height = pixels.height(),
        "Decoded source image"
    );
    Ok(SourceImage::new(file.name.clone(), pixels))
}
