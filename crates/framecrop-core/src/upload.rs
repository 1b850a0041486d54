//! Hand-off of exported crops to storage, and the preview that follows it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::raster::CropResult;

/// Destination folder an exported crop is filed under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadFolder {
    #[default]
    Discounts,
    Logos,
}

impl UploadFolder {
    pub const ALL: [UploadFolder; 2] = [UploadFolder::Discounts, UploadFolder::Logos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discounts => "discounts",
            Self::Logos => "logos",
        }
    }
}

impl fmt::Display for UploadFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External storage for exported crops.
pub trait BlobSink {
    /// Store `result` under `folder` and return its location.
    fn upload(&self, folder: UploadFolder, result: &CropResult) -> Result<String>;
}

/// Writes crops to `<root>/<folder>/<filename>` on the local filesystem.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl BlobSink for DirectorySink {
    fn upload(&self, folder: UploadFolder, result: &CropResult) -> Result<String> {
        let dir = self.root.join(folder.as_str());
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(&result.filename);
        std::fs::write(&path, &result.data)?;
        info!(
            path = %path.display(),
            bytes = result.data.len(),
            content_type = result.content_type,
            "Stored crop"
        );
        Ok(path.display().to_string())
    }
}

/// What the host shows next to the editor.
#[derive(Clone, Debug, PartialEq)]
pub enum Preview {
    /// An existing image the record already points at. Never decoded.
    Remote(String),
    /// The most recent confirmed crop.
    Local {
        filename: String,
        content_type: &'static str,
        width: u32,
        height: u32,
    },
}
