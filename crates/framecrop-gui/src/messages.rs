use std::path::PathBuf;

use framecrop_core::editor::{DecodeJob, DecodeOutcome, ExportJob, ExportOutcome};
use framecrop_core::io::SourceFile;
use framecrop_core::raster::CropResult;
use framecrop_core::upload::UploadFolder;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Read a file from disk and report it back for acceptance.
    ReadFile { path: PathBuf },

    /// Decode an accepted source file.
    Decode(DecodeJob),

    /// Rasterize and encode the confirmed viewport.
    Export(ExportJob),

    /// Store a confirmed crop under `<root>/<folder>/`.
    Upload {
        root: PathBuf,
        folder: UploadFolder,
        result: CropResult,
    },

    /// Write the encoded crop to a chosen path.
    SaveResult { path: PathBuf, data: Vec<u8> },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    FileRead(SourceFile),
    Decoded(DecodeOutcome),
    Exported(ExportOutcome),
    Uploaded { location: String },
    Saved { path: PathBuf },
    Error { message: String },
}
