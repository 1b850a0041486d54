use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use framecrop_core::editor::{DecodeJob, ExportJob};
use framecrop_core::io::SourceFile;
use framecrop_core::raster::CropResult;
use framecrop_core::upload::{BlobSink, DirectorySink, UploadFolder};
use tracing::debug;

use crate::messages::WorkerResult;

use super::{send, send_error};

pub(super) fn handle_read_file(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match SourceFile::from_path(path) {
        Ok(file) => send(tx, ctx, WorkerResult::FileRead(file)),
        Err(e) => send_error(tx, ctx, format!("Failed to read {}: {e}", path.display())),
    }
}

pub(super) fn handle_decode(job: DecodeJob, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let start = Instant::now();
    let name = job.file_name().to_string();
    let outcome = job.run();
    debug!(name, elapsed_ms = start.elapsed().as_millis() as u64, "Decode finished");
    send(tx, ctx, WorkerResult::Decoded(outcome));
}

pub(super) fn handle_export(job: ExportJob, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let start = Instant::now();
    let outcome = job.run();
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Export finished");
    send(tx, ctx, WorkerResult::Exported(outcome));
}

pub(super) fn handle_upload(
    root: &Path,
    folder: UploadFolder,
    result: &CropResult,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match DirectorySink::new(root).upload(folder, result) {
        Ok(location) => send(tx, ctx, WorkerResult::Uploaded { location }),
        Err(e) => send_error(tx, ctx, format!("Upload failed: {}", e.user_message())),
    }
}

pub(super) fn handle_save_result(
    path: &Path,
    data: &[u8],
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match std::fs::write(path, data) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::Saved {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to save {}: {e}", path.display())),
    }
}
