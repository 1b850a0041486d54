use std::sync::mpsc;

use crate::messages::{WorkerCommand, WorkerResult};

use super::io;

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("framecrop-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::ReadFile { path } => {
                io::handle_read_file(&path, &tx, &ctx);
            }
            WorkerCommand::Decode(job) => {
                io::handle_decode(job, &tx, &ctx);
            }
            WorkerCommand::Export(job) => {
                io::handle_export(job, &tx, &ctx);
            }
            WorkerCommand::Upload {
                root,
                folder,
                result,
            } => {
                io::handle_upload(&root, folder, &result, &tx, &ctx);
            }
            WorkerCommand::SaveResult { path, data } => {
                io::handle_save_result(&path, &data, &tx, &ctx);
            }
        }
    }
}
