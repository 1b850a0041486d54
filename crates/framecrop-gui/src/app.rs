use std::path::PathBuf;
use std::sync::mpsc;

use framecrop_core::config::EditorConfig;
use framecrop_core::editor::{CropEditor, DecodeOutcome};
use framecrop_core::io::{mime_for_path, SourceFile};

use crate::convert::{encoded_to_color_image, rgba_to_color_image};
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{Task, UIState, ViewState};
use crate::workers;

/// Existing image URL shown as the preview until a crop replaces it.
const PREVIEW_URL_VAR: &str = "FRAMECROP_PREVIEW_URL";

pub struct FramecropApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub editor: CropEditor,
    pub ui_state: UIState,
    pub view: ViewState,
    pub show_about: bool,
}

impl FramecropApp {
    pub fn new(ctx: &egui::Context, config: EditorConfig) -> std::io::Result<Self> {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx, ctx.clone())?;
        let folder = config.folder;
        let mut editor = CropEditor::new(config);
        if let Ok(url) = std::env::var(PREVIEW_URL_VAR) {
            editor.seed_remote_preview(url);
        }

        Ok(Self {
            cmd_tx,
            result_rx,
            editor,
            ui_state: UIState::new(folder),
            view: ViewState::default(),
            show_about: false,
        })
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::FileRead(file) => {
                    self.ui_state.finish(Task::Reading);
                    self.open_file(file);
                }
                WorkerResult::Decoded(outcome) => {
                    self.ui_state.finish(Task::Decoding);
                    self.apply_decoded(ctx, outcome);
                }
                WorkerResult::Exported(outcome) => {
                    self.ui_state.finish(Task::Exporting);
                    match self.editor.finish_export(outcome) {
                        Ok(result) => {
                            self.view.texture = None;
                            self.view.preview = encoded_to_color_image(&result.data).map(|img| {
                                ctx.load_texture("preview", img, egui::TextureOptions::LINEAR)
                            });
                            self.ui_state.add_log(format!(
                                "Cropped {} ({}x{}, {:.1} KB)",
                                result.filename,
                                result.width,
                                result.height,
                                result.data.len() as f64 / 1024.0
                            ));
                            self.ui_state.last_result = Some(result);
                            self.ui_state.upload_location = None;
                        }
                        Err(e) => self.ui_state.add_log(format!("Error: {}", e.user_message())),
                    }
                }
                WorkerResult::Uploaded { location } => {
                    self.ui_state.add_log(format!("Stored at {location}"));
                    self.ui_state.upload_location = Some(location);
                }
                WorkerResult::Saved { path } => {
                    self.ui_state.add_log(format!("Saved {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.finish(Task::Reading);
                    self.ui_state.add_log(format!("Error: {message}"));
                }
            }
        }
    }

    fn apply_decoded(&mut self, ctx: &egui::Context, outcome: DecodeOutcome) {
        if let Err(e) = self.editor.finish_decode(outcome) {
            self.view.texture = None;
            self.ui_state.add_log(format!("Error: {}", e.user_message()));
            return;
        }

        if let Some(image) = self.editor.image() {
            let color = rgba_to_color_image(image.pixels());
            self.view.texture =
                Some(ctx.load_texture("source", color, egui::TextureOptions::LINEAR));
            self.ui_state.add_log(format!(
                "Opened {} ({}x{})",
                image.name(),
                image.natural_width(),
                image.natural_height()
            ));
        }

        let frame = self.editor.config().frame;
        if let Err(e) = self.editor.on_image_loaded(frame) {
            self.view.texture = None;
            self.ui_state.add_log(format!("Error: {}", e.user_message()));
        }
    }

    /// Offer a file to the editor and start decoding it.
    pub fn open_file(&mut self, file: SourceFile) {
        let name = file.name.clone();
        match self.editor.select_file(file) {
            Ok(job) => {
                self.view.texture = None;
                self.ui_state.running = Some(Task::Decoding);
                self.ui_state.add_log(format!("Loading {name}"));
                self.send_command(WorkerCommand::Decode(job));
            }
            Err(e) => self.ui_state.add_log(format!("{name}: {}", e.user_message())),
        }
    }

    pub fn read_path(&mut self, path: PathBuf) {
        if self.ui_state.is_busy() {
            return;
        }
        self.ui_state.running = Some(Task::Reading);
        self.send_command(WorkerCommand::ReadFile { path });
    }

    /// Accept a file dropped onto the window.
    pub fn open_dropped(&mut self, dropped: egui::DroppedFile) {
        if let Some(bytes) = dropped.bytes {
            let mime = if dropped.mime.is_empty() {
                mime_for_path(std::path::Path::new(&dropped.name))
            } else {
                dropped.mime
            };
            self.open_file(SourceFile::from_bytes(dropped.name, mime, bytes.to_vec()));
        } else if let Some(path) = dropped.path {
            self.read_path(path);
        }
    }

    /// Open a file picker on a helper thread; the choice comes back through
    /// the worker.
    pub fn pick_file(&self) {
        let cmd_tx = self.cmd_tx.clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png", "webp", "gif", "bmp"])
                .pick_file()
            {
                let _ = cmd_tx.send(WorkerCommand::ReadFile { path });
            }
        });
    }

    pub fn confirm(&mut self) {
        match self.editor.begin_export() {
            Ok(job) => {
                self.ui_state.running = Some(Task::Exporting);
                self.send_command(WorkerCommand::Export(job));
            }
            Err(e) => self.ui_state.add_log(format!("Error: {}", e.user_message())),
        }
    }

    pub fn cancel(&mut self) {
        match self.editor.cancel() {
            Ok(()) => {
                self.view.texture = None;
                self.ui_state.add_log("Crop cancelled".into());
            }
            Err(e) => self.ui_state.add_log(format!("Error: {}", e.user_message())),
        }
    }

    pub fn clear(&mut self) {
        match self.editor.clear() {
            Ok(()) => {
                self.view = ViewState::default();
                self.ui_state.last_result = None;
                self.ui_state.upload_location = None;
                self.ui_state.add_log("Cleared".into());
            }
            Err(e) => self.ui_state.add_log(format!("Error: {}", e.user_message())),
        }
    }

    /// Store the last crop under a chosen root directory.
    pub fn upload_result(&mut self) {
        let Some(result) = self.ui_state.last_result.clone() else {
            return;
        };
        let folder = self.ui_state.folder;
        let cmd_tx = self.cmd_tx.clone();
        std::thread::spawn(move || {
            if let Some(root) = rfd::FileDialog::new().pick_folder() {
                let _ = cmd_tx.send(WorkerCommand::Upload {
                    root,
                    folder,
                    result,
                });
            }
        });
        self.ui_state.add_log(format!("Choose a storage root for {folder}"));
    }

    pub fn save_result(&self) {
        let Some(result) = self.ui_state.last_result.as_ref() else {
            return;
        };
        let data = result.data.clone();
        let filename = result.filename.clone();
        let extension = filename.rsplit('.').next().unwrap_or_default().to_string();
        let cmd_tx = self.cmd_tx.clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Image", &[extension.as_str()])
                .set_file_name(&filename)
                .save_file()
            {
                let _ = cmd_tx.send(WorkerCommand::SaveResult { path, data });
            }
        });
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for FramecropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Framecrop")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Framecrop");
                        ui.label("Fixed-frame image cropping");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
