//! Crop editor session state machine.
//!
//! ```text
//! Idle --select_file--> (decoding) --finish_decode--> Loaded
//! Loaded --on_image_loaded--> Editing <--> pan / zoom
//! Editing --begin_export--> (exporting) --finish_export--> Confirmed
//! any --cancel--> Idle
//! ```
//!
//! Decode and export are split into a job that does the heavy work and a
//! `finish_*` call that applies its outcome, so a host can run the job on a
//! worker thread. Only one job may be outstanding at a time.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::consts::ASPECT_TOLERANCE;
use crate::error::{CropError, Result};
use crate::io::encode::{Encoder, ImageCrateEncoder, Quality};
use crate::io::handle::{DisplayHandle, DisplayHandles};
use crate::io::source::{self, SourceFile, SourceImage};
use crate::raster::{self, CropResult};
use crate::upload::Preview;
use crate::viewport::{
    ClampPolicy, FrameSize, GestureController, Point, PointerId, ViewportState,
};

pub type SharedEncoder = Arc<dyn Encoder + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    Loaded,
    Editing,
    Confirmed,
}

/// Decode work for an accepted file.
#[derive(Debug)]
pub struct DecodeJob {
    ticket: u64,
    file: SourceFile,
}

pub struct DecodeOutcome {
    ticket: u64,
    result: Result<SourceImage>,
}

impl DecodeJob {
    pub fn file_name(&self) -> &str {
        &self.file.name
    }

    pub fn run(self) -> DecodeOutcome {
        DecodeOutcome {
            ticket: self.ticket,
            result: source::decode(&self.file),
        }
    }
}

/// Rasterize and encode work for a snapshot of the viewport.
pub struct ExportJob {
    ticket: u64,
    state: ViewportState,
    frame: FrameSize,
    image: SourceImage,
    config: EditorConfig,
    encoder: SharedEncoder,
}

pub struct ExportOutcome {
    ticket: u64,
    result: Result<CropResult>,
}

impl ExportJob {
    pub fn viewport(&self) -> ViewportState {
        self.state
    }

    pub fn run(self) -> ExportOutcome {
        let result = raster::export(
            &self.state,
            self.frame,
            &self.image,
            self.config.output,
            Quality::new(self.config.quality),
            self.encoder.as_ref(),
        );
        ExportOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

enum Pending {
    Decode { ticket: u64, handle: DisplayHandle },
    Export { ticket: u64 },
}

impl Pending {
    fn label(&self) -> &'static str {
        match self {
            Pending::Decode { .. } => "decode",
            Pending::Export { .. } => "export",
        }
    }
}

struct Session {
    image: SourceImage,
    handle: DisplayHandle,
    gestures: Option<GestureController>,
}

pub struct CropEditor {
    config: EditorConfig,
    encoder: SharedEncoder,
    handles: DisplayHandles,
    phase: EditorPhase,
    session: Option<Session>,
    pending: Option<Pending>,
    next_ticket: u64,
    preview: Option<Preview>,
    last_error: Option<String>,
}

impl CropEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_encoder(config, Arc::new(ImageCrateEncoder))
    }

    pub fn with_encoder(config: EditorConfig, encoder: SharedEncoder) -> Self {
        Self {
            config,
            encoder,
            handles: DisplayHandles::new(),
            phase: EditorPhase::Idle,
            session: None,
            pending: None,
            next_ticket: 0,
            preview: None,
            last_error: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn handles(&self) -> &DisplayHandles {
        &self.handles
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// User-facing message for the most recent failure.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.session.as_ref().map(|s| &s.image)
    }

    pub fn display_url(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.handle.url())
    }

    pub fn viewport(&self) -> Option<ViewportState> {
        self.gestures().map(|g| g.state())
    }

    pub fn policy(&self) -> Option<&ClampPolicy> {
        self.gestures().map(|g| g.policy())
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures().is_some_and(|g| g.is_dragging())
    }

    /// Show an existing remote image until something else replaces it.
    pub fn seed_remote_preview(&mut self, url: impl Into<String>) {
        if self.preview.is_none() {
            self.preview = Some(Preview::Remote(url.into()));
        }
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Accept a file and hand back the decode work.
    ///
    /// Non-image files are rejected before anything is allocated and leave
    /// the editor untouched. Accepting a file ends the current session.
    pub fn select_file(&mut self, file: SourceFile) -> Result<DecodeJob> {
        self.ensure_not_busy()?;
        if let Err(e) = source::check_mime(&file) {
            return Err(self.fail(e));
        }

        self.end_session("replaced");
        self.phase = EditorPhase::Idle;
        self.last_error = None;
        let handle = self.handles.allocate(&file.name);
        let ticket = self.ticket();
        debug!(ticket, name = %file.name, mime = %file.mime, "Accepted source file");
        self.pending = Some(Pending::Decode { ticket, handle });
        Ok(DecodeJob { ticket, file })
    }

    /// Apply a decode outcome. Success moves to `Loaded`.
    pub fn finish_decode(&mut self, outcome: DecodeOutcome) -> Result<()> {
        let handle = match self.pending.take() {
            Some(Pending::Decode { ticket, handle }) if ticket == outcome.ticket => handle,
            other => {
                self.pending = other;
                return Err(CropError::InvalidState(
                    "no matching decode in progress".into(),
                ));
            }
        };

        match outcome.result {
            Ok(image) => {
                info!(
                    name = image.name(),
                    width = image.natural_width(),
                    height = image.natural_height(),
                    "Source image loaded"
                );
                self.session = Some(Session {
                    image,
                    handle,
                    gestures: None,
                });
                self.phase = EditorPhase::Loaded;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                handle.revoke();
                self.phase = EditorPhase::Idle;
                Err(self.fail(e))
            }
        }
    }

    /// Select and decode in one step.
    pub fn load(&mut self, file: SourceFile) -> Result<()> {
        let job = self.select_file(file)?;
        self.finish_decode(job.run())
    }

    /// Called once the host has measured the frame. Centers the image at
    /// cover scale and starts editing.
    pub fn on_image_loaded(&mut self, frame: FrameSize) -> Result<ViewportState> {
        if self.phase != EditorPhase::Loaded {
            return Err(self.fail(CropError::InvalidState(format!(
                "image-loaded notification in {:?}",
                self.phase
            ))));
        }
        if !frame.is_valid() {
            return Err(self.fail(CropError::InvalidState(format!(
                "frame {}x{} has no area",
                frame.width, frame.height
            ))));
        }
        if (frame.aspect() - self.config.output.aspect()).abs() > ASPECT_TOLERANCE {
            warn!(
                frame_aspect = frame.aspect(),
                output_aspect = self.config.output.aspect(),
                "Frame and output aspect differ, export will stretch"
            );
        }

        let max_scale = self.config.max_scale;
        let wheel_step = self.config.wheel_step;
        let Some(session) = self.session.as_mut() else {
            return Err(CropError::InvalidState("no source image".into()));
        };
        let policy = ClampPolicy::new(session.image.size(), frame, max_scale);
        let gestures = GestureController::new(policy, wheel_step);
        let state = gestures.state();
        debug!(
            min_scale = policy.min_scale(),
            max_scale = policy.max_scale(),
            offset_x = state.offset_x,
            offset_y = state.offset_y,
            "Viewport initialized"
        );
        session.gestures = Some(gestures);
        self.phase = EditorPhase::Editing;
        Ok(state)
    }

    // -----------------------------------------------------------------------
    // Gestures. Ignored unless editing with no export outstanding.
    // -----------------------------------------------------------------------

    pub fn begin_drag(&mut self, pointer: PointerId, pos: Point) {
        if let Some(g) = self.gestures_mut() {
            g.begin_drag(pointer, pos);
        }
    }

    pub fn continue_drag(&mut self, pointer: PointerId, pos: Point) -> Option<ViewportState> {
        let g = self.gestures_mut()?;
        g.continue_drag(pointer, pos).then(|| g.state())
    }

    pub fn release_pointer(&mut self, pointer: PointerId) {
        if let Some(g) = self.gestures_mut() {
            g.release_pointer(pointer);
        }
    }

    pub fn end_drag(&mut self) {
        if let Some(g) = self.gestures_mut() {
            g.end_drag();
        }
    }

    pub fn zoom_at(&mut self, pivot: Point, scale: f64) -> Option<ViewportState> {
        let g = self.gestures_mut()?;
        g.zoom_at(pivot, scale);
        Some(g.state())
    }

    pub fn wheel(&mut self, delta_y: f64, cursor: Point) -> Option<ViewportState> {
        let g = self.gestures_mut()?;
        g.wheel(delta_y, cursor);
        Some(g.state())
    }

    /// Zoom slider input, pivoted at the frame center.
    pub fn set_zoom(&mut self, scale: f64) -> Option<ViewportState> {
        let g = self.gestures_mut()?;
        g.set_zoom(scale);
        Some(g.state())
    }

    pub fn reset(&mut self) -> Option<ViewportState> {
        let g = self.gestures_mut()?;
        g.reset();
        Some(g.state())
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Snapshot the viewport and hand back the export work.
    pub fn begin_export(&mut self) -> Result<ExportJob> {
        self.ensure_not_busy()?;
        let state = match self.viewport() {
            Some(state) if self.phase == EditorPhase::Editing => state,
            _ => {
                return Err(self.fail(CropError::InvalidState(format!(
                    "nothing to confirm in {:?}",
                    self.phase
                ))))
            }
        };
        let (image, frame) = match self.session.as_ref() {
            Some(Session {
                image,
                gestures: Some(g),
                ..
            }) => (image.clone(), g.policy().frame()),
            _ => return Err(CropError::InvalidState("no active session".into())),
        };

        self.last_error = None;
        let ticket = self.ticket();
        debug!(ticket, scale = state.scale, "Export started");
        self.pending = Some(Pending::Export { ticket });
        Ok(ExportJob {
            ticket,
            state,
            frame,
            image,
            config: self.config.clone(),
            encoder: Arc::clone(&self.encoder),
        })
    }

    /// Apply an export outcome. Success ends the session in `Confirmed`;
    /// failure leaves the session editable.
    pub fn finish_export(&mut self, outcome: ExportOutcome) -> Result<CropResult> {
        match self.pending.take() {
            Some(Pending::Export { ticket }) if ticket == outcome.ticket => {}
            other => {
                self.pending = other;
                return Err(CropError::InvalidState(
                    "no matching export in progress".into(),
                ));
            }
        }

        match outcome.result {
            Ok(result) => {
                self.end_session("confirmed");
                self.phase = EditorPhase::Confirmed;
                self.last_error = None;
                self.preview = Some(Preview::Local {
                    filename: result.filename.clone(),
                    content_type: result.content_type,
                    width: result.width,
                    height: result.height,
                });
                Ok(result)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Export in one step.
    pub fn confirm(&mut self) -> Result<CropResult> {
        let job = self.begin_export()?;
        self.finish_export(job.run())
    }

    // -----------------------------------------------------------------------
    // Leaving a session
    // -----------------------------------------------------------------------

    /// Abandon the current session without producing a result.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_not_busy()?;
        self.end_session("cancelled");
        self.phase = EditorPhase::Idle;
        Ok(())
    }

    /// Drop the session and the preview. The field's value becomes empty.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_not_busy()?;
        self.end_session("cleared");
        self.preview = None;
        self.last_error = None;
        self.phase = EditorPhase::Idle;
        Ok(())
    }

    // -----------------------------------------------------------------------

    fn gestures(&self) -> Option<&GestureController> {
        self.session.as_ref().and_then(|s| s.gestures.as_ref())
    }

    fn gestures_mut(&mut self) -> Option<&mut GestureController> {
        if self.phase != EditorPhase::Editing || self.pending.is_some() {
            return None;
        }
        self.session.as_mut().and_then(|s| s.gestures.as_mut())
    }

    fn ensure_not_busy(&mut self) -> Result<()> {
        match self.pending.as_ref().map(Pending::label) {
            Some(label) => Err(self.fail(CropError::OperationInFlight(label))),
            None => Ok(()),
        }
    }

    fn end_session(&mut self, reason: &str) {
        if let Some(session) = self.session.take() {
            debug!(reason, name = session.image.name(), "Session ended");
            session.handle.revoke();
        }
    }

    fn ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    fn fail(&mut self, err: CropError) -> CropError {
        warn!(error = %err, "Editor operation failed");
        self.last_error = Some(err.user_message());
        err
    }
}
