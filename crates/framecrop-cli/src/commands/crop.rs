use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, ArgMatches, Args};
use framecrop_core::config::EditorConfig;
use framecrop_core::editor::CropEditor;
use framecrop_core::io::SourceFile;
use framecrop_core::raster::source_rect;
use framecrop_core::upload::{BlobSink, DirectorySink, UploadFolder};
use framecrop_core::viewport::{Point, PointerId};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::summary::{print_crop_summary, CropSummary};

const SCRIPT_POINTER: PointerId = PointerId(1);

/// Pointer movement in frame pixels, written as `dx,dy`.
#[derive(Clone, Copy, Debug)]
pub struct DragDelta {
    pub dx: f64,
    pub dy: f64,
}

impl FromStr for DragDelta {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (dx, dy) = s
            .split_once(',')
            .ok_or_else(|| format!("expected dx,dy but got '{s}'"))?;
        let dx = dx.trim().parse().map_err(|e| format!("bad dx '{dx}': {e}"))?;
        let dy = dy.trim().parse().map_err(|e| format!("bad dy '{dy}': {e}"))?;
        Ok(Self { dx, dy })
    }
}

#[derive(Args)]
pub struct CropArgs {
    /// Input image
    pub file: PathBuf,

    /// Pan by dragging from the frame center (repeatable)
    #[arg(long, value_name = "DX,DY", allow_hyphen_values = true, action = ArgAction::Append)]
    pub drag: Vec<DragDelta>,

    /// Set the zoom slider to an absolute scale (repeatable)
    #[arg(long, value_name = "SCALE", action = ArgAction::Append)]
    pub zoom: Vec<f64>,

    /// Wheel notches at the frame center: positive zooms in, negative out (repeatable)
    #[arg(long, value_name = "N", allow_hyphen_values = true, action = ArgAction::Append)]
    pub wheel: Vec<i32>,

    /// Return to the initial centered view (repeatable)
    #[arg(
        long,
        action = ArgAction::Append,
        num_args = 0,
        default_missing_value = "true"
    )]
    pub reset: Vec<bool>,

    /// Storage root; the crop lands in <out-dir>/<folder>/
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Upload folder, overriding the config
    #[arg(long)]
    pub folder: Option<FolderArg>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum FolderArg {
    Discounts,
    Logos,
}

impl From<FolderArg> for UploadFolder {
    fn from(f: FolderArg) -> Self {
        match f {
            FolderArg::Discounts => UploadFolder::Discounts,
            FolderArg::Logos => UploadFolder::Logos,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Gesture {
    Drag(DragDelta),
    Zoom(f64),
    Wheel(i32),
    Reset,
}

/// Rebuild the gesture script in the order the flags appeared.
fn gesture_script(args: &CropArgs, matches: &ArgMatches) -> Vec<Gesture> {
    let mut script: Vec<(usize, Gesture)> = Vec::new();
    let indices = |id: &str| -> Vec<usize> {
        matches
            .indices_of(id)
            .map(|it| it.collect())
            .unwrap_or_default()
    };

    script.extend(
        indices("drag")
            .into_iter()
            .zip(args.drag.iter().map(|d| Gesture::Drag(*d))),
    );
    script.extend(
        indices("zoom")
            .into_iter()
            .zip(args.zoom.iter().map(|z| Gesture::Zoom(*z))),
    );
    script.extend(
        indices("wheel")
            .into_iter()
            .zip(args.wheel.iter().map(|n| Gesture::Wheel(*n))),
    );
    script.extend(
        indices("reset")
            .into_iter()
            .zip(args.reset.iter().map(|_| Gesture::Reset)),
    );

    script.sort_by_key(|(i, _)| *i);
    script.into_iter().map(|(_, g)| g).collect()
}

pub fn run(args: &CropArgs, matches: &ArgMatches, config: &EditorConfig) -> Result<()> {
    let file = SourceFile::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let mut editor = CropEditor::new(config.clone());

    editor.load(file)?;
    let initial = editor.on_image_loaded(config.frame)?;
    debug!(?initial, "Viewport ready");

    let center = config.frame.center();
    for gesture in gesture_script(args, matches) {
        debug!(?gesture, "Applying gesture");
        match gesture {
            Gesture::Drag(d) => {
                editor.begin_drag(SCRIPT_POINTER, center);
                editor.continue_drag(SCRIPT_POINTER, Point::new(center.x + d.dx, center.y + d.dy));
                editor.release_pointer(SCRIPT_POINTER);
            }
            Gesture::Zoom(s) => {
                if !(s.is_finite() && s > 0.0) {
                    bail!("zoom must be a positive number, got {s}");
                }
                editor.set_zoom(s);
            }
            Gesture::Wheel(n) => {
                // Wheel towards the user zooms out.
                let delta_y = if n > 0 { -1.0 } else { 1.0 };
                for _ in 0..n.unsigned_abs() {
                    editor.wheel(delta_y, center);
                }
            }
            Gesture::Reset => {
                editor.reset();
            }
        }
    }

    let state = editor
        .viewport()
        .context("editor left the editing state")?;
    let (min_scale, max_scale) = editor
        .policy()
        .map(|p| (p.min_scale(), p.max_scale()))
        .unwrap_or((state.scale, state.scale));
    let source_name = editor
        .image()
        .map(|i| i.name().to_string())
        .unwrap_or_default();
    let source_size = editor.image().map(|i| i.size());
    let rect = source_rect(&state, config.frame);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message("Encoding crop");
    pb.enable_steady_tick(Duration::from_millis(100));
    let result = editor.confirm();
    pb.finish_and_clear();
    let result = result?;

    let folder = args.folder.map(UploadFolder::from).unwrap_or(config.folder);
    let sink = DirectorySink::new(&args.out_dir);
    let location = sink
        .upload(folder, &result)
        .with_context(|| format!("Failed to store crop under {}", args.out_dir.display()))?;

    print_crop_summary(&CropSummary {
        source: &source_name,
        source_size,
        state,
        min_scale,
        max_scale,
        rect,
        result: &result,
        folder,
        location: &location,
    });

    Ok(())
}
