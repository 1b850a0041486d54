mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::PathBuf;

use anyhow::Context;
use framecrop_core::config::EditorConfig;
use tracing::{info, warn};

const DEFAULT_CONFIG_FILE: &str = "framecrop.toml";

/// Config from the first argument, else `framecrop.toml` in the working
/// directory, else defaults.
fn load_config() -> anyhow::Result<EditorConfig> {
    let path = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !local.exists() {
                return Ok(EditorConfig::default());
            }
            local
        }
    };
    let config = EditorConfig::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config().unwrap_or_else(|e| {
        warn!("{e:#}, using defaults");
        EditorConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0])
            .with_drag_and_drop(true)
            .with_title("Framecrop"),
        ..Default::default()
    };

    eframe::run_native(
        "Framecrop",
        options,
        Box::new(move |cc| Ok(Box::new(app::FramecropApp::new(&cc.egui_ctx, config)?))),
    )
}
