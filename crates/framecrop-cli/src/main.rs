mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use framecrop_core::config::EditorConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "framecrop", about = "Crop photos to a fixed output frame")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Editor config (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image metadata and the zoom range it would get
    Info(commands::info::InfoArgs),
    /// Crop an image with a scripted sequence of gestures
    Crop(commands::crop::CropArgs),
    /// Downscale an image to a maximum width
    Resize(commands::resize::ResizeArgs),
    /// Print or save the default editor config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    // Gesture flags are applied in command-line order, which needs the raw matches.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Config(args) = &cli.command {
        return commands::config::run(args);
    }

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EditorConfig::default(),
    };

    match &cli.command {
        Commands::Info(args) => commands::info::run(args, &config),
        Commands::Crop(args) => {
            let sub = matches
                .subcommand_matches("crop")
                .context("missing crop arguments")?;
            commands::crop::run(args, sub, &config)
        }
        Commands::Resize(args) => commands::resize::run(args, &config),
        Commands::Config(_) => Ok(()),
    }
}
