use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use framecrop_core::config::EditorConfig;
use framecrop_core::io::{decode, SourceFile};
use framecrop_core::viewport::ClampPolicy;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs, config: &EditorConfig) -> Result<()> {
    let file = SourceFile::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let image = decode(&file)?;
    let policy = ClampPolicy::new(image.size(), config.frame, config.max_scale);

    println!("File:        {}", file.name);
    println!("Type:        {}", file.mime);
    println!("Size:        {:.1} KB", file.bytes.len() as f64 / 1024.0);
    println!(
        "Dimensions:  {}x{}",
        image.natural_width(),
        image.natural_height()
    );
    println!(
        "Frame:       {}x{}",
        config.frame.width, config.frame.height
    );
    println!(
        "Zoom range:  {:.4} - {:.4}",
        policy.min_scale(),
        policy.max_scale()
    );
    println!(
        "Output:      {}x{}",
        config.output.width, config.output.height
    );

    Ok(())
}
