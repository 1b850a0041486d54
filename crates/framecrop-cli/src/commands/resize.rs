use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use framecrop_core::config::EditorConfig;
use framecrop_core::io::{resize_image, ImageCrateEncoder, Quality, SourceFile};
use framecrop_core::upload::{BlobSink, DirectorySink, UploadFolder};

use crate::commands::crop::FolderArg;
use crate::summary::print_resize_summary;

#[derive(Args)]
pub struct ResizeArgs {
    /// Input image
    pub file: PathBuf,

    /// Maximum output width in pixels (config value when omitted)
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Encode quality in (0, 1] (config value when omitted)
    #[arg(long)]
    pub quality: Option<f32>,

    /// Storage root; the result lands in <out-dir>/<folder>/
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Upload folder, overriding the config
    #[arg(long)]
    pub folder: Option<FolderArg>,
}

pub fn run(args: &ResizeArgs, config: &EditorConfig) -> Result<()> {
    let file = SourceFile::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let max_width = args.max_width.unwrap_or(config.resize_max_width);
    let quality = Quality::new(args.quality.unwrap_or(config.quality));

    let result = resize_image(&file, max_width, quality, &ImageCrateEncoder)?;

    let folder = args.folder.map(UploadFolder::from).unwrap_or(config.folder);
    let location = DirectorySink::new(&args.out_dir)
        .upload(folder, &result)
        .with_context(|| format!("Failed to store result under {}", args.out_dir.display()))?;

    print_resize_summary(&file.name, &result, &location);
    Ok(())
}
