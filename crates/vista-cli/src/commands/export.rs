use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::settings::GuardrailArgs;

#[derive(Args)]
pub struct ExportArgs {
    /// Input file path or http(s) URL
    pub source: String,

    /// Output file path; format follows the extension
    #[arg(short, long, default_value = "upright.png")]
    pub output: PathBuf,

    /// Write the display-sized working copy instead of the full-resolution original
    #[arg(long)]
    pub working: bool,
}

pub fn run(args: &ExportArgs, guardrails: &GuardrailArgs) -> Result<()> {
    let config = guardrails.resolve()?;
    let loaded = super::load_with_spinner(&args.source, config)?;

    let raster = if args.working {
        &loaded.working
    } else {
        &loaded.original
    };
    raster
        .image()
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Saved {}x{} to {}",
        raster.width(),
        raster.height(),
        args.output.display()
    );
    Ok(())
}
