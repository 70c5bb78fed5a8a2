use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vista_core::orientation::{is_jpeg, parse_orientation};

#[derive(Args)]
pub struct OrientationArgs {
    /// Input JPEG file
    pub file: PathBuf,
}

pub fn run(args: &OrientationArgs) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    if !is_jpeg(&bytes) {
        println!("{}: not a JPEG, treated as 1 (upright)", args.file.display());
        return Ok(());
    }

    match parse_orientation(&bytes) {
        Some(code) => println!("{}: {}", args.file.display(), code),
        None => println!(
            "{}: no orientation tag, treated as 1 (upright)",
            args.file.display()
        ),
    }
    Ok(())
}
