use anyhow::Result;
use clap::Args;

use crate::settings::GuardrailArgs;
use crate::summary::print_image_summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Input file path or http(s) URL
    pub source: String,
}

pub fn run(args: &InfoArgs, guardrails: &GuardrailArgs) -> Result<()> {
    let config = guardrails.resolve()?;
    let loaded = super::load_with_spinner(&args.source, config)?;
    print_image_summary(&loaded.metadata);
    Ok(())
}
