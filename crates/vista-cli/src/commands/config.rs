use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::settings::GuardrailArgs;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the effective guardrail config as TOML.
///
/// With no `--config` and no overrides this is the default config.
pub fn run(args: &ConfigArgs, guardrails: &GuardrailArgs) -> Result<()> {
    let config = guardrails.resolve()?;
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
