use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vista_core::config::GuardrailConfig;

/// Guardrail options shared by every subcommand.
#[derive(Args)]
pub struct GuardrailArgs {
    /// Guardrail config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Longest side of the display copy before downscaling
    #[arg(long, global = true)]
    pub display_max_dim: Option<u32>,

    /// Hard per-side limit
    #[arg(long, global = true)]
    pub hard_max_dim: Option<u32>,

    /// Hard total pixel limit
    #[arg(long, global = true)]
    pub hard_max_pixels: Option<u64>,
}

impl GuardrailArgs {
    /// Defaults, then the config file, then individual flags.
    pub fn resolve(&self) -> Result<GuardrailConfig> {
        let mut config = if let Some(ref path) = self.config {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid guardrail config")?
        } else {
            GuardrailConfig::default()
        };

        if let Some(v) = self.display_max_dim {
            config.display_max_dim = v;
        }
        if let Some(v) = self.hard_max_dim {
            config.hard_max_dim = v;
        }
        if let Some(v) = self.hard_max_pixels {
            config.hard_max_pixels = v;
        }

        config.validate()?;
        Ok(config)
    }
}
