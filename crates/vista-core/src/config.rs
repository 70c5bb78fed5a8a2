use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DISPLAY_MAX_DIM, DEFAULT_HARD_MAX_DIM, DEFAULT_HARD_MAX_PIXELS};
use crate::error::{Result, VistaError};

/// Size guardrails in effect for a load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailConfig {
    /// Soft cap per side for the working raster; larger images are downscaled.
    pub display_max_dim: u32,
    /// Absolute per-side cap.
    pub hard_max_dim: u32,
    /// Absolute area cap.
    pub hard_max_pixels: u64,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            display_max_dim: DEFAULT_DISPLAY_MAX_DIM,
            hard_max_dim: DEFAULT_HARD_MAX_DIM,
            hard_max_pixels: DEFAULT_HARD_MAX_PIXELS,
        }
    }
}

impl GuardrailConfig {
    pub fn validate(&self) -> Result<()> {
        if self.display_max_dim == 0 {
            return Err(VistaError::InvalidConfig(
                "display_max_dim must be at least 1".into(),
            ));
        }
        if self.hard_max_dim == 0 {
            return Err(VistaError::InvalidConfig(
                "hard_max_dim must be at least 1".into(),
            ));
        }
        if self.hard_max_pixels == 0 {
            return Err(VistaError::InvalidConfig(
                "hard_max_pixels must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
