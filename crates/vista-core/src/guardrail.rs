//! Size thresholds for accepting an image and sizing its working copy.

use crate::config::GuardrailConfig;
use crate::error::{Result, VistaError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitCheck {
    Accept,
    Reject,
}

impl LimitCheck {
    pub fn is_accept(self) -> bool {
        self == Self::Accept
    }
}

/// Reject when either side exceeds `hard_max_dim` or the area exceeds
/// `hard_max_pixels`. Values equal to a limit are accepted.
pub fn check_hard_limits(width: u32, height: u32, config: &GuardrailConfig) -> LimitCheck {
    let pixels = width as u64 * height as u64;
    if width > config.hard_max_dim || height > config.hard_max_dim || pixels > config.hard_max_pixels
    {
        LimitCheck::Reject
    } else {
        LimitCheck::Accept
    }
}

/// [`check_hard_limits`] as a `Result`, carrying the active thresholds on
/// rejection.
pub fn ensure_within_limits(width: u32, height: u32, config: &GuardrailConfig) -> Result<()> {
    match check_hard_limits(width, height, config) {
        LimitCheck::Accept => Ok(()),
        LimitCheck::Reject => Err(VistaError::TooLarge {
            width,
            height,
            limits: *config,
        }),
    }
}

/// Size of the display copy derived from a full-resolution raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkingSize {
    pub width: u32,
    pub height: u32,
    /// In `(0, 1]`; 1 means no downscale.
    pub factor: f64,
}

impl WorkingSize {
    pub fn is_downscaled(&self) -> bool {
        self.factor < 1.0
    }
}

/// Shrink so the long side equals `display_max_dim`, preserving aspect.
pub fn compute_working_size(width: u32, height: u32, config: &GuardrailConfig) -> WorkingSize {
    fit_within(width, height, config.display_max_dim)
}

/// Shrink so neither side exceeds `max_side`, preserving aspect. Sizes
/// already within the cap come back unchanged with factor 1.
pub fn fit_within(width: u32, height: u32, max_side: u32) -> WorkingSize {
    let long_side = width.max(height);
    if long_side <= max_side {
        return WorkingSize {
            width,
            height,
            factor: 1.0,
        };
    }

    let factor = max_side as f64 / long_side as f64;
    let scale = |dim: u32| ((dim as f64 * factor).round() as u32).clamp(1, max_side.max(1));
    WorkingSize {
        width: scale(width),
        height: scale(height),
        factor,
    }
}
