//! Configuration schema types
//!
//! Every section and field is optional; missing values fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Defaults for general (non quadrant) rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateConfig {
    /// Grow the canvas to the rotated bounding box instead of clipping
    pub resize: bool,
    /// Written where no opaque source pixel contributes to a destination pixel
    pub background: Color,
}

impl Default for RotateConfig {
    fn default() -> Self {
        Self { resize: false, background: Color::TRANSPARENT }
    }
}

/// Defaults for assembling animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration given to frames built from bare buffers
    pub default_duration: u32,
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rotate: RotateConfig,
    pub animation: AnimationConfig,
}
