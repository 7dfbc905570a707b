//! Manager-wide configuration

use serde::{Deserialize, Serialize};

use crate::error::{Result, WmError};
use crate::math::Size;

/// Stacking key reported for windows never brought to front.
///
/// Sits above ordinary page content so modals overlay it.
pub const DEFAULT_Z_BASELINE: u64 = 1000;

/// Smallest width a resize gesture may produce
pub const DEFAULT_MIN_WIDTH: f32 = 140.0;

/// Smallest height a resize gesture may produce
pub const DEFAULT_MIN_HEIGHT: f32 = 80.0;

/// Step between auto-placed windows
pub const DEFAULT_CASCADE_OFFSET: f32 = 30.0;

/// Configuration shared by every window in a [`Desktop`](crate::Desktop)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WmConfig {
    /// Floor value of the z-order counter
    pub z_baseline: u64,
    /// Resize width floor
    pub min_width: f32,
    /// Resize height floor
    pub min_height: f32,
    /// Offset between cascaded default positions
    pub cascade_offset: f32,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            z_baseline: DEFAULT_Z_BASELINE,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            cascade_offset: DEFAULT_CASCADE_OFFSET,
        }
    }
}

impl WmConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject floors that would let a window collapse or go non-finite
    pub fn validate(&self) -> Result<()> {
        if !(self.min_width.is_finite() && self.min_width > 0.0) {
            return Err(WmError::InvalidConfig(format!(
                "minWidth must be positive, got {}",
                self.min_width
            )));
        }
        if !(self.min_height.is_finite() && self.min_height > 0.0) {
            return Err(WmError::InvalidConfig(format!(
                "minHeight must be positive, got {}",
                self.min_height
            )));
        }
        if !self.cascade_offset.is_finite() {
            return Err(WmError::InvalidConfig("cascadeOffset must be finite".into()));
        }
        Ok(())
    }

    /// Resize floor as a size
    #[inline]
    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }
}
