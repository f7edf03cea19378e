use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::projector::ProjectorOptions;

/// Height of the bottom sheet that overlaps the photo when pins are hidden (barcode results).
pub const DEFAULT_SHEET_OVERLAP: f64 = 160.0;

/// Tunables for a full layout pass.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinLayoutConfig {
    pub projector: ProjectorOptions,
    /// Pixels trimmed from the container height for the image style when pins are hidden.
    pub sheet_overlap: f64,
}

impl Default for PinLayoutConfig {
    fn default() -> Self {
        Self {
            projector: ProjectorOptions::default(),
            sheet_overlap: DEFAULT_SHEET_OVERLAP,
        }
    }
}

impl PinLayoutConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let generator = &self.projector.generator;
        if !(generator.min_distance.is_finite() && generator.min_distance > 0.0) {
            return Err(invalid(format!(
                "projector.generator.min_distance must be a positive number, got {}",
                generator.min_distance
            )));
        }
        if !generator.jitter.iter().all(|v| v.is_finite()) {
            return Err(invalid("projector.generator.jitter must be finite"));
        }
        if !(generator.box_half_extent.is_finite() && generator.box_half_extent >= 0.0) {
            return Err(invalid(format!(
                "projector.generator.box_half_extent must be non-negative, got {}",
                generator.box_half_extent
            )));
        }

        let b = &generator.bounds;
        if ![b.min_x, b.max_x, b.min_y, b.max_y]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(invalid("projector.generator.bounds must be finite"));
        }
        if b.min_x > b.max_x || b.min_y > b.max_y {
            return Err(invalid(format!(
                "projector.generator.bounds are inverted: x {}..{}, y {}..{}",
                b.min_x, b.max_x, b.min_y, b.max_y
            )));
        }

        if !(self.sheet_overlap.is_finite() && self.sheet_overlap >= 0.0) {
            return Err(invalid(format!(
                "sheet_overlap must be non-negative, got {}",
                self.sheet_overlap
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        message: message.into(),
    }
}
