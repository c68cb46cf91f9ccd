//! SKF grease replenishment estimate: G = 0.005 × D × B

use crate::error::{AppError, AppResult};

pub const SKF_FACTOR: f64 = 0.005;

/// Grams of grease for a bearing of outer diameter `D` and width `B`, in millimetres
pub fn grease_grams(bearing_diameter_mm: f64, bearing_width_mm: f64) -> AppResult<f64> {
    for (name, value) in [("diameter", bearing_diameter_mm), ("width", bearing_width_mm)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::Validation(format!(
                "Bearing {} must be positive, got {}",
                name, value
            )));
        }
    }
    Ok(SKF_FACTOR * bearing_diameter_mm * bearing_width_mm)
}

/// Round to two decimals for display
pub fn round_grams(grams: f64) -> f64 {
    (grams * 100.0).round() / 100.0
}
