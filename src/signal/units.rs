//! Conversion of flat screen coordinates into visual angle.
//!
//! The screen centre maps to 0°. One axis is converted per call.

use crate::error::{GazeError, Result};

/// Physical extent of one screen axis, in the same unit as the viewing distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenAxis {
    pub min: f64,
    pub max: f64,
}

impl ScreenAxis {
    /// Axis spanning `0..size`.
    pub fn spanning(size: f64) -> Self {
        Self { min: 0.0, max: size }
    }

    fn center(&self) -> f64 {
        self.min + (self.max - self.min) / 2.0
    }
}

/// Convert flat coordinates (cm, inches, ...) on one screen axis to degrees.
pub fn coords_to_degrees(values: &[f64], viewing_distance: f64, axis: ScreenAxis) -> Result<Vec<f64>> {
    if !viewing_distance.is_finite() || viewing_distance <= 0.0 {
        return Err(GazeError::invalid(format!(
            "viewing distance must be positive, got {}",
            viewing_distance
        )));
    }
    if !(axis.max > axis.min) {
        return Err(GazeError::invalid(format!(
            "screen axis max ({}) must exceed min ({})",
            axis.max, axis.min
        )));
    }

    let center = axis.center();
    Ok(values
        .iter()
        .map(|v| (v - center).atan2(viewing_distance).to_degrees())
        .collect())
}

/// Convert pixel positions on one screen axis to degrees.
///
/// `screen_size` is the physical length of the axis and `resolution` its
/// pixel count.
pub fn pixels_to_degrees(
    values: &[f64],
    viewing_distance: f64,
    screen_size: f64,
    resolution: f64,
) -> Result<Vec<f64>> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(GazeError::invalid(format!(
            "screen resolution must be positive, got {}",
            resolution
        )));
    }
    let scale = screen_size / resolution;
    let physical: Vec<f64> = values.iter().map(|px| px * scale).collect();
    coords_to_degrees(&physical, viewing_distance, ScreenAxis::spanning(screen_size))
}
