use serde::{Deserialize, Serialize};

/// Chromaticity histogram settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramParams {
    /// Bins per axis; the histogram has `bins * bins` cells.
    pub bins: usize,
}

impl Default for HistogramParams {
    fn default() -> Self {
        Self { bins: 16 }
    }
}

/// Edge-energy emptiness test settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptySquareParams {
    /// Start of the central window as a fraction of the square side.
    pub crop_start: f32,
    /// End of the central window as a fraction of the square side.
    pub crop_end: f32,
    /// Canny hysteresis thresholds.
    pub canny_low: f32,
    pub canny_high: f32,
    /// A square whose summed edge intensity (0..255 per pixel) in the
    /// central window is below this is empty.
    pub energy_threshold: f64,
}

impl Default for EmptySquareParams {
    fn default() -> Self {
        Self {
            crop_start: 0.2,
            crop_end: 0.8,
            canny_low: 10.0,
            canny_high: 250.0,
            energy_threshold: 7000.0,
        }
    }
}
