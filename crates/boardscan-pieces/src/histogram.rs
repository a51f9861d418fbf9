use boardscan_core::RgbImageView;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{HistogramParams, PieceError};

/// Square `bins × bins` histogram, row index = red chromaticity bin,
/// column index = green chromaticity bin. Stored row-major.
///
/// `values.len() == bins * bins` holds for every instance, including
/// deserialized ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistogram")]
pub struct Histogram {
    bins: usize,
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct RawHistogram {
    bins: usize,
    values: Vec<f32>,
}

impl TryFrom<RawHistogram> for Histogram {
    type Error = PieceError;

    fn try_from(raw: RawHistogram) -> Result<Self, Self::Error> {
        Self::from_values(raw.bins, raw.values)
    }
}

impl Histogram {
    pub fn zeros(bins: usize) -> Self {
        Self {
            bins,
            values: vec![0.0; bins * bins],
        }
    }

    /// Wrap `bins * bins` row-major values.
    pub fn from_values(bins: usize, values: Vec<f32>) -> Result<Self, PieceError> {
        if values.len() != bins * bins {
            return Err(PieceError::DimensionMismatch {
                expected: bins * bins,
                got: values.len(),
            });
        }
        Ok(Self { bins, values })
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.bins
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn get(&self, r: usize, g: usize) -> f32 {
        self.values[r * self.bins + g]
    }

    pub fn total(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Flat index of the largest bin (first one on ties).
    pub fn peak(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            if best.is_none_or(|(_, b)| v > b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| i)
    }
}

#[inline]
fn bin_of(ratio: f32, bins: usize) -> usize {
    let idx = (ratio * (bins - 1) as f32 + 0.5) as usize;
    idx.min(bins - 1)
}

/// Normalized 2-D chromaticity histogram of a square image.
///
/// Each pixel contributes to bin `(round(r * (N-1)), round(g * (N-1)))`
/// with `r = R / (R+G+B)` and `g = G / (R+G+B)`; pure black pixels count as
/// `r = g = 0`. Bins are divided by the pixel count, so the total is 1 for
/// any non-empty view. An empty view yields an all-zero histogram.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(view), fields(w = view.width, h = view.height))
)]
pub fn chromaticity_histogram(
    view: &RgbImageView<'_>,
    params: &HistogramParams,
) -> Result<Histogram, PieceError> {
    let bins = params.bins;
    if bins == 0 {
        return Err(PieceError::InvalidBins(bins));
    }

    let mut counts = vec![0u32; bins * bins];
    for [r, g, b] in view.pixels() {
        let sum = r as u32 + g as u32 + b as u32;
        let (rn, gn) = if sum == 0 {
            (0.0, 0.0)
        } else {
            (r as f32 / sum as f32, g as f32 / sum as f32)
        };
        counts[bin_of(rn, bins) * bins + bin_of(gn, bins)] += 1;
    }

    let n = view.pixel_count();
    if n == 0 {
        return Ok(Histogram::zeros(bins));
    }
    let inv = 1.0 / n as f32;
    Ok(Histogram {
        bins,
        values: counts.into_iter().map(|c| c as f32 * inv).collect(),
    })
}

/// Histogram-intersection distance, `1 - Σ min(a[i], b[i])`.
///
/// 0 for identical normalized histograms, 1 for disjoint support.
pub fn intersection_distance(a: &Histogram, b: &Histogram) -> Result<f32, PieceError> {
    if a.bins != b.bins || a.values.len() != b.values.len() {
        return Err(PieceError::DimensionMismatch {
            expected: a.values.len(),
            got: b.values.len(),
        });
    }
    let overlap: f64 = a
        .values
        .iter()
        .zip(&b.values)
        .map(|(&x, &y)| x.min(y) as f64)
        .sum();
    Ok((1.0 - overlap) as f32)
}
