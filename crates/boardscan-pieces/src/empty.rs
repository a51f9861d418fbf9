use boardscan_core::{PixelRect, RgbImageView, SquareParity};
use image::GrayImage;
use imageproc::edges::canny;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::EmptySquareParams;

/// Outcome of the emptiness test for one square.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Emptiness {
    pub empty: bool,
    /// Summed edge intensity inside the central window.
    pub energy: f64,
}

/// Edge-energy heuristic: a square with few edges in its centre is empty.
///
/// Low-contrast pieces can fall under the threshold and be reported empty.
///
/// Edges come from `imageproc::edges::canny`, which smooths with a σ = 1.4
/// Gaussian before taking L2 Sobel magnitudes. A Canny without smoothing and
/// with L1 magnitudes (OpenCV's default) answers a sharp step of height `d`
/// with roughly `4d`; here the response is closer to `2.2d`. The default
/// `canny_low`/`canny_high`/`energy_threshold` numbers are therefore not
/// interchangeable with thresholds tuned for the unsmoothed operator: a piece
/// needs a luma step of about 115 or more against its square to register.
#[derive(Clone, Debug, Default)]
pub struct EmptySquareDetector {
    params: EmptySquareParams,
}

impl EmptySquareDetector {
    pub fn new(params: EmptySquareParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &EmptySquareParams {
        &self.params
    }

    /// Canny edge map over the whole square, summed over the central
    /// `crop_start..crop_end` window.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, view), fields(w = view.width, h = view.height))
    )]
    pub fn edge_energy(&self, view: &RgbImageView<'_>) -> f64 {
        if view.width < 3 || view.height < 3 {
            return 0.0;
        }
        let (w, h) = (view.width as u32, view.height as u32);
        let Some(gray) = GrayImage::from_raw(w, h, view.to_luma()) else {
            return 0.0;
        };
        let edges = canny(&gray, self.params.canny_low, self.params.canny_high);

        let window = PixelRect::new(0, 0, w, h)
            .inner_fraction(self.params.crop_start, self.params.crop_end);
        let mut energy = 0.0;
        for y in window.y..window.y + window.height {
            for x in window.x..window.x + window.width {
                energy += edges.get_pixel(x, y)[0] as f64;
            }
        }
        energy
    }

    /// Decide emptiness. `parity` does not affect the threshold today.
    pub fn check(&self, view: &RgbImageView<'_>, parity: SquareParity) -> Emptiness {
        let energy = self.edge_energy(view);
        let empty = energy < self.params.energy_threshold;
        log::trace!("emptiness: parity={parity:?} energy={energy:.0} empty={empty}");
        Emptiness { empty, energy }
    }
}
