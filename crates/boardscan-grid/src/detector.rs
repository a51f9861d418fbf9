use boardscan_core::{ImageBounds, LineSegment, Point};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    build_squares, dedup_points, find_intersections, sort_lattice_points, GridError,
    IntersectionPoint, LatticeParams, Square, LATTICE_POINTS,
};

/// Output of a successful lattice reconstruction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatticeDetection {
    /// Number of in-bounds crossings before duplicate suppression.
    pub raw_intersections: usize,
    /// The 81 lattice points, row-major, in source-image coordinates.
    pub points: Vec<IntersectionPoint>,
    /// The 64 squares, row-major.
    pub squares: Vec<Square>,
}

/// Segments → crossings → unique crossings → row-major lattice → squares.
#[derive(Clone, Debug, Default)]
pub struct LatticeDetector {
    params: LatticeParams,
}

impl LatticeDetector {
    pub fn new(params: LatticeParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &LatticeParams {
        &self.params
    }

    /// Run every stage up to ordering and return the sorted crossings in
    /// source coordinates, together with the raw crossing count. Does not
    /// check the point count.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, segments), fields(segments = segments.len()))
    )]
    pub fn detect_points(
        &self,
        segments: &[LineSegment],
        source: ImageBounds,
    ) -> Result<(usize, Vec<IntersectionPoint>), GridError> {
        if segments.is_empty() {
            return Err(GridError::NoSegments);
        }

        let working = self
            .params
            .working_size
            .map(|[w, h]| ImageBounds::new(w as f32, h as f32))
            .unwrap_or(source);

        let raw = find_intersections(segments, working, &self.params.intersection);
        let unique = dedup_points(&raw, &self.params.dedup);
        let mut sorted = sort_lattice_points(&unique, &self.params.sort);

        if working != source {
            let positions: Vec<Point> = sorted.iter().map(|p| p.position).collect();
            for (p, scaled) in sorted
                .iter_mut()
                .zip(scale_points(&positions, working, source))
            {
                p.position = scaled;
            }
        }

        debug!(
            "lattice: {} segments, {} crossings, {} unique",
            segments.len(),
            raw.len(),
            sorted.len()
        );
        Ok((raw.len(), sorted))
    }

    /// Reconstruct the full lattice. Fails with
    /// [`GridError::PointCountMismatch`] unless exactly 81 unique crossings
    /// survive.
    pub fn detect(
        &self,
        segments: &[LineSegment],
        source: ImageBounds,
    ) -> Result<LatticeDetection, GridError> {
        let (raw_intersections, points) = self.detect_points(segments, source)?;
        if points.len() != LATTICE_POINTS {
            warn!(
                "expected {} lattice points, found {}",
                LATTICE_POINTS,
                points.len()
            );
        }
        let positions: Vec<Point> = points.iter().map(|p| p.position).collect();
        let squares = build_squares(&positions)?;
        Ok(LatticeDetection {
            raw_intersections,
            points,
            squares,
        })
    }
}

/// Map points from one image size to another with independent x/y scales.
pub fn scale_points(points: &[Point], from: ImageBounds, to: ImageBounds) -> Vec<Point> {
    let sx = to.width / from.width;
    let sy = to.height / from.height;
    points.iter().map(|p| Point::new(p.x * sx, p.y * sy)).collect()
}
