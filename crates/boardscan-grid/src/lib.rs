//! Board lattice reconstruction from detected line segments.
//!
//! ## Quickstart
//!
//! ```
//! use boardscan_core::{ImageBounds, LineSegment};
//! use boardscan_grid::{LatticeDetector, LatticeParams};
//!
//! let mut segments = Vec::new();
//! for k in 0..9 {
//!     let v = k as f32 * 50.0;
//!     segments.push(LineSegment::from_coords(0.0, v, 400.0, v));
//!     segments.push(LineSegment::from_coords(v, 0.0, v, 400.0));
//! }
//!
//! let detector = LatticeDetector::new(LatticeParams::default());
//! let lattice = detector
//!     .detect(&segments, ImageBounds::new(450.0, 450.0))
//!     .expect("regular grid");
//! assert_eq!(lattice.squares.len(), 64);
//! ```
//!
//! Algorithm:
//! 1. Intersect every unordered pair of segments as infinite lines, dropping
//!    near-parallel pairs and crossings outside the image.
//! 2. Greedily suppress crossings closer than a threshold to an already kept
//!    crossing (first discovered wins).
//! 3. Group the survivors into rows by vertical proximity, order each row
//!    left to right, and concatenate rows top to bottom.
//! 4. With exactly 81 points, tile the 9×9 lattice into 64 squares.

mod dedup;
mod detector;
mod error;
mod intersections;
mod params;
mod rectangles;
mod sort;

pub use dedup::dedup_points;
pub use detector::{scale_points, LatticeDetection, LatticeDetector};
pub use error::GridError;
pub use intersections::{find_intersections, intersect_lines, IntersectionPoint};
pub use params::{DedupParams, IntersectionParams, LatticeParams, SortParams};
pub use rectangles::{build_squares, Square, LATTICE_POINTS, LATTICE_SIDE};
pub use sort::{compare_points, group_rows, sort_lattice_points};
