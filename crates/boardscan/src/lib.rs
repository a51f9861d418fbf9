//! High-level facade crate for the `boardscan-*` workspace.
//!
//! This crate provides:
//! - re-exports of the lattice and square-classification crates
//! - [`BoardReader`], which turns an RGB image plus detected line segments
//!   into 64 square labels
//! - FEN encoding of those labels and square-name helpers
//! - JSON run configuration / report types used by the `boardscan` CLI
//! - (feature `image`) adapters from `image::RgbImage`
//!
//! Line detection itself is not part of the workspace: segments come from an
//! external detector, as `[x0, y0, x1, y1]` quadruples.
//!
//! ## Quickstart
//!
//! ```no_run
//! use boardscan::detect;
//! use boardscan::pieces::FeatureDataset;
//! use boardscan::{io::load_segments, notation::Side, PipelineParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = detect::load_rgb("board.png")?;
//! let segments = load_segments("segments.json")?;
//! let dataset = FeatureDataset::load("light.txt", "dark.txt", 16)?.dataset;
//!
//! let reading = detect::read_board(&img, &segments, &dataset, PipelineParams::default())?;
//! println!("{}", reading.fen(Side::White)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `boardscan::core`: segments, points, pixel rectangles, RGB views, logger.
//! - `boardscan::grid`: intersections, dedup, row sorting, square tiling.
//! - `boardscan::pieces`: labels, histograms, feature files, emptiness, 1-NN.
//! - `boardscan::notation`: FEN, square names, engine best-move parsing.
//! - `boardscan::io`: JSON config and report.
//! - `boardscan::detect` (feature `image`): helpers over `image::RgbImage`.

pub use boardscan_core as core;
pub use boardscan_grid as grid;
pub use boardscan_pieces as pieces;

pub mod io;
pub mod notation;
mod pipeline;

pub use boardscan_core::{LineSegment, Point, RgbImageView, SquareParity};
pub use boardscan_grid::{LatticeDetection, LatticeDetector, LatticeParams, Square};
pub use boardscan_pieces::{FeatureDataset, SquareClassifier, SquareLabel};
pub use pipeline::{BoardReader, BoardReading, PipelineError, PipelineParams, SquareReading};

#[cfg(feature = "image")]
pub mod detect;
