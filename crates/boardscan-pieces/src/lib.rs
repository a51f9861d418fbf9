//! Square content classification.
//!
//! This crate focuses on:
//! - deciding whether a square holds a piece at all (edge energy in its
//!   central region),
//! - describing a square by a normalized 2-D chromaticity histogram,
//! - matching that histogram against a labeled, parity-split dataset with
//!   histogram-intersection distance (1-nearest neighbour),
//! - reading and writing the flat feature files the dataset lives in.
//!
//! It does **not** locate squares. It expects square sub-images, for example
//! cut out along the lattice from `boardscan-grid`.

mod classifier;
mod dataset;
mod empty;
mod error;
mod histogram;
mod label;
mod matcher;
mod params;

pub use classifier::{Classification, HistogramClassifier, SquareClassifier};
pub use dataset::{
    append_record, format_record, parse_partition, read_partition, write_partition,
    DatasetLoad, FeatureDataset, LabeledFeature, PartitionLoad,
};
pub use empty::{EmptySquareDetector, Emptiness};
pub use error::{PieceError, RecordError};
pub use histogram::{chromaticity_histogram, intersection_distance, Histogram};
pub use label::{ParseLabelError, PieceColor, PieceKind, SquareLabel, DNN_CLASS_LABELS};
pub use matcher::{nearest_neighbor, NearestMatch};
pub use params::{EmptySquareParams, HistogramParams};
