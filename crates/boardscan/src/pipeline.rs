//! End-to-end board reading: segments + image → 64 square labels.

use boardscan_core::{ImageBounds, LineSegment, RgbImageView, ViewError};
use boardscan_grid::{GridError, LatticeDetection, LatticeDetector, LatticeParams, Square};
use boardscan_pieces::{
    EmptySquareDetector, EmptySquareParams, FeatureDataset, HistogramClassifier, HistogramParams,
    PieceError, SquareClassifier, SquareLabel,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::notation::{board_to_fen, NotationError, Side};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Piece(#[from] PieceError),
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Every tunable of one board read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub lattice: LatticeParams,
    pub empty: EmptySquareParams,
    pub histogram: HistogramParams,
}

/// Result for one square.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SquareReading {
    pub square: Square,
    /// `Some(Empty)` for an empty square, `None` when the square is
    /// occupied but the classifier had nothing to match against.
    pub label: Option<SquareLabel>,
    #[serde(default)]
    pub distance: Option<f32>,
    pub edge_energy: f64,
}

/// Result of one image pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardReading {
    pub lattice: LatticeDetection,
    /// Row-major, index 0 is the top-left square.
    pub squares: Vec<SquareReading>,
}

impl BoardReading {
    pub fn labels(&self) -> Vec<Option<SquareLabel>> {
        self.squares.iter().map(|s| s.label).collect()
    }

    /// Number of squares that are occupied but unlabeled.
    pub fn unresolved(&self) -> usize {
        self.squares.iter().filter(|s| s.label.is_none()).count()
    }

    pub fn fen(&self, side: Side) -> Result<String, NotationError> {
        board_to_fen(&self.labels(), side)
    }
}

/// Lattice detection, emptiness test and classification for a whole board.
#[derive(Clone, Debug, Default)]
pub struct BoardReader {
    params: PipelineParams,
}

impl BoardReader {
    pub fn new(params: PipelineParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Read the board with the histogram nearest-neighbour classifier.
    ///
    /// `dataset` must have been built with `params.histogram.bins` bins.
    pub fn read(
        &self,
        image: &RgbImageView<'_>,
        segments: &[LineSegment],
        dataset: &FeatureDataset,
    ) -> Result<BoardReading, PipelineError> {
        if dataset.bins() != self.params.histogram.bins {
            return Err(PieceError::DimensionMismatch {
                expected: self.params.histogram.bins * self.params.histogram.bins,
                got: dataset.bins() * dataset.bins(),
            }
            .into());
        }
        self.read_with(image, segments, &HistogramClassifier::new(dataset))
    }

    /// Read the board with any square classifier.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, image, segments, classifier),
            fields(width = image.width, height = image.height, segments = segments.len())
        )
    )]
    pub fn read_with<C: SquareClassifier + ?Sized>(
        &self,
        image: &RgbImageView<'_>,
        segments: &[LineSegment],
        classifier: &C,
    ) -> Result<BoardReading, PipelineError> {
        let bounds = ImageBounds::new(image.width as f32, image.height as f32);
        let lattice = LatticeDetector::new(self.params.lattice.clone()).detect(segments, bounds)?;

        let empty = EmptySquareDetector::new(self.params.empty);
        let mut squares = Vec::with_capacity(lattice.squares.len());
        for square in &lattice.squares {
            let view = image.sub_view(square.pixel_rect());
            let emptiness = empty.check(&view, square.parity);
            let (label, distance) = if emptiness.empty {
                (Some(SquareLabel::Empty), None)
            } else {
                match classifier.classify(&view, square.parity)? {
                    Some(c) => (Some(c.label), c.distance),
                    None => (None, None),
                }
            };
            debug!(
                "square ({}, {}): energy={:.0} label={:?}",
                square.row, square.col, emptiness.energy, label
            );
            squares.push(SquareReading {
                square: *square,
                label,
                distance,
                edge_energy: emptiness.energy,
            });
        }

        let reading = BoardReading { lattice, squares };
        let unresolved = reading.unresolved();
        if unresolved > 0 {
            warn!("{unresolved} occupied squares could not be classified");
        }
        info!(
            "board read: {} occupied, {} unresolved",
            reading
                .squares
                .iter()
                .filter(|s| s.label.is_some_and(|l| !l.is_empty()))
                .count(),
            unresolved
        );
        Ok(reading)
    }
}
