use boardscan_core::{RgbImageView, SquareParity};
use serde::{Deserialize, Serialize};

use crate::{
    chromaticity_histogram, nearest_neighbor, FeatureDataset, HistogramParams, PieceError,
    SquareLabel,
};

/// Label assigned to an occupied square.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SquareLabel,
    /// Distance to the matched sample, when the classifier has one.
    pub distance: Option<f32>,
}

/// Labels the content of a single occupied square.
///
/// `Ok(None)` means the classifier has nothing to match against.
/// Implementations other than [`HistogramClassifier`] (for example a wrapper
/// around a piece-recognition network mapped through
/// [`SquareLabel::from_class_index`]) can be plugged into the board reader.
pub trait SquareClassifier {
    fn classify(
        &self,
        square: &RgbImageView<'_>,
        parity: SquareParity,
    ) -> Result<Option<Classification>, PieceError>;
}

impl<F> SquareClassifier for F
where
    F: Fn(&RgbImageView<'_>, SquareParity) -> Result<Option<Classification>, PieceError>,
{
    fn classify(
        &self,
        square: &RgbImageView<'_>,
        parity: SquareParity,
    ) -> Result<Option<Classification>, PieceError> {
        self(square, parity)
    }
}

/// Chromaticity histogram + 1-NN over the partition matching the square's
/// parity.
#[derive(Clone, Copy, Debug)]
pub struct HistogramClassifier<'d> {
    dataset: &'d FeatureDataset,
    params: HistogramParams,
}

impl<'d> HistogramClassifier<'d> {
    /// Uses the dataset's bin count.
    pub fn new(dataset: &'d FeatureDataset) -> Self {
        Self {
            dataset,
            params: HistogramParams {
                bins: dataset.bins(),
            },
        }
    }

    #[inline]
    pub fn dataset(&self) -> &'d FeatureDataset {
        self.dataset
    }
}

impl SquareClassifier for HistogramClassifier<'_> {
    fn classify(
        &self,
        square: &RgbImageView<'_>,
        parity: SquareParity,
    ) -> Result<Option<Classification>, PieceError> {
        let query = chromaticity_histogram(square, &self.params)?;
        let found = nearest_neighbor(&query, self.dataset.partition(parity))?;
        Ok(found.map(|m| Classification {
            label: m.label,
            distance: Some(m.distance),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LabeledFeature, PieceColor, PieceKind};

    fn solid(rgb: [u8; 3]) -> Vec<u8> {
        rgb.repeat(10 * 10)
    }

    fn sample_of(label: SquareLabel, rgb: [u8; 3]) -> LabeledFeature {
        let data = solid(rgb);
        let view = RgbImageView::new(10, 10, &data).expect("view");
        LabeledFeature {
            label,
            histogram: chromaticity_histogram(&view, &HistogramParams::default()).expect("hist"),
        }
    }

    #[test]
    fn uses_the_partition_of_the_square_parity() {
        let wp = SquareLabel::piece(PieceColor::White, PieceKind::Pawn);
        let br = SquareLabel::piece(PieceColor::Black, PieceKind::Rook);
        let ds = FeatureDataset::new(
            16,
            vec![sample_of(wp, [200, 100, 100])],
            vec![sample_of(br, [200, 100, 100])],
        )
        .expect("dataset");
        let clf = HistogramClassifier::new(&ds);

        let data = solid([200, 100, 100]);
        let view = RgbImageView::new(10, 10, &data).expect("view");
        let light = clf
            .classify(&view, SquareParity::Light)
            .expect("ok")
            .expect("match");
        assert_eq!(light.label, wp);
        assert_eq!(light.distance, Some(0.0));
        let dark = clf
            .classify(&view, SquareParity::Dark)
            .expect("ok")
            .expect("match");
        assert_eq!(dark.label, br);
    }

    #[test]
    fn empty_partition_gives_no_classification() {
        let ds = FeatureDataset::new(16, vec![], vec![]).expect("dataset");
        let data = solid([1, 2, 3]);
        let view = RgbImageView::new(10, 10, &data).expect("view");
        let out = HistogramClassifier::new(&ds)
            .classify(&view, SquareParity::Light)
            .expect("ok");
        assert_eq!(out, None);
    }

    #[test]
    fn closures_are_classifiers() {
        let always_king = |_: &RgbImageView<'_>,
                           _: SquareParity|
         -> Result<Option<Classification>, PieceError> {
            Ok(Some(Classification {
                label: SquareLabel::piece(PieceColor::White, PieceKind::King),
                distance: None,
            }))
        };
        let data = solid([0, 0, 0]);
        let view = RgbImageView::new(10, 10, &data).expect("view");
        let out = always_king
            .classify(&view, SquareParity::Dark)
            .expect("ok")
            .expect("label");
        assert_eq!(out.label.to_string(), "wk");
    }
}
