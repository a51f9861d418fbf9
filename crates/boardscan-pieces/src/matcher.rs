use serde::{Deserialize, Serialize};

use crate::{intersection_distance, Histogram, LabeledFeature, PieceError, SquareLabel};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearestMatch {
    pub label: SquareLabel,
    /// Histogram-intersection distance to the winning sample.
    pub distance: f32,
    /// Position of the winning sample in the partition.
    pub index: usize,
}

/// 1-nearest-neighbour lookup by histogram-intersection distance.
///
/// Scans every sample; on equal distances the earliest sample wins.
/// Returns `Ok(None)` for an empty partition and fails on the first sample
/// whose shape differs from the query.
pub fn nearest_neighbor(
    query: &Histogram,
    samples: &[LabeledFeature],
) -> Result<Option<NearestMatch>, PieceError> {
    let mut best: Option<NearestMatch> = None;
    for (index, sample) in samples.iter().enumerate() {
        let distance = intersection_distance(query, &sample.histogram)?;
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(NearestMatch {
                label: sample.label,
                distance,
                index,
            });
        }
    }
    Ok(best)
}
