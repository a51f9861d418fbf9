use serde::{Deserialize, Serialize};

/// Line-pair intersection settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectionParams {
    /// Pairs whose direction cross product is below this magnitude are
    /// treated as parallel.
    pub parallel_epsilon: f64,
    /// Reject crossings closer than this to any image border (pixels).
    pub border_margin: f32,
}

impl Default for IntersectionParams {
    fn default() -> Self {
        Self {
            parallel_epsilon: 1e-8,
            border_margin: 0.0,
        }
    }
}

/// Duplicate-crossing suppression settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupParams {
    /// A crossing within this Euclidean distance of a kept crossing is a
    /// duplicate. Roughly 30 px at a ~500 px working resolution, 10 px for
    /// smaller crops.
    pub min_distance: f32,
}

impl Default for DedupParams {
    fn default() -> Self {
        Self { min_distance: 30.0 }
    }
}

/// Row-major ordering settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortParams {
    /// Vertical tolerance for two crossings to belong to the same row.
    pub row_slack: f32,
}

impl Default for SortParams {
    fn default() -> Self {
        Self { row_slack: 8.0 }
    }
}

/// All settings of the lattice detector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeParams {
    pub intersection: IntersectionParams,
    pub dedup: DedupParams,
    pub sort: SortParams,
    /// Size `[width, height]` of the downscaled image the segments were
    /// detected in. When set, crossings are found, deduplicated and sorted
    /// in that space and then scaled to the source image size.
    pub working_size: Option<[u32; 2]>,
}
