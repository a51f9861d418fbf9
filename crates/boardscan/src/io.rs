//! JSON run configuration and report for board reading.

use std::{
    fs,
    path::{Path, PathBuf},
};

use boardscan_core::LineSegment;
use boardscan_grid::LatticeDetection;
use serde::{Deserialize, Serialize};

use crate::notation::Side;
use crate::pipeline::{BoardReading, PipelineError, PipelineParams, SquareReading};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] ::image::ImageError),
}

/// Configuration of one `boardscan read` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardReadConfig {
    pub image_path: String,
    /// JSON array of `[x0, y0, x1, y1]` segments.
    pub segments_path: String,
    pub light_features: String,
    pub dark_features: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub side_to_move: Side,
    #[serde(default)]
    pub params: Option<PipelineParams>,
}

impl BoardReadConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("boardscan_report.json"))
    }

    /// Pipeline parameters, defaults where the config is silent.
    pub fn build_params(&self) -> PipelineParams {
        self.params.clone().unwrap_or_default()
    }
}

/// Load detected line segments from a JSON file.
pub fn load_segments(path: impl AsRef<Path>) -> Result<Vec<LineSegment>, IoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardReadReport {
    pub image_path: String,
    pub config_path: String,
    pub image_size: [u32; 2],
    pub num_segments: usize,
    pub skipped_records: usize,
    #[serde(default)]
    pub lattice: Option<LatticeDetection>,
    #[serde(default)]
    pub squares: Option<Vec<SquareReading>>,
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BoardReadReport {
    pub fn new(
        cfg: &BoardReadConfig,
        config_path: &Path,
        image_size: [u32; 2],
        num_segments: usize,
    ) -> Self {
        Self {
            image_path: cfg.image_path.clone(),
            config_path: config_path.to_string_lossy().into_owned(),
            image_size,
            num_segments,
            skipped_records: 0,
            lattice: None,
            squares: None,
            fen: None,
            error: None,
        }
    }

    /// Populate report fields from a successful read. An unresolved square
    /// leaves `fen` empty and records why in `error`.
    pub fn set_reading(&mut self, reading: BoardReading, side: Side) {
        match reading.fen(side) {
            Ok(fen) => {
                self.fen = Some(fen);
                self.error = None;
            }
            Err(e) => {
                self.fen = None;
                self.error = Some(e.to_string());
            }
        }
        self.lattice = Some(reading.lattice);
        self.squares = Some(reading.squares);
    }

    pub fn set_error(&mut self, err: PipelineError) {
        self.error = Some(err.to_string());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
