//! Labeled feature store, one flat file per square parity.
//!
//! Record format, one sample per line:
//!
//! ```text
//! <kind>,<color>,<v0>,<v1>,...,<v(N*N-1)>
//! ```
//!
//! `kind` is one of `p n b r q k` (or `e` for an empty square), `color` is
//! `w`, `b` (or `e`), values are written with four decimals.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use boardscan_core::SquareParity;
use log::{debug, warn};

use crate::{Histogram, PieceError, RecordError, SquareLabel};

/// One stored sample.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledFeature {
    pub label: SquareLabel,
    pub histogram: Histogram,
}

/// Result of reading one partition file.
#[derive(Clone, Debug, Default)]
pub struct PartitionLoad {
    pub samples: Vec<LabeledFeature>,
    /// Records that were reported and skipped.
    pub skipped: Vec<RecordError>,
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_record(line: &str, line_no: usize, bins: usize) -> Result<LabeledFeature, RecordError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let expected = 2 + bins * bins;
    if fields.len() != expected {
        return Err(RecordError::FieldCount {
            line: line_no,
            expected,
            got: fields.len(),
        });
    }

    let label = match (single_char(fields[0]), single_char(fields[1])) {
        (Some(kind), Some(color)) => SquareLabel::from_record_codes(kind, color),
        _ => None,
    }
    .ok_or_else(|| RecordError::InvalidLabel {
        line: line_no,
        kind: fields[0].to_string(),
        color: fields[1].to_string(),
    })?;

    let mut values = Vec::with_capacity(bins * bins);
    for (offset, raw) in fields[2..].iter().enumerate() {
        match raw.parse::<f32>() {
            Ok(v) if v.is_finite() && v >= 0.0 => values.push(v),
            _ => {
                return Err(RecordError::InvalidValue {
                    line: line_no,
                    field: offset + 2,
                    value: raw.to_string(),
                })
            }
        }
    }

    Ok(LabeledFeature {
        label,
        histogram: Histogram::from_values(bins, values).map_err(|_| RecordError::FieldCount {
            line: line_no,
            expected,
            got: fields.len(),
        })?,
    })
}

/// Parse a partition from any reader.
///
/// Blank lines are ignored. A malformed or non-UTF-8 record is collected in
/// [`PartitionLoad::skipped`] and loading continues with the next line;
/// only I/O failures abort.
pub fn parse_partition<R: BufRead>(reader: R, bins: usize) -> Result<PartitionLoad, PieceError> {
    if bins == 0 {
        return Err(PieceError::InvalidBins(bins));
    }
    let mut out = PartitionLoad::default();
    for (i, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line_no = i + 1;
        let Ok(line) = std::str::from_utf8(&raw) else {
            let e = RecordError::InvalidEncoding { line: line_no };
            warn!("skipping feature record: {e}");
            out.skipped.push(e);
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line, line_no, bins) {
            Ok(sample) => out.samples.push(sample),
            Err(e) => {
                warn!("skipping feature record: {e}");
                out.skipped.push(e);
            }
        }
    }
    Ok(out)
}

/// Read a partition file. A missing or unreadable file is an error.
pub fn read_partition(path: impl AsRef<Path>, bins: usize) -> Result<PartitionLoad, PieceError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let load = parse_partition(BufReader::new(file), bins)?;
    debug!(
        "loaded {} samples from {} ({} skipped)",
        load.samples.len(),
        path.display(),
        load.skipped.len()
    );
    Ok(load)
}

/// Text of one record, newline included.
pub fn format_record(label: SquareLabel, histogram: &Histogram) -> String {
    let (kind, color) = label.record_codes();
    let mut line = String::with_capacity(2 + histogram.values().len() * 7);
    line.push(kind);
    line.push(',');
    line.push(color);
    for v in histogram.values() {
        // Writing to a String cannot fail.
        let _ = write!(line, ",{v:.4}");
    }
    line.push('\n');
    line
}

/// Append one sample to a partition file, creating it if needed.
pub fn append_record(
    path: impl AsRef<Path>,
    label: SquareLabel,
    histogram: &Histogram,
) -> Result<(), PieceError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    file.write_all(format_record(label, histogram).as_bytes())?;
    Ok(())
}

/// Write a whole partition, replacing the file.
pub fn write_partition(
    path: impl AsRef<Path>,
    samples: &[LabeledFeature],
) -> Result<(), PieceError> {
    let mut w = BufWriter::new(File::create(path.as_ref())?);
    for s in samples {
        w.write_all(format_record(s.label, &s.histogram).as_bytes())?;
    }
    w.flush()?;
    Ok(())
}

/// Read-only labeled samples, split by square parity.
#[derive(Clone, Debug)]
pub struct FeatureDataset {
    bins: usize,
    light: Vec<LabeledFeature>,
    dark: Vec<LabeledFeature>,
}

/// A loaded dataset together with the records that were skipped.
#[derive(Clone, Debug)]
pub struct DatasetLoad {
    pub dataset: FeatureDataset,
    pub skipped_light: Vec<RecordError>,
    pub skipped_dark: Vec<RecordError>,
}

impl FeatureDataset {
    /// Build from in-memory samples. Every histogram must have `bins` bins
    /// per axis.
    pub fn new(
        bins: usize,
        light: Vec<LabeledFeature>,
        dark: Vec<LabeledFeature>,
    ) -> Result<Self, PieceError> {
        if bins == 0 {
            return Err(PieceError::InvalidBins(bins));
        }
        if let Some(bad) = light
            .iter()
            .chain(&dark)
            .find(|s| s.histogram.bins() != bins)
        {
            return Err(PieceError::DimensionMismatch {
                expected: bins * bins,
                got: bad.histogram.values().len(),
            });
        }
        Ok(Self { bins, light, dark })
    }

    /// Load both partition files.
    pub fn load(
        light: impl AsRef<Path>,
        dark: impl AsRef<Path>,
        bins: usize,
    ) -> Result<DatasetLoad, PieceError> {
        let l = read_partition(light, bins)?;
        let d = read_partition(dark, bins)?;
        let dataset = Self {
            bins,
            light: l.samples,
            dark: d.samples,
        };
        if dataset.light.is_empty() || dataset.dark.is_empty() {
            warn!(
                "feature dataset has an empty partition (light {}, dark {})",
                dataset.light.len(),
                dataset.dark.len()
            );
        }
        Ok(DatasetLoad {
            dataset,
            skipped_light: l.skipped,
            skipped_dark: d.skipped,
        })
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Samples recorded on squares of the given parity.
    pub fn partition(&self, parity: SquareParity) -> &[LabeledFeature] {
        match parity {
            SquareParity::Light => &self.light,
            SquareParity::Dark => &self.dark,
        }
    }

    pub fn len(&self) -> usize {
        self.light.len() + self.dark.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample count per label in one partition.
    pub fn label_counts(&self, parity: SquareParity) -> BTreeMap<SquareLabel, usize> {
        let mut counts = BTreeMap::new();
        for s in self.partition(parity) {
            *counts.entry(s.label).or_insert(0) += 1;
        }
        counts
    }
}
