use std::path::Path;

use boardscan_core::{LineSegment, RgbImageView, ViewError};
use boardscan_pieces::{chromaticity_histogram, FeatureDataset, Histogram, HistogramParams};
use image::{ImageReader, RgbImage};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::io::IoError;
use crate::pipeline::{BoardReader, BoardReading, PipelineError, PipelineParams};

/// Borrow an `image::RgbImage` as a `boardscan-core` view.
pub fn rgb_view(img: &RgbImage) -> Result<RgbImageView<'_>, ViewError> {
    RgbImageView::new(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Decode an image file into RGB8.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, IoError> {
    Ok(ImageReader::open(path)?.decode()?.to_rgb8())
}

/// Build an `image::RgbImage` from a raw interleaved RGB buffer.
pub fn rgb_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<RgbImage, ViewError> {
    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(ViewError::InvalidBuffer {
            expected,
            got: pixels.len(),
        });
    }
    RgbImage::from_raw(width, height, pixels.to_vec()).ok_or(ViewError::InvalidBuffer {
        expected,
        got: pixels.len(),
    })
}

/// Run the full board reader on an `image::RgbImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, segments, dataset, params),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn read_board(
    img: &RgbImage,
    segments: &[LineSegment],
    dataset: &FeatureDataset,
    params: PipelineParams,
) -> Result<BoardReading, PipelineError> {
    let view = rgb_view(img)?;
    BoardReader::new(params).read(&view, segments, dataset)
}

/// Chromaticity histogram of a whole image, for building feature files
/// from square crops.
pub fn image_histogram(
    img: &RgbImage,
    params: &HistogramParams,
) -> Result<Histogram, PipelineError> {
    let view = rgb_view(img)?;
    Ok(chromaticity_histogram(&view, params)?)
}
