use crate::PixelRect;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ViewError {
    #[error("invalid rgb buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },
}

/// Borrowed, row-major, interleaved RGB8 image (or a window into one).
///
/// Sub-views share the parent's buffer; `stride` is the number of pixels
/// between the starts of two consecutive rows of the *parent* buffer.
#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    stride: usize,
    data: &'a [u8],
}

impl<'a> RgbImageView<'a> {
    /// Wrap a tightly packed `width * height * 3` buffer.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ViewError> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(ViewError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride: width,
            data,
        })
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// `[r, g, b]` at `(x, y)`; the caller keeps `x < width`, `y < height`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let o = (y * self.stride + x) * 3;
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }

    /// Iterate all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| self.pixel(x, y)))
    }

    /// Non-owning window onto `rect`, clipped to this view.
    pub fn sub_view(&self, rect: PixelRect) -> RgbImageView<'a> {
        let r = rect.clip(self.width as u32, self.height as u32);
        if r.is_empty() {
            return RgbImageView {
                width: 0,
                height: 0,
                stride: self.stride,
                data: &self.data[..0],
            };
        }
        let offset = (r.y as usize * self.stride + r.x as usize) * 3;
        RgbImageView {
            width: r.width as usize,
            height: r.height as usize,
            stride: self.stride,
            data: &self.data[offset..],
        }
    }

    /// Grayscale copy using BT.601 luma weights, row-major `width * height`.
    pub fn to_luma(&self) -> Vec<u8> {
        self.pixels()
            .map(|[r, g, b]| {
                let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
                y.round().clamp(0.0, 255.0) as u8
            })
            .collect()
    }
}
