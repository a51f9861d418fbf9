//! Core types and utilities for board square reconstruction.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any line detector or on a concrete image decoding library:
//! segments arrive as plain coordinates and pixels as borrowed RGB buffers.

mod board;
mod geometry;
mod image;
mod logger;

pub use board::{SquareParity, BOARD_SIDE, SQUARE_COUNT};
pub use geometry::{ImageBounds, LineSegment, PixelRect, Point};
pub use image::{RgbImageView, ViewError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{filter_directives, init_with_level};
