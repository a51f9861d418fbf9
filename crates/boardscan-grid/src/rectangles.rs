use boardscan_core::{PixelRect, Point, SquareParity, BOARD_SIDE, SQUARE_COUNT};
use serde::{Deserialize, Serialize};

use crate::GridError;

/// Lattice points per side (board squares + 1).
pub const LATTICE_SIDE: usize = BOARD_SIDE + 1;

/// Lattice points per board.
pub const LATTICE_POINTS: usize = LATTICE_SIDE * LATTICE_SIDE;

/// One board square in image space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Square {
    /// Row in `0..8`, top to bottom in the image.
    pub row: usize,
    /// Column in `0..8`, left to right in the image.
    pub col: usize,
    pub top_left: Point,
    pub bottom_right: Point,
    pub parity: SquareParity,
}

impl Square {
    /// Row-major index in `0..64`.
    #[inline]
    pub fn index(&self) -> usize {
        self.row * BOARD_SIDE + self.col
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn center(&self) -> Point {
        nalgebra::center(&self.top_left, &self.bottom_right)
    }

    /// Pixel rectangle covering this square, corners rounded to the nearest
    /// pixel.
    pub fn pixel_rect(&self) -> PixelRect {
        PixelRect::from_corners(self.top_left, self.bottom_right)
    }
}

/// Tile a row-major 9×9 lattice into 64 squares.
///
/// Square `(r, c)` spans `points[r*9 + c]` (top-left) to
/// `points[(r+1)*9 + c+1]` (bottom-right).
///
/// Parity starts light at `(0, 0)` and flips after every square *within* a
/// row; it is not flipped when moving to the next row, so each row starts
/// with the parity the previous row ended on. With eight squares per row
/// this yields the usual checkerboard (`(r + c) % 2 == 1` is dark).
pub fn build_squares(points: &[Point]) -> Result<Vec<Square>, GridError> {
    if points.len() != LATTICE_POINTS {
        return Err(GridError::PointCountMismatch {
            expected: LATTICE_POINTS,
            got: points.len(),
        });
    }

    let mut squares = Vec::with_capacity(SQUARE_COUNT);
    let mut parity = SquareParity::Light;
    for row in 0..BOARD_SIDE {
        for col in 0..BOARD_SIDE {
            squares.push(Square {
                row,
                col,
                top_left: points[row * LATTICE_SIDE + col],
                bottom_right: points[(row + 1) * LATTICE_SIDE + col + 1],
                parity,
            });
            if col != BOARD_SIDE - 1 {
                parity = parity.flipped();
            }
        }
    }
    Ok(squares)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular_lattice(origin: Point, step: f32) -> Vec<Point> {
        (0..LATTICE_SIDE)
            .flat_map(|r| (0..LATTICE_SIDE).map(move |c| (r, c)))
            .map(|(r, c)| Point::new(origin.x + c as f32 * step, origin.y + r as f32 * step))
            .collect()
    }

    #[test]
    fn regular_grid_tiles_without_gaps_or_overlap() {
        let pts = regular_lattice(Point::new(20.0, 30.0), 50.0);
        let squares = build_squares(&pts).expect("81 points");
        assert_eq!(squares.len(), 64);

        let total: u64 = squares.iter().map(|s| s.pixel_rect().area()).sum();
        let bbox = PixelRect::from_corners(pts[0], pts[80]);
        assert_eq!(total, bbox.area());

        for (i, a) in squares.iter().enumerate() {
            assert_eq!(a.index(), i);
            let ra = a.pixel_rect();
            for b in squares.iter().skip(i + 1) {
                let rb = b.pixel_rect();
                let overlap_x = ra.x < rb.x + rb.width && rb.x < ra.x + ra.width;
                let overlap_y = ra.y < rb.y + rb.height && rb.y < ra.y + ra.height;
                assert!(!(overlap_x && overlap_y), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn corners_follow_row_major_indexing() {
        let pts = regular_lattice(Point::new(0.0, 0.0), 50.0);
        let squares = build_squares(&pts).expect("81 points");
        assert_eq!(squares[0].top_left, Point::new(0.0, 0.0));
        assert_eq!(squares[0].bottom_right, Point::new(50.0, 50.0));
        let last = squares[63];
        assert_eq!((last.row, last.col), (7, 7));
        assert_eq!(last.top_left, Point::new(350.0, 350.0));
        assert_eq!(last.bottom_right, Point::new(400.0, 400.0));
        assert_eq!(squares[9].center(), Point::new(75.0, 75.0));
    }

    #[test]
    fn parity_flips_within_rows_only() {
        let pts = regular_lattice(Point::new(0.0, 0.0), 10.0);
        let squares = build_squares(&pts).expect("81 points");
        assert_eq!(squares[0].parity, SquareParity::Light);
        assert_eq!(squares[7].parity, SquareParity::Dark);
        // Row 1 starts with the parity row 0 ended on.
        assert_eq!(squares[8].parity, SquareParity::Dark);
        for s in &squares {
            assert_eq!(s.parity.is_dark(), (s.row + s.col) % 2 == 1);
        }
    }

    #[test]
    fn wrong_point_count_is_an_error() {
        let pts = regular_lattice(Point::new(0.0, 0.0), 10.0);
        for n in [0, 80] {
            assert_eq!(
                build_squares(&pts[..n]),
                Err(GridError::PointCountMismatch {
                    expected: 81,
                    got: n
                })
            );
        }
        let mut extra = pts.clone();
        extra.push(Point::new(1.0, 1.0));
        assert_eq!(
            build_squares(&extra),
            Err(GridError::PointCountMismatch {
                expected: 81,
                got: 82
            })
        );
    }
}
