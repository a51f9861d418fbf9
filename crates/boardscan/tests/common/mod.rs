#![allow(dead_code)]

use boardscan::core::ImageBounds;
use boardscan::pieces::{chromaticity_histogram, HistogramParams, LabeledFeature};
use boardscan::{LatticeDetector, LineSegment, RgbImageView, SquareLabel, SquareParity};

pub const SIDE: usize = 450;
pub const STEP: usize = 50;

const LIGHT: [u8; 3] = [250, 250, 250];
const DARK: [u8; 3] = [200, 200, 200];

/// Dark, saturated piece colors with distinct chromaticity.
pub fn piece_color(label: &str) -> [u8; 3] {
    match label {
        "br" => [90, 0, 0],
        "bk" => [0, 0, 200],
        "wq" => [0, 60, 0],
        "wp" => [40, 40, 0],
        "wn" => [40, 0, 40],
        other => panic!("no test color for {other}"),
    }
}

pub fn label(text: &str) -> SquareLabel {
    text.parse().expect("label")
}

/// The 18 board lines of a regular 8×8 board with 50 px squares.
pub fn board_segments() -> Vec<LineSegment> {
    let extent = (8 * STEP) as f32;
    let mut segments = Vec::new();
    for k in 0..9 {
        let v = (k * STEP) as f32;
        segments.push(LineSegment::from_coords(0.0, v, extent, v));
        segments.push(LineSegment::from_coords(v, 0.0, v, extent));
    }
    segments
}

/// 450×450 RGB board, pieces drawn as 20×20 blocks in the middle of their
/// squares. `pieces` holds `(square index, label text)`.
pub fn paint_board(pieces: &[(usize, &str)]) -> Vec<u8> {
    let mut data = Vec::with_capacity(SIDE * SIDE * 3);
    for y in 0..SIDE {
        for x in 0..SIDE {
            let (r, c) = (y / STEP, x / STEP);
            let mut px = if r < 8 && c < 8 && (r + c) % 2 == 1 {
                DARK
            } else {
                LIGHT
            };
            if r < 8 && c < 8 {
                let (lx, ly) = (x % STEP, y % STEP);
                let inside = (15..35).contains(&lx) && (15..35).contains(&ly);
                if inside {
                    if let Some((_, l)) = pieces.iter().find(|(i, _)| *i == r * 8 + c) {
                        px = piece_color(l);
                    }
                }
            }
            data.extend_from_slice(&px);
        }
    }
    data
}

/// Histograms of the occupied squares of a painted board, split by parity.
pub fn training_samples(pieces: &[(usize, &str)]) -> (Vec<LabeledFeature>, Vec<LabeledFeature>) {
    let data = paint_board(pieces);
    let view = RgbImageView::new(SIDE, SIDE, &data).expect("view");
    let lattice = LatticeDetector::default()
        .detect(&board_segments(), ImageBounds::new(SIDE as f32, SIDE as f32))
        .expect("lattice");

    let mut light = Vec::new();
    let mut dark = Vec::new();
    for &(index, text) in pieces {
        let square = lattice.squares[index];
        let crop = view.sub_view(square.pixel_rect());
        let sample = LabeledFeature {
            label: label(text),
            histogram: chromaticity_histogram(&crop, &HistogramParams::default())
                .expect("hist"),
        };
        match square.parity {
            SquareParity::Light => light.push(sample),
            SquareParity::Dark => dark.push(sample),
        }
    }
    (light, dark)
}

/// Every test label on one light and one dark square.
pub const TRAINING_BOARD: [(usize, &str); 10] = [
    (0, "br"),
    (1, "bk"),
    (2, "wq"),
    (3, "wp"),
    (4, "wn"),
    (8, "br"),
    (9, "bk"),
    (10, "wq"),
    (11, "wp"),
    (12, "wn"),
];

pub const POSITION: [(usize, &str); 7] = [
    (0, "br"),
    (3, "bk"),
    (7, "br"),
    (51, "wp"),
    (52, "wp"),
    (57, "wn"),
    (59, "wq"),
];

pub const POSITION_FEN: &str = "r2k3r/8/8/8/8/8/3PP3/1N1Q4 w - - 0 0";
