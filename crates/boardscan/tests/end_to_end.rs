mod common;

use approx::assert_abs_diff_eq;
use boardscan::notation::Side;
use boardscan::pieces::{append_record, FeatureDataset};
use boardscan::{BoardReader, LineSegment, PipelineParams, Point, RgbImageView, SquareLabel};

use common::*;

fn dataset_from_files(dir: &std::path::Path) -> FeatureDataset {
    let (light, dark) = training_samples(&TRAINING_BOARD);
    let light_path = dir.join("light.txt");
    let dark_path = dir.join("dark.txt");
    for s in &light {
        append_record(&light_path, s.label, &s.histogram).expect("append light");
    }
    for s in &dark {
        append_record(&dark_path, s.label, &s.histogram).expect("append dark");
    }
    let load = FeatureDataset::load(&light_path, &dark_path, 16).expect("load");
    assert!(load.skipped_light.is_empty());
    assert!(load.skipped_dark.is_empty());
    load.dataset
}

#[test]
fn synthetic_grid_yields_exact_lattice() {
    let data = paint_board(&[]);
    let image = RgbImageView::new(SIDE, SIDE, &data).expect("view");
    let dataset = FeatureDataset::new(16, vec![], vec![]).expect("dataset");
    let reading = BoardReader::default()
        .read(&image, &board_segments(), &dataset)
        .expect("reading");

    let lattice = &reading.lattice;
    assert_eq!(lattice.points.len(), 81);
    for (k, p) in lattice.points.iter().enumerate() {
        assert_abs_diff_eq!(p.position.x, (k % 9 * 50) as f32, epsilon = 1e-3);
        assert_abs_diff_eq!(p.position.y, (k / 9 * 50) as f32, epsilon = 1e-3);
    }
    assert_eq!(lattice.squares.len(), 64);
    let first = lattice.squares[0];
    assert_eq!((first.row, first.col), (0, 0));
    assert_eq!(first.top_left, Point::new(0.0, 0.0));
    assert_eq!(first.bottom_right, Point::new(50.0, 50.0));
    for s in &lattice.squares {
        assert_abs_diff_eq!(s.width(), 50.0, epsilon = 1e-3);
        assert_abs_diff_eq!(s.height(), 50.0, epsilon = 1e-3);
    }

    assert!(reading
        .squares
        .iter()
        .all(|s| s.label == Some(SquareLabel::Empty)));
    assert_eq!(
        reading.fen(Side::Black).expect("fen"),
        "8/8/8/8/8/8/8/8 b - - 0 0"
    );
}

#[test]
fn reads_a_position_against_a_stored_dataset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset = dataset_from_files(dir.path());
    assert_eq!(dataset.len(), TRAINING_BOARD.len());

    let data = paint_board(&POSITION);
    let image = RgbImageView::new(SIDE, SIDE, &data).expect("view");
    let reading = BoardReader::new(PipelineParams::default())
        .read(&image, &board_segments(), &dataset)
        .expect("reading");

    for s in &reading.squares {
        let index = s.square.index();
        match POSITION.iter().find(|(i, _)| *i == index) {
            Some((_, text)) => {
                assert_eq!(s.label, Some(label(text)), "square {index}");
                assert!(s.edge_energy >= 7000.0, "square {index}: {}", s.edge_energy);
                // Stored values carry four decimals.
                assert!(s.distance.expect("distance") < 1e-3, "square {index}");
            }
            None => {
                assert_eq!(s.label, Some(SquareLabel::Empty), "square {index}");
                assert_eq!(s.distance, None);
            }
        }
    }
    assert_eq!(reading.unresolved(), 0);
    assert_eq!(reading.fen(Side::White).expect("fen"), POSITION_FEN);
}

#[test]
fn duplicated_and_noisy_segments_still_read_the_board() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset = dataset_from_files(dir.path());

    let mut segments = board_segments();
    // A second, slightly shifted detection of every line.
    let shifted: Vec<LineSegment> = board_segments()
        .into_iter()
        .map(|s| {
            let (dx, dy) = if s.p0.y == s.p1.y { (0.0, 1.5) } else { (1.5, 0.0) };
            LineSegment::from_coords(s.p0.x + dx, s.p0.y + dy, s.p1.x + dx, s.p1.y + dy)
        })
        .collect();
    segments.extend(shifted);

    let data = paint_board(&POSITION);
    let image = RgbImageView::new(SIDE, SIDE, &data).expect("view");
    let reading = BoardReader::default()
        .read(&image, &segments, &dataset)
        .expect("reading");
    assert_eq!(reading.lattice.points.len(), 81);
    assert_eq!(reading.fen(Side::White).expect("fen"), POSITION_FEN);
}
