use std::cmp::Ordering;

use boardscan_core::Point;

use crate::{IntersectionPoint, SortParams};

/// Pairwise row-major order with vertical slack.
///
/// `a` comes first when it is clearly in an earlier row
/// (`a.y + slack < b.y`); when neither point is clearly above the other,
/// the one with smaller `x` comes first.
///
/// This relation is not transitive once jitter accumulates along a row, so
/// it must not be handed to `sort_by`. [`sort_lattice_points`] produces the
/// order it describes via row grouping instead.
pub fn compare_points(a: Point, b: Point, slack: f32) -> Ordering {
    if a.y + slack < b.y {
        Ordering::Less
    } else if b.y + slack < a.y {
        Ordering::Greater
    } else {
        a.x.total_cmp(&b.x)
    }
}

/// Split points into rows.
///
/// Points are ordered by `y`; a new row starts whenever the vertical gap to
/// the previous point exceeds `slack` (single-linkage clustering on `y`).
/// Rows are returned top to bottom, each ordered left to right.
///
/// A row is guaranteed to stay whole when its peak-to-peak `y` spread is at
/// most `slack`, and rows are guaranteed to separate when the vertical gap
/// between them exceeds `slack`. Per-point jitter of `±j` therefore needs
/// `2j <= slack` and a row spacing above `2j + slack`; with larger jitter a
/// row may or may not split depending on how its points fall.
pub fn group_rows<T, F>(items: &[T], slack: f32, position: F) -> Vec<Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> Point,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| position(&items[a]).y.total_cmp(&position(&items[b]).y));

    let mut rows: Vec<Vec<T>> = Vec::new();
    let mut last_y: Option<f32> = None;
    for idx in order {
        let y = position(&items[idx]).y;
        match (last_y, rows.last_mut()) {
            (Some(prev), Some(row)) if y - prev <= slack => row.push(items[idx].clone()),
            _ => rows.push(vec![items[idx].clone()]),
        }
        last_y = Some(y);
    }

    for row in &mut rows {
        row.sort_by(|a, b| position(a).x.total_cmp(&position(b).x));
    }
    rows
}

/// Row-major lattice order: rows top to bottom, each left to right.
pub fn sort_lattice_points(
    points: &[IntersectionPoint],
    params: &SortParams,
) -> Vec<IntersectionPoint> {
    let rows = group_rows(points, params.row_slack, |p| p.position);
    log::debug!(
        "sort: {} points in {} rows (sizes {:?})",
        points.len(),
        rows.len(),
        rows.iter().map(Vec::len).collect::<Vec<_>>()
    );
    rows.into_iter().flatten().collect()
}
