use kiddo::{KdTree, SquaredEuclidean};

use crate::{DedupParams, IntersectionPoint};

/// Greedy duplicate suppression.
///
/// Points are visited in input order; a point is kept only when every
/// already kept point is farther than `params.min_distance` away. The first
/// point discovered in a cluster is its representative (no averaging).
pub fn dedup_points(points: &[IntersectionPoint], params: &DedupParams) -> Vec<IntersectionPoint> {
    let max_dist2 = params.min_distance * params.min_distance;
    let mut tree: KdTree<f32, 2> = KdTree::new();
    let mut kept: Vec<IntersectionPoint> = Vec::new();

    for p in points {
        let query = [p.position.x, p.position.y];
        if !kept.is_empty() {
            let nearest = tree.nearest_one::<SquaredEuclidean>(&query);
            if nearest.distance <= max_dist2 {
                continue;
            }
        }
        tree.add(&query, kept.len() as u64);
        kept.push(*p);
    }

    log::debug!(
        "dedup: kept {} of {} crossings (min_distance={})",
        kept.len(),
        points.len(),
        params.min_distance
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardscan_core::Point;

    fn ip(x: f32, y: f32) -> IntersectionPoint {
        IntersectionPoint {
            position: Point::new(x, y),
            segments: [0, 1],
        }
    }

    #[test]
    fn close_pair_collapses_to_first() {
        let pts = [ip(10.0, 10.0), ip(15.0, 12.0), ip(100.0, 100.0)];
        let out = dedup_points(&pts, &DedupParams { min_distance: 10.0 });
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].position, Point::new(10.0, 10.0));
        assert_eq!(out[1].position, Point::new(100.0, 100.0));
    }

    #[test]
    fn threshold_distance_counts_as_duplicate() {
        let pts = [ip(0.0, 0.0), ip(30.0, 0.0), ip(30.5, 40.0)];
        let out = dedup_points(&pts, &DedupParams::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].position, Point::new(30.5, 40.0));
    }

    #[test]
    fn order_decides_the_survivor() {
        // b is close to both a and c, a and c are far apart.
        let a = ip(0.0, 0.0);
        let b = ip(8.0, 0.0);
        let c = ip(16.0, 0.0);
        let params = DedupParams { min_distance: 10.0 };

        let forward = dedup_points(&[a, b, c], &params);
        assert_eq!(forward.len(), 2);
        assert_eq!(forward[1].position.x, 16.0);

        let middle_first = dedup_points(&[b, a, c], &params);
        assert_eq!(middle_first.len(), 1);
        assert_eq!(middle_first[0].position.x, 8.0);
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(dedup_points(&[], &DedupParams::default()).is_empty());
    }
}
