//! Andrew's monotone-chain convex hull (spec §4.9, module J).
//!
//! Two variants, both grounded on `_core/utils.py`'s hull helpers:
//! - [`convex_hull_max`] keeps collinear boundary points (`context.points
//!   convex hull` used to bound the inner-point budget in module G), named
//!   "maximal" because it returns every point on the hull's boundary, not
//!   just its strict corners.
//! - [`convex_hull_strict`] drops them (the final step of Valtr's algorithm,
//!   module H, which needs a strictly convex polygon).

use crate::predicates::{orient, Orientation};
use crate::types::Point;

/// The hull boundary of `points`, including any point lying exactly on an
/// edge between two extreme points.
pub fn convex_hull_max(points: &[Point]) -> Vec<Point> {
    convex_hull(points, false)
}

/// The hull boundary of `points`, with collinear interior-of-edge points
/// removed.
pub fn convex_hull_strict(points: &[Point]) -> Vec<Point> {
    convex_hull(points, true)
}

fn convex_hull(points: &[Point], strict: bool) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut sorted: Vec<Point> = points.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    sorted.dedup_by(|a, b| a == b);
    if sorted.len() < 3 {
        return sorted;
    }

    let lower = to_sub_hull(&sorted, strict);
    let mut rev: Vec<Point> = sorted.clone();
    rev.reverse();
    let upper = to_sub_hull(&rev, strict);

    let mut result = lower;
    result.pop();
    let mut upper = upper;
    upper.pop();
    result.extend(upper);
    result
}

fn to_sub_hull(points: &[Point], strict: bool) -> Vec<Point> {
    let mut result: Vec<Point> = Vec::with_capacity(points.len());
    for &point in points {
        loop {
            if result.len() < 2 {
                break;
            }
            let a = result[result.len() - 2];
            let b = result[result.len() - 1];
            let turn = orient(a, b, point);
            let should_pop = if strict {
                turn != Orientation::CounterClockwise
            } else {
                turn == Orientation::Clockwise
            };
            if !should_pop {
                break;
            }
            result.pop();
        }
        result.push(point);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_hull_keeps_a_midpoint_on_an_edge() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 2.0),
        ];
        let hull = convex_hull_max(&pts);
        assert!(hull.contains(&Point::new(1.0, 0.0)));
    }

    #[test]
    fn strict_hull_drops_a_midpoint_on_an_edge() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 2.0),
        ];
        let hull = convex_hull_strict(&pts);
        assert!(!hull.contains(&Point::new(1.0, 0.0)));
        assert_eq!(hull.len(), 3);
    }

    #[test]
    fn square_hull_has_four_corners() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.5, 0.5),
        ];
        let hull = convex_hull_strict(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(0.5, 0.5)));
    }
}
