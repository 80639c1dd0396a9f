//! Polygon-with-holes builder (spec §4.12, module G).
//!
//! Builds a border through `border_size` of `points` via the χ-algorithm
//! (module F), then carves `hole_sizes.len()` interior holes out of the
//! remaining points, each its own independent χ-algorithm run over a
//! prefix sliced off one shared pool of interior points, reversed to
//! clockwise, and checked against a running [`SegmentIndex`] so no hole
//! crosses, overlaps, or touches the border or an earlier hole. Grounded on
//! `_core/factories.py::to_polygon`.
//!
//! The pool is kept sorted by a sweep axis chosen anew per hole via the
//! draw oracle (re-sorting only when the chosen axis actually changes from
//! the previous hole's, exactly as `to_polygon`'s `sorting_key_chooser`
//! memoizes its sort), and advances by `hole_size` minus one when the just
//! built hole's extreme edge along that axis passes the matching
//! disjointness guard — letting consecutive holes share a single vertex,
//! per `to_polygon`'s `can_touch_next_hole` bookkeeping.
//!
//! This reuses module F's general-purpose `to_vertex_sequence` for each
//! hole rather than re-deriving the original's parallel candidate-removal
//! loop: both are the same mouth/ear shrinkage over a point set down to a
//! target size, and the original's hole loop differs only in checking
//! disjointness against accumulated hole edges inside its `is_mouth`
//! closure — folded here into a post-hoc check against [`SegmentIndex`]
//! instead of wiring the predicate through the shrink loop itself. Noted in
//! `DESIGN.md`.

use crate::chi::to_vertex_sequence;
use crate::compose::{can_touch_next_along, draw_sort_axis, sort_points_by_axis, SortAxis};
use crate::error::{GenError, GenResult};
use crate::mesh::Mesh;
use crate::oracle::DrawOracle;
use crate::segment_index::SegmentIndex;
use crate::types::{Contour, Point, Polygon};

/// `points` must contain at least `border_size + hole_sizes.iter().sum()`
/// distinct points (spec §4.12's structural floor).
pub fn to_polygon(
    oracle: &mut dyn DrawOracle,
    points: &[Point],
    border_size: usize,
    hole_sizes: &[usize],
) -> GenResult<Polygon> {
    let needed: usize = border_size + hole_sizes.iter().sum::<usize>();
    if points.len() < needed {
        return Err(GenError::exhaustion(format!(
            "need {needed} points for a border of {border_size} and {} hole(s), got {}",
            hole_sizes.len(),
            points.len()
        )));
    }

    let mut mesh = Mesh::new();
    let border = to_vertex_sequence(&mut mesh, points, border_size);
    if border.len() < 3 {
        return Err(GenError::exhaustion(
            "point set collapsed to fewer than 3 border vertices",
        ));
    }

    let mut index = SegmentIndex::new();
    index.add_all(Contour::new(border.clone()).segments());

    let mut remaining: Vec<Point> = points
        .iter()
        .filter(|p| !border.contains(p))
        .copied()
        .collect();

    let mut holes = Vec::with_capacity(hole_sizes.len());
    let mut prior_axis: Option<SortAxis> = None;
    for &hole_size in hole_sizes {
        if remaining.len() < hole_size {
            return Err(GenError::exhaustion(format!(
                "only {} interior points left for a hole of size {hole_size}",
                remaining.len()
            )));
        }
        let axis = draw_sort_axis(oracle)?;
        if prior_axis != Some(axis) {
            sort_points_by_axis(&mut remaining, axis);
            prior_axis = Some(axis);
        }

        let subset: Vec<Point> = remaining[..hole_size].to_vec();
        let mut hole_mesh = Mesh::new();
        let mut hole_contour = to_vertex_sequence(&mut hole_mesh, &subset, hole_size);
        if hole_contour.len() < 3 {
            return Err(GenError::exhaustion(
                "a hole's point subset collapsed to fewer than 3 vertices",
            ));
        }
        hole_contour.reverse(); // border is CCW; holes are CW.

        let hole_segments = Contour::new(hole_contour.clone()).segments();
        for &segment in &hole_segments {
            if index.conflicts_with(segment) {
                return Err(GenError::exhaustion(
                    "a hole's boundary crosses, overlaps, or touches existing geometry",
                ));
            }
        }
        index.add_all(hole_segments.iter().copied());

        let can_touch_next = can_touch_next_along(axis, &hole_segments);
        remaining.drain(..hole_size - can_touch_next as usize);
        holes.push(Contour::new(hole_contour));
    }

    Ok(Polygon {
        border: Contour::new(border),
        holes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::StdRngOracle;

    #[test]
    fn builds_a_border_with_one_hole() {
        let mut points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        points.extend([
            Point::new(4.0, 4.0),
            Point::new(6.0, 4.0),
            Point::new(6.0, 6.0),
            Point::new(4.0, 6.0),
        ]);
        let mut oracle = StdRngOracle::seed_from_u64(1);
        let polygon = to_polygon(&mut oracle, &points, 4, &[4]).unwrap();
        assert_eq!(polygon.border.len(), 4);
        assert_eq!(polygon.holes.len(), 1);
        assert_eq!(polygon.holes[0].len(), 4);
    }

    #[test]
    fn rejects_when_not_enough_points_are_supplied() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        let mut oracle = StdRngOracle::seed_from_u64(2);
        assert!(to_polygon(&mut oracle, &points, 4, &[4]).is_err());
    }
}
