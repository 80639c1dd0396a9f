//! Valtr's convex polygon builder (spec §4.10, module H).
//!
//! Builds a convex polygon whose vertex x- and y-coordinates are exactly
//! the given `xs`/`ys` multisets, by the "two random convex zig-zag chains"
//! construction: split each sorted coordinate list into a random up/down
//! walk of deltas, pair the x-deltas with a randomly shuffled permutation
//! of the y-deltas, sort the resulting vectors by angle, and walk them
//! nose-to-tail. Grounded on `_core/factories.py::_to_convex_vertex_sequence`
//! and its `_to_vectors_coordinates` helper.

use crate::error::GenResult;
use crate::hull::convex_hull_strict;
use crate::oracle::DrawOracle;
use crate::types::Point;

/// `xs`/`ys` must each have length >= 3 (the structural floor for a convex
/// polygon, spec §4.10). Returns a strictly convex contour using exactly
/// these coordinate multisets.
pub fn to_convex_vertex_sequence(
    oracle: &mut dyn DrawOracle,
    xs: &[f64],
    ys: &[f64],
) -> GenResult<Vec<Point>> {
    let mut xs = xs.to_vec();
    let mut ys = ys.to_vec();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let min_x = xs[0];
    let max_x = *xs.last().unwrap();
    let min_y = ys[0];
    let max_y = *ys.last().unwrap();

    let inner_xs = &xs[1..xs.len() - 1];
    let inner_ys = &ys[1..ys.len() - 1];

    let vectors_xs = to_vectors_coordinates(oracle, inner_xs, min_x, max_x)?;
    let mut vectors_ys = to_vectors_coordinates(oracle, inner_ys, min_y, max_y)?;

    let permutation = oracle.permutation(vectors_ys.len())?;
    vectors_ys = permutation.into_iter().map(|i| vectors_ys[i]).collect();

    let mut vectors: Vec<(f64, f64)> = vectors_xs.into_iter().zip(vectors_ys).collect();
    vectors.sort_by(|a, b| {
        a.1.atan2(a.0)
            .partial_cmp(&b.1.atan2(b.0))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut point = (0.0_f64, 0.0_f64);
    let mut min_polygon = (0.0_f64, 0.0_f64);
    let mut points = Vec::with_capacity(vectors.len());
    for (dx, dy) in vectors {
        point = (point.0 + dx, point.1 + dy);
        points.push(point);
        min_polygon.0 = min_polygon.0.min(point.0);
        min_polygon.1 = min_polygon.1.min(point.1);
    }

    let shift_x = min_x - min_polygon.0;
    let shift_y = min_y - min_polygon.1;
    let result: Vec<Point> = points
        .into_iter()
        .map(|(x, y)| {
            Point::new(
                (x + shift_x).clamp(min_x, max_x),
                (y + shift_y).clamp(min_y, max_y),
            )
        })
        .collect();

    Ok(convex_hull_strict(&result))
}

/// Splits `coords` (sorted, excluding the two extremes) into a random
/// up/down walk of deltas from `min_c`/`max_c`, grounded on
/// `_to_vectors_coordinates`.
fn to_vectors_coordinates(
    oracle: &mut dyn DrawOracle,
    coords: &[f64],
    min_c: f64,
    max_c: f64,
) -> GenResult<Vec<f64>> {
    let mut last_min = min_c;
    let mut last_max = max_c;
    let mut deltas = Vec::with_capacity(coords.len() + 2);
    for &c in coords {
        if oracle.bit()? {
            deltas.push(c - last_min);
            last_min = c;
        } else {
            deltas.push(last_max - c);
            last_max = c;
        }
    }
    deltas.push(max_c - last_min);
    deltas.push(last_max - max_c);
    Ok(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::StdRngOracle;

    #[test]
    fn produced_contour_uses_every_requested_x_and_y_extreme() {
        let mut oracle = StdRngOracle::seed_from_u64(42);
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let contour = to_convex_vertex_sequence(&mut oracle, &xs, &ys).unwrap();
        assert!(contour.len() >= 3);
        assert!(contour.iter().all(|p| (0.0..=4.0).contains(&p.x)));
        assert!(contour.iter().all(|p| (0.0..=4.0).contains(&p.y)));
    }

    #[test]
    fn minimal_triangle_case_does_not_panic() {
        let mut oracle = StdRngOracle::seed_from_u64(1);
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![0.0, 1.0, 2.0];
        let contour = to_convex_vertex_sequence(&mut oracle, &xs, &ys).unwrap();
        assert!(contour.len() >= 3);
    }
}
