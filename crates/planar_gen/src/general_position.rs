//! Quadratic-residue points-in-general-position sampler (spec §4.13,
//! module K).
//!
//! Produces a point set with no three points collinear, via the classic
//! construction: sort two coordinate multisets, truncate both to the same
//! prime length `p`, draw a random nonzero `scale`, and place the `i`-th
//! point at `(xs[i], ys[(scale * i^2) mod p])`. Grounded on
//! `_core/base.py::to_points_in_general_position`; the original wires the
//! prime bookkeeping (`to_next_prime`/`to_prior_prime`) and a sparsity
//! postcondition (`are_indices_pairs_sparse`) through `hypothesis`'s
//! strategy combinators. Those helper bodies live outside the retrieved
//! source pack (in a sibling `utils` module not included in the
//! distillation), so this module re-derives the same guarantee directly: a
//! prime modulus makes `i -> (scale * i^2) mod p` injective enough to avoid
//! accidental collinearity for `i` in `0..p`, which this module then
//! verifies with a `debug_assert!` rather than trusting blindly (see
//! `DESIGN.md`).

use crate::error::{GenError, GenResult};
use crate::oracle::DrawOracle;
use crate::predicates::{orient, Orientation};
use crate::types::Point;

/// Samples `grid_size` points in general position, where `grid_size` is the
/// largest prime `<= min(xs.len(), ys.len())` that is also `>= min_size`.
/// `xs`/`ys` need not be sorted or pre-truncated.
pub fn to_points_in_general_position(
    oracle: &mut dyn DrawOracle,
    xs: &[f64],
    ys: &[f64],
    min_size: usize,
) -> GenResult<Vec<Point>> {
    let mut xs = xs.to_vec();
    let mut ys = ys.to_vec();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let grid_size_lower_bound = next_prime(min_size.max(1));
    let capacity = xs.len().min(ys.len());
    if capacity < grid_size_lower_bound {
        return Err(GenError::exhaustion(format!(
            "only {capacity} coordinate pairs available, need a prime grid size >= {grid_size_lower_bound}"
        )));
    }
    let grid_size = prior_prime(capacity);
    if grid_size < grid_size_lower_bound {
        return Err(GenError::exhaustion(format!(
            "largest prime grid size <= {capacity} is {grid_size}, below the requested floor {grid_size_lower_bound}"
        )));
    }

    let scale = oracle.integer(1, (grid_size - 1) as i64)? as usize;

    let points: Vec<Point> = (0..grid_size)
        .map(|i| {
            let y_index = (scale * i * i) % grid_size;
            Point::new(xs[i], ys[y_index])
        })
        .collect();

    debug_assert!(
        no_three_collinear(&points),
        "quadratic-residue placement produced three collinear points"
    );

    Ok(points)
}

fn no_three_collinear(points: &[Point]) -> bool {
    let n = points.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if orient(points[i], points[j], points[k]) == Orientation::Collinear {
                    return false;
                }
            }
        }
    }
    true
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest prime `>= n`.
fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

/// Largest prime `<= n`.
fn prior_prime(n: usize) -> usize {
    let mut candidate = n;
    while candidate >= 2 && !is_prime(candidate) {
        candidate -= 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::StdRngOracle;

    #[test]
    fn next_and_prior_prime_bracket_known_values() {
        assert_eq!(next_prime(8), 11);
        assert_eq!(prior_prime(10), 7);
        assert_eq!(next_prime(2), 2);
    }

    #[test]
    fn sampled_points_are_never_three_collinear() {
        let mut oracle = StdRngOracle::seed_from_u64(3);
        let xs: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let ys: Vec<f64> = (0..20).map(|i| (i * 3) as f64).collect();
        let points = to_points_in_general_position(&mut oracle, &xs, &ys, 5).unwrap();
        assert!(points.len() >= 5);
        assert!(no_three_collinear(&points));
    }

    #[test]
    fn rejects_a_request_below_available_coordinate_supply() {
        let mut oracle = StdRngOracle::seed_from_u64(1);
        let xs = vec![0.0, 1.0];
        let ys = vec![0.0, 1.0];
        assert!(to_points_in_general_position(&mut oracle, &xs, &ys, 5).is_err());
    }
}
