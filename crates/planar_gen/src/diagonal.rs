//! Convex-quadrilateral diagonal predicate (spec §4.6b, module E₁).
//!
//! `e` is a legal flip diagonal exactly when the quadrilateral formed by its
//! two adjacent triangles is strictly convex, which holds iff all four
//! corners turn the same way. Grounded on
//! `core/factories.py::_is_convex_quadrilateral_diagonal`, whose chained
//! `is` comparison (`a is CCW is b is c is d`) means all four terms equal
//! `CCW` — not merely equal to each other.

use crate::mesh::{EdgeId, Mesh};
use crate::predicates::{orient, Orientation};
use crate::types::Point;

fn orientation_of(mesh: &Mesh, e: EdgeId, point: Point) -> Orientation {
    orient(mesh.origin(e), mesh.dest(e), point)
}

/// Is `e` a legal diagonal to flip? (spec §4.5's precondition for `flip`.)
pub fn is_convex_quadrilateral_diagonal(mesh: &Mesh, e: EdgeId) -> bool {
    let oprev_e = mesh.oprev(e);
    let term1 = orientation_of(mesh, oprev_e, mesh.dest(e));

    let sym_rprev = mesh.sym(mesh.rprev(e));
    let term2 = orientation_of(mesh, sym_rprev, mesh.dest(mesh.onext(e)));

    let lnext_e = mesh.lnext(e);
    let term3 = orientation_of(mesh, lnext_e, mesh.origin(e));

    let sym_onext = mesh.sym(mesh.onext(e));
    let term4 = orientation_of(mesh, sym_onext, mesh.dest(oprev_e));

    term1 == Orientation::CounterClockwise
        && term2 == Orientation::CounterClockwise
        && term3 == Orientation::CounterClockwise
        && term4 == Orientation::CounterClockwise
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delaunay::delaunay;

    #[test]
    fn unit_square_diagonal_is_convex() {
        let mut mesh = Mesh::new();
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let tri = delaunay(&mut mesh, &pts);
        // The square has exactly one triangulating diagonal; whichever
        // boundary edge's lnext lands on it must report convex.
        let mut found = false;
        let mut edge = tri.left_edge;
        for _ in 0..4 {
            if is_convex_quadrilateral_diagonal(&mesh, mesh.lnext(edge)) {
                found = true;
                break;
            }
            edge = mesh.onext(edge);
        }
        assert!(found);
    }
}
