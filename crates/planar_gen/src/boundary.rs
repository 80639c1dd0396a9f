//! Boundary traversal (spec §4.4, module D).
//!
//! Grounded on `core/triangular.py::Triangulation._to_boundary_edges`,
//! which walks `right_from_end` (this crate's `rprev`) starting from
//! `left_edge` until it returns to the start.

use crate::mesh::{EdgeId, Mesh};
use crate::types::Point;

/// Yields the outer boundary ring of a triangulation in CCW order, starting
/// at `left_edge`.
pub fn boundary_edges(mesh: &Mesh, left_edge: EdgeId) -> Vec<EdgeId> {
    let mut result = Vec::new();
    let start = left_edge;
    let mut edge = start;
    loop {
        result.push(edge);
        let next = mesh.rprev(edge);
        if next == start {
            break;
        }
        edge = next;
    }
    result
}

/// Convenience: the boundary ring's vertices, in CCW order.
pub fn boundary_points(mesh: &Mesh, left_edge: EdgeId) -> Vec<Point> {
    boundary_edges(mesh, left_edge)
        .into_iter()
        .map(|e| mesh.origin(e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delaunay::delaunay;

    #[test]
    fn boundary_of_a_triangle_visits_three_edges() {
        let mut mesh = Mesh::new();
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 2.0),
        ];
        let tri = delaunay(&mut mesh, &pts);
        let edges = boundary_edges(&mesh, tri.left_edge);
        assert_eq!(edges.len(), 3);
    }
}
