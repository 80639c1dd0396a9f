//! Delaunay builder (spec §4.3, module C).
//!
//! Divide-and-conquer assembly of a `Mesh` (module B) over a sorted point
//! set, grounded directly on `core/triangular.py`'s `delaunay`, `_merge`,
//! `_find_base_edge`, `_to_left_candidate`, `_to_right_candidate`.

use crate::mesh::{EdgeId, Mesh};
use crate::predicates::{is_inside_circumcircle, orient, Orientation};
use crate::types::Point;

/// A pair of boundary edges bounding one triangulated piece: `left_edge`'s
/// origin is the lexicographically smallest vertex in the piece;
/// `right_edge`'s destination is the largest (spec §3).
#[derive(Clone, Copy, Debug)]
pub struct Triangulation {
    pub left_edge: EdgeId,
    pub right_edge: EdgeId,
}

/// Builds the Delaunay triangulation of `points` (>= 2 distinct points,
/// any order — this function sorts them lexicographically itself).
pub fn delaunay(mesh: &mut Mesh, points: &[Point]) -> Triangulation {
    let mut sorted: Vec<Point> = points.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let pieces = split_recursively(&sorted);
    let mut triangulations: Vec<Triangulation> = pieces
        .iter()
        .map(|piece| initialize(mesh, piece))
        .collect();

    while triangulations.len() > 1 {
        let pairs = triangulations.len() / 2 * 2;
        let mut merged = Vec::with_capacity(triangulations.len() - pairs / 2);
        let mut i = 0;
        while i < pairs {
            let left = triangulations[i];
            let right = triangulations[i + 1];
            merged.push(merge_with(mesh, left, right));
            i += 2;
        }
        merged.extend_from_slice(&triangulations[pairs..]);
        triangulations = merged;
    }
    triangulations[0]
}

/// Recursively halves `sorted` until every piece has 2 or 3 points.
fn split_recursively(sorted: &[Point]) -> Vec<Vec<Point>> {
    if sorted.len() <= 3 {
        return vec![sorted.to_vec()];
    }
    let mid = sorted.len() / 2;
    let mut result = split_recursively(&sorted[..mid]);
    result.extend(split_recursively(&sorted[mid..]));
    result
}

fn initialize(mesh: &mut Mesh, points: &[Point]) -> Triangulation {
    match points.len() {
        2 => triangulate_two_points(mesh, points),
        3 => triangulate_three_points(mesh, points),
        n => unreachable!("base case triangulation only handles 2 or 3 points, got {n}"),
    }
}

fn triangulate_two_points(mesh: &mut Mesh, points: &[Point]) -> Triangulation {
    let e = mesh.make_edge(points[0], points[1]);
    Triangulation {
        left_edge: e,
        right_edge: mesh.sym(e),
    }
}

fn triangulate_three_points(mesh: &mut Mesh, points: &[Point]) -> Triangulation {
    let (left, mid, right) = (points[0], points[1], points[2]);
    let e1 = mesh.make_edge(left, mid);
    let e2 = mesh.make_edge(mid, right);
    mesh.splice(mesh.sym(e1), e2);

    match orient(left, mid, right) {
        Orientation::CounterClockwise => {
            let e3 = mesh.connect(e2, e1);
            Triangulation {
                left_edge: mesh.sym(e3),
                right_edge: e3,
            }
        }
        Orientation::Clockwise => {
            mesh.connect(e2, e1);
            Triangulation {
                left_edge: e1,
                right_edge: mesh.sym(e2),
            }
        }
        Orientation::Collinear => Triangulation {
            left_edge: e1,
            right_edge: mesh.sym(e2),
        },
    }
}

fn merge_with(mesh: &mut Mesh, mut left: Triangulation, mut right: Triangulation) -> Triangulation {
    let base_edge = find_base_edge(mesh, &mut left, &mut right);
    merge(mesh, base_edge);
    Triangulation {
        left_edge: left.left_edge,
        right_edge: right.right_edge,
    }
}

fn find_base_edge(mesh: &mut Mesh, left: &mut Triangulation, right: &mut Triangulation) -> EdgeId {
    loop {
        let right_origin = mesh.origin(right.left_edge);
        let left_dest = mesh.dest(left.right_edge);
        let left_origin = mesh.origin(left.right_edge);
        if orient(left_origin, left_dest, right_origin) == Orientation::CounterClockwise {
            left.right_edge = mesh.lnext(left.right_edge);
            continue;
        }
        let right_dest = mesh.dest(right.left_edge);
        let left_right_origin = mesh.origin(left.right_edge);
        if orient(right_origin, right_dest, left_right_origin) == Orientation::Clockwise {
            right.left_edge = mesh.rprev(right.left_edge);
            continue;
        }
        break;
    }
    let base_edge = mesh.connect(mesh.sym(right.left_edge), left.right_edge);
    if mesh.origin(left.right_edge) == mesh.origin(left.left_edge) {
        left.left_edge = mesh.sym(base_edge);
    }
    if mesh.origin(right.left_edge) == mesh.origin(right.right_edge) {
        right.right_edge = base_edge;
    }
    base_edge
}

fn merge(mesh: &mut Mesh, mut base_edge: EdgeId) {
    loop {
        let left_candidate = to_left_candidate(mesh, base_edge);
        let right_candidate = to_right_candidate(mesh, base_edge);
        match (left_candidate, right_candidate) {
            (None, None) => break,
            (None, Some(right)) => {
                base_edge = mesh.connect(right, mesh.sym(base_edge));
            }
            (Some(left), None) => {
                base_edge = mesh.connect(mesh.sym(base_edge), mesh.sym(left));
            }
            (Some(left), Some(right)) => {
                let base_dest = mesh.dest(base_edge);
                let base_origin = mesh.origin(base_edge);
                let prefer_right = is_inside_circumcircle(
                    mesh.dest(left),
                    base_dest,
                    base_origin,
                    mesh.dest(right),
                );
                if prefer_right {
                    base_edge = mesh.connect(right, mesh.sym(base_edge));
                } else {
                    base_edge = mesh.connect(mesh.sym(base_edge), mesh.sym(left));
                }
            }
        }
    }
}

fn to_left_candidate(mesh: &mut Mesh, base_edge: EdgeId) -> Option<EdgeId> {
    let mut result = mesh.onext(mesh.sym(base_edge));
    let base_origin = mesh.origin(base_edge);
    let base_dest = mesh.dest(base_edge);
    if orient(base_origin, base_dest, mesh.dest(result)) != Orientation::Clockwise {
        return None;
    }
    loop {
        let next_apex = mesh.dest(mesh.onext(result));
        let still_clockwise =
            orient(base_origin, base_dest, next_apex) == Orientation::Clockwise;
        if !still_clockwise {
            break;
        }
        let violates_delaunay =
            is_inside_circumcircle(base_dest, base_origin, mesh.dest(result), next_apex);
        if !violates_delaunay {
            break;
        }
        let next_candidate = mesh.onext(result);
        mesh.delete(result);
        result = next_candidate;
    }
    Some(result)
}

fn to_right_candidate(mesh: &mut Mesh, base_edge: EdgeId) -> Option<EdgeId> {
    let mut result = mesh.oprev(base_edge);
    let base_origin = mesh.origin(base_edge);
    let base_dest = mesh.dest(base_edge);
    if orient(base_origin, base_dest, mesh.dest(result)) != Orientation::Clockwise {
        return None;
    }
    loop {
        let next_apex = mesh.dest(mesh.oprev(result));
        let still_clockwise =
            orient(base_origin, base_dest, next_apex) == Orientation::Clockwise;
        if !still_clockwise {
            break;
        }
        let violates_delaunay =
            is_inside_circumcircle(base_dest, base_origin, mesh.dest(result), next_apex);
        if !violates_delaunay {
            break;
        }
        let next_candidate = mesh.oprev(result);
        mesh.delete(result);
        result = next_candidate;
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::boundary_points;

    #[test]
    fn triangle_has_three_boundary_vertices() {
        let mut mesh = Mesh::new();
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 2.0),
        ];
        let tri = delaunay(&mut mesh, &pts);
        let boundary = boundary_points(&mesh, tri.left_edge);
        assert_eq!(boundary.len(), 3);
    }

    #[test]
    fn square_has_four_boundary_vertices() {
        let mut mesh = Mesh::new();
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let tri = delaunay(&mut mesh, &pts);
        let boundary = boundary_points(&mesh, tri.left_edge);
        assert_eq!(boundary.len(), 4);
    }

    #[test]
    fn pentagon_in_general_position_has_five_boundary_vertices() {
        let mut mesh = Mesh::new();
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(5.0, 2.0),
            Point::new(2.0, 4.0),
            Point::new(-1.0, 2.0),
        ];
        let tri = delaunay(&mut mesh, &pts);
        let boundary = boundary_points(&mesh, tri.left_edge);
        assert_eq!(boundary.len(), 5);
    }
}
