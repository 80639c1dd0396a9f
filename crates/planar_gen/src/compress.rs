//! Collinear-vertex compressor (spec §4.6, module E).
//!
//! Grounded verbatim on `_core/factories.py::compress_contour`: two passes
//! over the cyclic vertex sequence, one scanning forward from the far end,
//! one scanning backward from the start, each deleting a vertex in place
//! whenever it is collinear with its current neighbours.

use crate::predicates::{orient, Orientation};
use crate::types::Point;

/// Removes redundant collinear vertices from a cyclic sequence in place.
/// Mirrors the original's index arithmetic (negative indices count from the
/// end, exactly as in the Python source) rather than reshaping it into a
/// more "obviously Rust" two-pointer scan, since the two passes' asymmetric
/// index bookkeeping is itself part of what makes the algorithm correct
/// (each pass removes a different adjacency pattern of collinear runs).
pub fn compress_contour(vertices: &mut Vec<Point>) {
    let mut index: isize = -(vertices.len() as isize) + 1;
    while index < 0 {
        while (2isize.max(-index) as usize) < vertices.len()
            && orient(
                at(vertices, index + 1),
                at(vertices, index + 2),
                at(vertices, index),
            ) == Orientation::Collinear
        {
            vertices.remove(at_index(vertices, index + 1));
        }
        index += 1;
    }
    let mut index: isize = 0;
    while (index as usize) < vertices.len() {
        while (2isize.max(index) as usize) < vertices.len()
            && orient(
                at(vertices, index - 1),
                at(vertices, index - 2),
                vertices[index as usize],
            ) == Orientation::Collinear
        {
            vertices.remove(at_index(vertices, index - 1));
        }
        index += 1;
    }
}

fn at(vertices: &[Point], index: isize) -> Point {
    vertices[at_index(vertices, index)]
}

fn at_index(vertices: &[Point], index: isize) -> usize {
    let len = vertices.len() as isize;
    (((index % len) + len) % len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_a_single_collinear_vertex() {
        let mut v = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        compress_contour(&mut v);
        assert_eq!(v.len(), 4);
        assert!(!v.contains(&Point::new(1.0, 0.0)));
    }

    #[test]
    fn leaves_a_strict_square_untouched() {
        let mut v = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        compress_contour(&mut v);
        assert_eq!(v.len(), 4);
    }
}
