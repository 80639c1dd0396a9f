//! Geometric predicate capability (spec §4.1, module A).
//!
//! Purpose
//! - `orient`, `incircle`, `segments_relation`: the three pure functions
//!   every other module in this crate consumes. Kept free-standing (not a
//!   trait) for now, per spec §9 "Global predicate capability is best
//!   represented as an injected value carried through the call graph, not a
//!   process-wide singleton" — here the injection point is the function
//!   signature itself (`f64` in, enum out); swapping in a different numeric
//!   backend means swapping this module, not threading a trait object
//!   through every call site of a single-backend crate.
//!
//! These must be numerically robust in the sense spec §4.1 describes:
//! inconsistent signs between `orient` and `incircle` break the Delaunay
//! merge (§4.3) and the χ-algorithm's Δ bookkeeping (§4.8). This
//! implementation uses plain `f64` determinants throughout — no
//! exact/adaptive arithmetic is available to draw on, so robustness here
//! means consistent sign conventions, not arbitrary-precision exactness.

use crate::types::{Point, Segment};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Sign of the signed area of triangle `a -> b -> c`.
pub fn orient(a: Point, b: Point, c: Point) -> Orientation {
    let det = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InCircle {
    Inside,
    On,
    Outside,
}

/// Is `d` strictly inside the circle through `a, b, c`? Caller guarantees
/// `a, b, c` are in CCW order (spec §4.1).
pub fn incircle(a: Point, b: Point, c: Point, d: Point) -> InCircle {
    let adx = a.x - d.x;
    let ady = a.y - d.y;
    let bdx = b.x - d.x;
    let bdy = b.y - d.y;
    let cdx = c.x - d.x;
    let cdy = c.y - d.y;

    let ad2 = adx * adx + ady * ady;
    let bd2 = bdx * bdx + bdy * bdy;
    let cd2 = cdx * cdx + cdy * cdy;

    let det = adx * (bdy * cd2 - bd2 * cdy) - ady * (bdx * cd2 - bd2 * cdx)
        + ad2 * (bdx * cdy - bdy * cdx);

    if det > 0.0 {
        InCircle::Inside
    } else if det < 0.0 {
        InCircle::Outside
    } else {
        InCircle::On
    }
}

/// Convenience boolean form used by the Delaunay builder's candidate loops
/// (spec §4.3), grounded on `is_point_inside_circumcircle`.
pub fn is_inside_circumcircle(a: Point, b: Point, c: Point, d: Point) -> bool {
    incircle(a, b, c, d) == InCircle::Inside
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentRelation {
    Disjoint,
    Touch,
    Cross,
    Overlap,
}

/// Classifies the relation between two segments (spec §4.1). Used by the
/// composers (module L) and the hole-edge index (module G) to reject
/// crossing/overlapping geometry.
pub fn segments_relation(s: Segment, t: Segment) -> SegmentRelation {
    let (a, b) = (s.start, s.end);
    let (c, d) = (t.start, t.end);

    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);

    if o1 != o2 && o3 != o4 {
        // Proper crossing unless one of the orientations is collinear, in
        // which case an endpoint lies exactly on the other segment (touch).
        if o1 == Orientation::Collinear
            || o2 == Orientation::Collinear
            || o3 == Orientation::Collinear
            || o4 == Orientation::Collinear
        {
            return SegmentRelation::Touch;
        }
        return SegmentRelation::Cross;
    }

    if o1 == Orientation::Collinear
        && o2 == Orientation::Collinear
        && o3 == Orientation::Collinear
        && o4 == Orientation::Collinear
    {
        // All four points collinear: either disjoint, touching at a single
        // shared endpoint, or overlapping along an interval.
        return collinear_relation(a, b, c, d);
    }

    if on_segment(a, b, c) || on_segment(a, b, d) || on_segment(c, d, a) || on_segment(c, d, b) {
        return SegmentRelation::Touch;
    }

    SegmentRelation::Disjoint
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    orient(a, b, p) == Orientation::Collinear
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

fn collinear_relation(a: Point, b: Point, c: Point, d: Point) -> SegmentRelation {
    // Project onto the dominant axis to get a 1D overlap test.
    let (lo_s, hi_s, lo_t, hi_t, axis_a, axis_b, axis_c, axis_d);
    if (b.x - a.x).abs() >= (b.y - a.y).abs() {
        axis_a = a.x;
        axis_b = b.x;
        axis_c = c.x;
        axis_d = d.x;
    } else {
        axis_a = a.y;
        axis_b = b.y;
        axis_c = c.y;
        axis_d = d.y;
    }
    lo_s = axis_a.min(axis_b);
    hi_s = axis_a.max(axis_b);
    lo_t = axis_c.min(axis_d);
    hi_t = axis_c.max(axis_d);

    if hi_s < lo_t || hi_t < lo_s {
        return SegmentRelation::Disjoint;
    }
    let overlap_lo = lo_s.max(lo_t);
    let overlap_hi = hi_s.min(hi_t);
    if overlap_hi > overlap_lo {
        SegmentRelation::Overlap
    } else {
        SegmentRelation::Touch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orient_basic_triangle() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(0.0, 1.0);
        assert_eq!(orient(a, b, c), Orientation::CounterClockwise);
        assert_eq!(orient(a, c, b), Orientation::Clockwise);
        assert_eq!(orient(a, b, Point::new(2.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn incircle_unit_square_diagonal() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(1.0, 1.0);
        let inside = Point::new(0.5, 0.5);
        let outside = Point::new(5.0, 5.0);
        assert_eq!(incircle(a, b, c, inside), InCircle::Inside);
        assert_eq!(incircle(a, b, c, outside), InCircle::Outside);
    }

    #[test]
    fn segments_relation_crossing_and_disjoint() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let t = Segment::new(Point::new(0.0, 2.0), Point::new(2.0, 0.0));
        assert_eq!(segments_relation(s, t), SegmentRelation::Cross);

        let u = Segment::new(Point::new(10.0, 10.0), Point::new(11.0, 11.0));
        assert_eq!(segments_relation(s, u), SegmentRelation::Disjoint);
    }

    #[test]
    fn segments_relation_touch_and_overlap() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let touching = Segment::new(Point::new(1.0, 0.0), Point::new(1.0, 1.0));
        assert_eq!(segments_relation(s, touching), SegmentRelation::Touch);

        let overlapping = Segment::new(Point::new(0.5, 0.0), Point::new(2.0, 0.0));
        assert_eq!(segments_relation(s, overlapping), SegmentRelation::Overlap);
    }
}
