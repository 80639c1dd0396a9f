//! Composers for heterogeneous and multi-part geometry (spec §4.7, module
//! L): multicontour, multipolygon, multisegment, and mix assembly, all
//! gated behind the disjointness guard.
//!
//! Grounded on `_core/base.py`'s `to_multicontour`/`to_multipolygons`/
//! `to_mixes`/`to_non_crossing_non_overlapping_segments_sequences`, and on
//! `contracts.py`'s `has_vertical_leftmost_segment`/
//! `has_horizontal_lowermost_segment` — the guard's building blocks, which
//! check that the segment achieving a shape's extreme x (resp. y) is
//! itself aligned with that axis, so the extreme point is an unambiguous
//! single vertex rather than an edge running along the sweep line.

use crate::error::{GenError, GenResult};
use crate::oracle::DrawOracle;
use crate::predicates::{segments_relation, SegmentRelation};
use crate::segment_index::SegmentIndex;
use crate::types::{Contour, Mix, Point, Polygon, Segment};

/// The sweep axis a shared point/coordinate pool was last sorted by, for the
/// multi-part composers that slice successive components off the front of
/// one shared, sorted pool instead of drawing each component independently.
/// Grounded on `horizontal_point_key`/`vertical_point_key` and the
/// `sorting_key_chooser` in `_core/factories.py::to_multicontour`/`to_polygon`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortAxis {
    Horizontal,
    Vertical,
}

/// Draws which axis to sort the shared pool by for the next component.
pub fn draw_sort_axis(oracle: &mut dyn DrawOracle) -> GenResult<SortAxis> {
    Ok(if oracle.choice(2)? == 0 {
        SortAxis::Horizontal
    } else {
        SortAxis::Vertical
    })
}

/// Sorts `points` by the chosen axis, breaking ties on the other axis.
pub fn sort_points_by_axis(points: &mut [Point], axis: SortAxis) {
    match axis {
        SortAxis::Horizontal => points.sort_by(|a, b| {
            a.x.partial_cmp(&b.x).unwrap().then(a.y.partial_cmp(&b.y).unwrap())
        }),
        SortAxis::Vertical => points.sort_by(|a, b| {
            a.y.partial_cmp(&b.y).unwrap().then(a.x.partial_cmp(&b.x).unwrap())
        }),
    }
}

/// The guard paired with a given sort axis: whether the component just built
/// may share its extreme vertex along that axis with the next slice of the
/// pool. Grounded on `to_multicontour`'s `predicate(to_contour_segments(...))`
/// and `to_polygon`'s `predicate(hole_edges)`.
pub fn can_touch_next_along(axis: SortAxis, segments: &[Segment]) -> bool {
    match axis {
        SortAxis::Horizontal => has_vertical_leftmost_segment(segments),
        SortAxis::Vertical => has_horizontal_lowermost_segment(segments),
    }
}

/// Is the segment (or one of the segments, if tied) achieving the maximum
/// `max_x()` over `segments` itself vertical? Grounded on
/// `has_vertical_leftmost_segment`.
pub fn has_vertical_leftmost_segment(segments: &[Segment]) -> bool {
    match segments
        .iter()
        .map(|s| s.max_x())
        .fold(None, |acc: Option<f64>, x| {
            Some(acc.map_or(x, |a| a.max(x)))
        }) {
        None => false,
        Some(extreme) => segments
            .iter()
            .filter(|s| s.max_x() == extreme)
            .any(Segment::is_vertical),
    }
}

/// Is the segment achieving the minimum `min_y()` over `segments` itself
/// horizontal? Grounded on `has_horizontal_lowermost_segment`.
pub fn has_horizontal_lowermost_segment(segments: &[Segment]) -> bool {
    match segments
        .iter()
        .map(|s| s.min_y())
        .fold(None, |acc: Option<f64>, y| {
            Some(acc.map_or(y, |a| a.min(y)))
        }) {
        None => false,
        Some(extreme) => segments
            .iter()
            .filter(|s| s.min_y() == extreme)
            .any(Segment::is_horizontal),
    }
}

/// The disjointness guard: a composed geometry's combined boundary must
/// have an unambiguous leftmost-or-lowermost extreme edge, so downstream
/// sweep-based consumers (a hole-crossing check, a further composition)
/// never have to break a tie between two equally-extreme non-aligned
/// edges. Grounded on spec §4.7's combination of the two predicates above.
fn disjointness_guard(segments: &[Segment]) -> bool {
    segments.is_empty() || has_vertical_leftmost_segment(segments) || has_horizontal_lowermost_segment(segments)
}

fn require_guard(segments: &[Segment]) -> GenResult<()> {
    if disjointness_guard(segments) {
        Ok(())
    } else {
        Err(GenError::exhaustion(
            "composed geometry's extreme edge is neither vertical nor horizontal; \
             cannot guarantee unambiguous disjointness",
        ))
    }
}

fn require_pairwise_disjoint(groups: &[Vec<Segment>]) -> GenResult<()> {
    let mut index = SegmentIndex::new();
    for group in groups {
        for &segment in group {
            if index.conflicts_with(segment) {
                return Err(GenError::exhaustion(
                    "composed geometry's parts are not pairwise disjoint",
                ));
            }
        }
        index.add_all(group.iter().copied());
    }
    Ok(())
}

/// Validates that `contours` form a legal multicontour: pairwise disjoint,
/// and the combined boundary passes the disjointness guard.
pub fn validate_multicontour(contours: &[Contour]) -> GenResult<()> {
    let groups: Vec<Vec<Segment>> = contours.iter().map(Contour::segments).collect();
    require_pairwise_disjoint(&groups)?;
    let all: Vec<Segment> = groups.into_iter().flatten().collect();
    require_guard(&all)
}

/// Validates that `polygons` form a legal multipolygon: every polygon's own
/// border/holes are already valid (module G's job), and distinct polygons'
/// boundaries (border + holes) are pairwise disjoint.
pub fn validate_multipolygon(polygons: &[Polygon]) -> GenResult<()> {
    let groups: Vec<Vec<Segment>> = polygons
        .iter()
        .map(|p| {
            let mut segments = p.border.segments();
            for hole in &p.holes {
                segments.extend(hole.segments());
            }
            segments
        })
        .collect();
    require_pairwise_disjoint(&groups)?;
    let all: Vec<Segment> = groups.into_iter().flatten().collect();
    require_guard(&all)
}

/// Validates a multisegment: unlike contours/polygons, segments here may
/// share endpoints (a "touch") — only proper crossing or overlap is
/// forbidden. Grounded on
/// `to_non_crossing_non_overlapping_segments_sequences`.
pub fn validate_multisegment(segments: &[Segment]) -> GenResult<()> {
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            match segments_relation(segments[i], segments[j]) {
                SegmentRelation::Cross | SegmentRelation::Overlap => {
                    return Err(GenError::exhaustion(
                        "multisegment contains crossing or overlapping segments",
                    ));
                }
                SegmentRelation::Touch | SegmentRelation::Disjoint => {}
            }
        }
    }
    Ok(())
}

/// Validates a [`Mix`]: its multipoint, multisegment and multipolygon parts
/// must be pairwise disjoint from one another (a mix point must not sit on
/// a mix segment or inside/on a mix polygon, etc.), and the multisegment
/// part alone must satisfy [`validate_multisegment`].
pub fn validate_mix(mix: &Mix) -> GenResult<()> {
    validate_multisegment(&mix.segments)?;

    let polygon_groups: Vec<Vec<Segment>> = mix
        .polygons
        .iter()
        .map(|p| {
            let mut segments = p.border.segments();
            for hole in &p.holes {
                segments.extend(hole.segments());
            }
            segments
        })
        .collect();
    require_pairwise_disjoint(&polygon_groups)?;

    let mut index = SegmentIndex::new();
    index.add_all(mix.segments.iter().copied());
    for group in &polygon_groups {
        for &segment in group {
            if index.conflicts_with(segment) {
                return Err(GenError::exhaustion(
                    "a mix's segments and polygons are not disjoint",
                ));
            }
        }
        index.add_all(group.iter().copied());
    }

    for &point in &mix.points {
        if point_touches_any(point, &mix.segments) || point_in_or_on_any_polygon(point, &mix.polygons) {
            return Err(GenError::exhaustion(
                "a mix's points are not disjoint from its segments/polygons",
            ));
        }
    }
    Ok(())
}

fn point_touches_any(point: Point, segments: &[Segment]) -> bool {
    segments.iter().any(|s| {
        let degenerate = Segment::new(point, point);
        segments_relation(*s, degenerate) != SegmentRelation::Disjoint
    })
}

fn point_in_or_on_any_polygon(point: Point, polygons: &[Polygon]) -> bool {
    polygons.iter().any(|p| point_touches_any(point, &p.border.segments()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_leftmost_segment_is_detected() {
        let segments = vec![
            Segment::new(Point::new(5.0, 0.0), Point::new(5.0, 3.0)),
            Segment::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0)),
        ];
        assert!(has_vertical_leftmost_segment(&segments));
    }

    #[test]
    fn disjoint_contours_validate() {
        let a = Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]);
        let b = Contour::new(vec![
            Point::new(10.0, 0.0),
            Point::new(11.0, 0.0),
            Point::new(11.0, 1.0),
            Point::new(10.0, 1.0),
        ]);
        assert!(validate_multicontour(&[a, b]).is_ok());
    }

    #[test]
    fn overlapping_contours_are_rejected() {
        let a = Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ]);
        let b = Contour::new(vec![
            Point::new(1.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 3.0),
            Point::new(1.0, 3.0),
        ]);
        assert!(validate_multicontour(&[a, b]).is_err());
    }

    #[test]
    fn touching_segments_are_allowed_in_a_multisegment() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let touching = Segment::new(Point::new(1.0, 0.0), Point::new(1.0, 1.0));
        assert!(validate_multisegment(&[s, touching]).is_ok());
    }

    #[test]
    fn crossing_segments_are_rejected_in_a_multisegment() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
        let crossing = Segment::new(Point::new(0.0, 2.0), Point::new(2.0, 0.0));
        assert!(validate_multisegment(&[s, crossing]).is_err());
    }
}
