//! Top-level generator entry points (spec §4.13 / §6, module M): the public
//! surface a property-testing host actually calls. Each function validates
//! its size bounds (spec §7), draws whatever raw coordinates/choices it
//! needs from the injected [`DrawOracle`], and delegates the geometric
//! construction to modules A-L.
//!
//! Coordinates are drawn at a fixed sub-unit resolution via
//! [`draw_coordinate`] rather than as raw floats, since `DrawOracle` (spec
//! §6, §9) only exposes integer/choice/permutation primitives — every
//! random choice funnels through that one narrow surface instead of
//! scattering `gen_range` calls across call sites.

use crate::chi::to_vertex_sequence;
use crate::compose::{
    can_touch_next_along, draw_sort_axis, has_vertical_leftmost_segment, sort_points_by_axis,
    validate_mix, validate_multicontour, validate_multipolygon, validate_multisegment, SortAxis,
};
use crate::error::{validate_sizes, GenError, GenResult, SizeWarning};
use crate::general_position::to_points_in_general_position;
use crate::hull::convex_hull_strict;
use crate::mesh::Mesh;
use crate::oracle::DrawOracle;
use crate::polygon_holes::to_polygon as build_polygon_with_holes;
use crate::star::to_star_contour_vertices;
use crate::types::{Contour, Mix, Point, Polygon, Segment};
use crate::valtr::to_convex_vertex_sequence;

/// A coordinate draw resolution of one part in a million: fine enough that
/// two distinct draws essentially never collide within typical generator
/// bounding boxes, coarse enough that `DrawOracle::integer`'s `i64` range
/// never overflows at realistic bounds.
const COORDINATE_RESOLUTION: f64 = 1_000_000.0;

const MIN_CONTOUR_SIZE: usize = 3;
const MIN_CONVEX_CONTOUR_SIZE: usize = 3;
const MIN_STAR_CONTOUR_SIZE: usize = 3;

fn draw_coordinate(oracle: &mut dyn DrawOracle, lo: f64, hi: f64) -> GenResult<f64> {
    if lo > hi {
        return Err(GenError::configuration(format!(
            "empty coordinate range [{lo}, {hi}]"
        )));
    }
    let lo_i = (lo * COORDINATE_RESOLUTION).round() as i64;
    let hi_i = (hi * COORDINATE_RESOLUTION).round() as i64;
    let drawn = oracle.integer(lo_i, hi_i)?;
    Ok(drawn as f64 / COORDINATE_RESOLUTION)
}

fn draw_distinct_coordinates(
    oracle: &mut dyn DrawOracle,
    lo: f64,
    hi: f64,
    count: usize,
) -> GenResult<Vec<f64>> {
    let mut values = Vec::with_capacity(count);
    let mut attempts = 0usize;
    while values.len() < count {
        attempts += 1;
        if attempts > count * 64 + 1024 {
            return Err(GenError::exhaustion(
                "could not draw enough distinct coordinates in the given range",
            ));
        }
        let candidate = draw_coordinate(oracle, lo, hi)?;
        if !values.iter().any(|&v: &f64| v == candidate) {
            values.push(candidate);
        }
    }
    Ok(values)
}

fn draw_point(oracle: &mut dyn DrawOracle, x_range: (f64, f64), y_range: (f64, f64)) -> GenResult<Point> {
    Ok(Point::new(
        draw_coordinate(oracle, x_range.0, x_range.1)?,
        draw_coordinate(oracle, y_range.0, y_range.1)?,
    ))
}

fn draw_distinct_points(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    count: usize,
) -> GenResult<Vec<Point>> {
    let mut points = Vec::with_capacity(count);
    let mut attempts = 0usize;
    while points.len() < count {
        attempts += 1;
        if attempts > count * 64 + 1024 {
            return Err(GenError::exhaustion(
                "could not draw enough distinct points in the given bounding box",
            ));
        }
        let candidate = draw_point(oracle, x_range, y_range)?;
        if !points.contains(&candidate) {
            points.push(candidate);
        }
    }
    Ok(points)
}

/// Generates a single random point (spec §4.13 "gen_point").
pub fn gen_point(oracle: &mut dyn DrawOracle, x_range: (f64, f64), y_range: (f64, f64)) -> GenResult<Point> {
    draw_point(oracle, x_range, y_range)
}

/// Generates a segment with two distinct endpoints ("gen_segment").
pub fn gen_segment(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> GenResult<Segment> {
    let points = draw_distinct_points(oracle, x_range, y_range, 2)?;
    Ok(Segment::new(points[0], points[1]))
}

/// Generates an axis-aligned rectangle ("gen_box").
pub fn gen_box(oracle: &mut dyn DrawOracle, x_range: (f64, f64), y_range: (f64, f64)) -> GenResult<Contour> {
    let xs = draw_distinct_coordinates(oracle, x_range.0, x_range.1, 2)?;
    let ys = draw_distinct_coordinates(oracle, y_range.0, y_range.1, 2)?;
    let (x0, x1) = (xs[0].min(xs[1]), xs[0].max(xs[1]));
    let (y0, y1) = (ys[0].min(ys[1]), ys[0].max(ys[1]));
    Ok(Contour::new(vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]))
}

/// Same shape as [`gen_box`], named for callers that specifically want a
/// rectangular contour rather than a generic box value ("gen_rectangular_contour").
pub fn gen_rectangular_contour(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> GenResult<Contour> {
    gen_box(oracle, x_range, y_range)
}

/// Generates `min_size..=max_size` distinct points ("gen_multipoint").
pub fn gen_multipoint(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    min_size: usize,
    max_size: Option<usize>,
) -> GenResult<(Vec<Point>, Option<SizeWarning>)> {
    let (effective_min, warning) = validate_sizes(min_size, max_size, 0)?;
    let size = oracle.list_len(effective_min, max_size.unwrap_or(effective_min.max(1) * 4))?;
    Ok((draw_distinct_points(oracle, x_range, y_range, size)?, warning))
}

/// Generates a non-crossing, non-overlapping sequence of segments
/// ("gen_multisegment").
pub fn gen_multisegment(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    min_size: usize,
    max_size: Option<usize>,
) -> GenResult<(Vec<Segment>, Option<SizeWarning>)> {
    let (effective_min, warning) = validate_sizes(min_size, max_size, 1)?;
    let size = oracle.list_len(effective_min, max_size.unwrap_or(effective_min.max(1) * 4))?;

    let mut attempts = 0usize;
    loop {
        attempts += 1;
        let points = draw_distinct_points(oracle, x_range, y_range, size * 2)?;
        let segments: Vec<Segment> = points.chunks_exact(2).map(|pair| Segment::new(pair[0], pair[1])).collect();
        if validate_multisegment(&segments).is_ok() {
            return Ok((segments, warning.clone()));
        }
        if attempts > 256 {
            return Err(GenError::exhaustion(
                "could not draw a non-crossing, non-overlapping multisegment within the attempt budget",
            ));
        }
    }
}

/// Generates a simple (possibly concave) contour through `size` points
/// ("gen_contour"), via the χ-algorithm (module F).
pub fn gen_contour(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    min_size: usize,
    max_size: Option<usize>,
) -> GenResult<(Contour, Option<SizeWarning>)> {
    let (effective_min, warning) = validate_sizes(min_size, max_size, MIN_CONTOUR_SIZE)?;
    let size = oracle.list_len(effective_min, max_size.unwrap_or(effective_min.max(MIN_CONTOUR_SIZE) * 3))?;
    let points = draw_distinct_points(oracle, x_range, y_range, size)?;
    let mut mesh = Mesh::new();
    let vertices = to_vertex_sequence(&mut mesh, &points, size);
    if vertices.len() < MIN_CONTOUR_SIZE {
        return Err(GenError::exhaustion(
            "point set collapsed to fewer than 3 contour vertices",
        ));
    }
    Ok((Contour::new(vertices), warning))
}

/// Generates a strictly convex contour through exactly `xs.len()` x's and
/// `ys.len()` y's worth of coordinates ("gen_convex_contour"), via Valtr's
/// algorithm (module H).
pub fn gen_convex_contour(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    min_size: usize,
    max_size: Option<usize>,
) -> GenResult<(Contour, Option<SizeWarning>)> {
    let (effective_min, warning) = validate_sizes(min_size, max_size, MIN_CONVEX_CONTOUR_SIZE)?;
    let size = oracle.list_len(effective_min, max_size.unwrap_or(effective_min.max(MIN_CONVEX_CONTOUR_SIZE) * 3))?;
    let xs = draw_distinct_coordinates(oracle, x_range.0, x_range.1, size)?;
    let ys = draw_distinct_coordinates(oracle, y_range.0, y_range.1, size)?;
    let vertices = to_convex_vertex_sequence(oracle, &xs, &ys)?;
    Ok((Contour::new(vertices), warning))
}

/// Generates a contour guaranteed to have at least one reflex vertex
/// ("gen_concave_contour"): builds a convex contour over a larger point
/// budget, then runs it back through the χ-algorithm with a smaller target
/// size so the shrinkage forces concavity.
pub fn gen_concave_contour(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    min_size: usize,
    max_size: Option<usize>,
) -> GenResult<(Contour, Option<SizeWarning>)> {
    let (effective_min, warning) = validate_sizes(min_size.max(4), max_size, 4)?;
    let size = oracle.list_len(effective_min, max_size.unwrap_or(effective_min * 3))?;
    let points = draw_distinct_points(oracle, x_range, y_range, size + 1)?;
    let mut mesh = Mesh::new();
    let vertices = to_vertex_sequence(&mut mesh, &points, size);
    if vertices.len() < 4 {
        return Err(GenError::exhaustion(
            "point set could not be shrunk below its convex hull size",
        ));
    }
    Ok((Contour::new(vertices), warning))
}

/// Generates a star-shaped contour ("gen_star_contour"), via module I.
pub fn gen_star_contour(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    min_size: usize,
    max_size: Option<usize>,
) -> GenResult<(Contour, Option<SizeWarning>)> {
    let (effective_min, warning) = validate_sizes(min_size, max_size, MIN_STAR_CONTOUR_SIZE)?;
    let size = oracle.list_len(effective_min, max_size.unwrap_or(effective_min.max(MIN_STAR_CONTOUR_SIZE) * 3))?;
    let points = draw_distinct_points(oracle, x_range, y_range, size)?;
    let vertices = to_star_contour_vertices(&points);
    if vertices.len() < MIN_STAR_CONTOUR_SIZE {
        return Err(GenError::exhaustion(
            "point set collapsed to fewer than 3 star-contour vertices",
        ));
    }
    Ok((Contour::new(vertices), warning))
}

/// Generates a triangle ("gen_triangular_contour").
pub fn gen_triangular_contour(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> GenResult<Contour> {
    let points = draw_distinct_points(oracle, x_range, y_range, 3)?;
    let hull = convex_hull_strict(&points);
    if hull.len() != 3 {
        return Err(GenError::exhaustion("drawn points were collinear"));
    }
    Ok(Contour::new(hull))
}

/// Generates several pairwise-disjoint contours ("gen_multicontour").
///
/// Draws one shared pool of distinct points up front, then for each
/// requested size draws a sweep axis from the oracle, re-sorts the pool by
/// that axis only when it differs from the previous round's, and slices the
/// next `size` points off the front — advancing by `size` minus one when
/// the contour just built may share its extreme vertex with the next slice.
/// Grounded on `_core/factories.py::to_multicontour`'s `sorting_key_chooser`
/// / `can_touch_next_contour` bookkeeping.
pub fn gen_multicontour(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    contour_sizes: &[usize],
) -> GenResult<Vec<Contour>> {
    let total: usize = contour_sizes.iter().sum();
    let mut points = draw_distinct_points(oracle, x_range, y_range, total)?;

    let mut contours = Vec::with_capacity(contour_sizes.len());
    let mut prior_axis: Option<SortAxis> = None;
    for &size in contour_sizes {
        if points.len() < size {
            return Err(GenError::exhaustion(
                "ran out of the shared point pool while building a multicontour",
            ));
        }
        let axis = draw_sort_axis(oracle)?;
        if prior_axis != Some(axis) {
            sort_points_by_axis(&mut points, axis);
            prior_axis = Some(axis);
        }

        let slice: Vec<Point> = points[..size].to_vec();
        let mut mesh = Mesh::new();
        let vertices = to_vertex_sequence(&mut mesh, &slice, size);
        if vertices.len() < MIN_CONTOUR_SIZE {
            return Err(GenError::exhaustion(
                "point subset collapsed to fewer than 3 contour vertices",
            ));
        }
        let contour = Contour::new(vertices);
        let can_touch_next = can_touch_next_along(axis, &contour.segments());
        points.drain(..size - can_touch_next as usize);
        contours.push(contour);
    }
    validate_multicontour(&contours)?;
    Ok(contours)
}

/// Generates a polygon with holes ("gen_polygon"), via module G.
pub fn gen_polygon(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    border_size: usize,
    hole_sizes: &[usize],
) -> GenResult<Polygon> {
    let total = border_size + hole_sizes.iter().sum::<usize>();
    let points = draw_distinct_points(oracle, x_range, y_range, total)?;
    build_polygon_with_holes(oracle, &points, border_size, hole_sizes)
}

/// Generates several pairwise-disjoint polygons ("gen_multipolygon").
///
/// Draws one shared pool of x-coordinates up front, sorts it once, and
/// hands each polygon a contiguous slice (its x sub-range) to build from —
/// advancing the start of the next slice by one less than the current
/// polygon's point count when its border's leftmost edge is not itself
/// vertical, letting consecutive polygons share a vertex. Grounded on
/// `_core/base.py::to_multipolygons`'s shared, sorted `xs` pool and
/// `can_touch_next_polygon` bookkeeping.
pub fn gen_multipolygon(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    polygon_shapes: &[(usize, Vec<usize>)],
) -> GenResult<Vec<Polygon>> {
    let needed_counts: Vec<usize> = polygon_shapes
        .iter()
        .map(|(border_size, hole_sizes)| border_size + hole_sizes.iter().sum::<usize>())
        .collect();
    let total: usize = needed_counts.iter().sum();
    let mut xs = draw_distinct_coordinates(oracle, x_range.0, x_range.1, total)?;
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mut polygons = Vec::with_capacity(polygon_shapes.len());
    let mut start = 0usize;
    for (i, (border_size, hole_sizes)) in polygon_shapes.iter().enumerate() {
        let count = needed_counts[i];
        if start + count > xs.len() {
            return Err(GenError::exhaustion(
                "ran out of the shared x-coordinate pool while building a multipolygon",
            ));
        }
        let slice = &xs[start..start + count];
        let cell_x = (slice[0], slice[slice.len() - 1]);
        let polygon = gen_polygon(oracle, cell_x, y_range, *border_size, hole_sizes)?;
        let can_touch_next = !has_vertical_leftmost_segment(&polygon.border.segments());
        start += count - can_touch_next as usize;
        polygons.push(polygon);
    }
    validate_multipolygon(&polygons)?;
    Ok(polygons)
}

enum MixTask {
    Points(usize),
    Segments(usize),
    Polygon(usize, Vec<usize>),
}

impl MixTask {
    fn point_count(&self) -> usize {
        match self {
            MixTask::Points(n) => *n,
            MixTask::Segments(n) => *n * 2,
            MixTask::Polygon(border_size, hole_sizes) => border_size + hole_sizes.iter().sum::<usize>(),
        }
    }
}

/// Generates a heterogeneous [`Mix`] of points, segments and polygons
/// ("gen_mix").
///
/// Draws a shared, sorted pool of x-coordinates sized to the whole mix,
/// permutes the draw order of its parts via the oracle, and hands each part
/// a contiguous slice in that permuted order — advancing the pool by one
/// less than a part's point count when that part isn't immediately
/// followed by a multipoint part and its own extreme edge isn't itself
/// vertical, letting adjacent non-point parts share a vertex. Grounded on
/// `_core/base.py::to_mixes`'s `drawers_with_points_counts` permutation and
/// `can_touch_next_geometry` bookkeeping.
pub fn gen_mix(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    points_count: usize,
    segments_count: usize,
    polygon_shapes: &[(usize, Vec<usize>)],
) -> GenResult<Mix> {
    let mut tasks = Vec::new();
    if points_count > 0 {
        tasks.push(MixTask::Points(points_count));
    }
    if segments_count > 0 {
        tasks.push(MixTask::Segments(segments_count));
    }
    for (border_size, hole_sizes) in polygon_shapes {
        tasks.push(MixTask::Polygon(*border_size, hole_sizes.clone()));
    }

    let mut points = Vec::new();
    let mut segments = Vec::new();
    let mut polygons = Vec::new();

    if tasks.is_empty() {
        let mix = Mix { points, segments, polygons };
        validate_mix(&mix)?;
        return Ok(mix);
    }

    let total: usize = tasks.iter().map(MixTask::point_count).sum();
    let mut xs = draw_distinct_coordinates(oracle, x_range.0, x_range.1, total)?;
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let order = oracle.permutation(tasks.len())?;

    let mut start = 0usize;
    for (position, &task_index) in order.iter().enumerate() {
        let task = &tasks[task_index];
        let count = task.point_count();
        if start + count > xs.len() {
            return Err(GenError::exhaustion(
                "ran out of the shared x-coordinate pool while building a mix",
            ));
        }
        let slice = &xs[start..start + count];
        let cell_x = (slice[0], slice[slice.len() - 1]);

        let next_is_points = order
            .get(position + 1)
            .map(|&next| matches!(tasks[next], MixTask::Points(_)))
            .unwrap_or(true);

        let advance = match task {
            MixTask::Points(n) => {
                let (drawn, _) = gen_multipoint(oracle, cell_x, y_range, *n, Some(*n))?;
                points.extend(drawn);
                count
            }
            MixTask::Segments(n) => {
                let (drawn, _) = gen_multisegment(oracle, cell_x, y_range, *n, Some(*n))?;
                let can_touch_next = !next_is_points && !has_vertical_leftmost_segment(&drawn);
                segments.extend(drawn);
                count - can_touch_next as usize
            }
            MixTask::Polygon(border_size, hole_sizes) => {
                let polygon = gen_polygon(oracle, cell_x, y_range, *border_size, hole_sizes)?;
                let can_touch_next =
                    !next_is_points && !has_vertical_leftmost_segment(&polygon.border.segments());
                polygons.push(polygon);
                count - can_touch_next as usize
            }
        };
        start += advance;
    }

    let mix = Mix { points, segments, polygons };
    validate_mix(&mix)?;
    Ok(mix)
}

/// Samples `size` points guaranteed to have no three collinear
/// ("gen_points_in_general_position"), via module K.
pub fn gen_points_in_general_position(
    oracle: &mut dyn DrawOracle,
    x_range: (f64, f64),
    y_range: (f64, f64),
    min_size: usize,
) -> GenResult<Vec<Point>> {
    let span = min_size.max(1) * 8;
    let xs = draw_distinct_coordinates(oracle, x_range.0, x_range.1, span)?;
    let ys = draw_distinct_coordinates(oracle, y_range.0, y_range.1, span)?;
    to_points_in_general_position(oracle, &xs, &ys, min_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::StdRngOracle;

    #[test]
    fn gen_point_lands_in_the_requested_box() {
        let mut oracle = StdRngOracle::seed_from_u64(1);
        let p = gen_point(&mut oracle, (0.0, 10.0), (0.0, 10.0)).unwrap();
        assert!((0.0..=10.0).contains(&p.x));
        assert!((0.0..=10.0).contains(&p.y));
    }

    #[test]
    fn gen_segment_has_distinct_endpoints() {
        let mut oracle = StdRngOracle::seed_from_u64(2);
        let s = gen_segment(&mut oracle, (0.0, 10.0), (0.0, 10.0)).unwrap();
        assert_ne!(s.start, s.end);
    }

    #[test]
    fn gen_triangular_contour_has_three_vertices() {
        let mut oracle = StdRngOracle::seed_from_u64(3);
        let contour = gen_triangular_contour(&mut oracle, (0.0, 10.0), (0.0, 10.0)).unwrap();
        assert_eq!(contour.len(), 3);
    }

    #[test]
    fn gen_convex_contour_respects_size_bounds() {
        let mut oracle = StdRngOracle::seed_from_u64(4);
        let (contour, _) = gen_convex_contour(&mut oracle, (0.0, 100.0), (0.0, 100.0), 5, Some(8)).unwrap();
        assert!(contour.len() >= 3);
    }

    #[test]
    fn gen_polygon_produces_a_border_and_its_holes() {
        let mut oracle = StdRngOracle::seed_from_u64(5);
        let polygon = gen_polygon(&mut oracle, (0.0, 100.0), (0.0, 100.0), 4, &[4]).unwrap();
        assert_eq!(polygon.border.len(), 4);
        assert_eq!(polygon.holes.len(), 1);
    }

    #[test]
    fn gen_multicontour_produces_pairwise_disjoint_contours() {
        let mut oracle = StdRngOracle::seed_from_u64(6);
        let contours = gen_multicontour(&mut oracle, (0.0, 100.0), (0.0, 100.0), &[4, 4]).unwrap();
        assert_eq!(contours.len(), 2);
    }
}
