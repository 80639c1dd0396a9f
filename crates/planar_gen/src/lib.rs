//! Randomized generation of planar geometric objects for property-based
//! test frameworks.
//!
//! Module map mirrors the design's component table:
//! - `predicates` (A), `mesh` (B), `delaunay` (C), `boundary` (D): the
//!   geometric substrate — orientation/incircle/segment predicates, a
//!   quad-edge mesh, a divide-and-conquer Delaunay triangulator, and its
//!   boundary walk.
//! - `compress` (E), `diagonal` (E₁), `chi` (F): the collinear-vertex
//!   compressor, the convex-quadrilateral-diagonal predicate, and the
//!   central χ-algorithm that turns a triangulated point set into a simple
//!   polygon of a requested size.
//! - `polygon_holes` (G), `valtr` (H), `star` (I), `hull` (J),
//!   `general_position` (K): higher-level shape builders — polygons with
//!   holes, strictly convex polygons, star-shaped polygons, convex hulls,
//!   and points guaranteed to be in general position.
//! - `compose` (L): the disjointness guard and multi-part composers
//!   (multicontour, multipolygon, multisegment, mix).
//! - `gen` (M): the public entry points a property-testing host calls.
//!
//! `oracle`, `error`, `types` are the crate's ambient layer: the injected
//! randomness seam, the error/warning taxonomy, and the shared geometric
//! value types everything else is expressed in terms of.

pub mod boundary;
pub mod chi;
pub mod compose;
pub mod compress;
pub mod delaunay;
pub mod diagonal;
pub mod error;
pub mod general_position;
pub mod gen;
pub mod hull;
pub mod mesh;
pub mod oracle;
pub mod polygon_holes;
pub mod predicates;
pub mod segment_index;
pub mod star;
pub mod types;
pub mod valtr;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{validate_sizes, GenError, GenResult, SizeWarning};
    pub use crate::gen::*;
    pub use crate::oracle::{DrawOracle, StdRngOracle};
    pub use crate::types::{Contour, Mix, Point, Polygon, Segment, Shape};
}
