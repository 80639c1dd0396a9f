//! Quad-edge mesh (spec §3, §4.2, module B).
//!
//! Purpose
//! - Topological planar subdivision supporting `splice`/`connect`/`delete`/
//!   `flip`, the substrate the Delaunay builder (module C), boundary
//!   traversal (module D) and the χ-algorithm (module F) all operate on.
//!
//! Why this design
//! - spec §9 names the implementation directly: "an arena of edge records
//!   indexed by stable IDs... `onext`/`rot` become `EdgeId` fields" — a
//!   `Vec`-backed arena of index-linked records, applied to the quad-edge's
//!   four-record cycle.
//! - The four-records-per-undirected-edge layout, the `splice`/`connect`/
//!   `delete`/`flip` bodies and the `onext` initialization in `make_edge`
//!   are grounded directly on `_core/subdivisional.py`'s `QuadEdge`
//!   (Guibas-Stolfi's reference algorithm), translated from its
//!   recursive-property style into explicit arena index arithmetic.
//!
//! Invariants
//! - I1: `rot(rot(rot(rot(e)))) == e` for every edge id ever handed out.
//! - I2: `splice` preserves the site/face permutation structure (asserted
//!   only in tests; the routine itself cannot detect a violation of its own
//!   precondition, matching spec §4.2 "Failure model").
//! - Deletion detaches an edge from both site rings but does not reclaim
//!   its slot; the whole arena drops at once when the mesh goes out of
//!   scope (spec §5).

use crate::types::Point;

/// A stable handle into a `Mesh`'s edge arena. Four consecutive `EdgeId`s
/// (returned together from `make_edge`) form one undirected edge: the
/// primal edge, its two rotational duals, and its reverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(u32);

struct EdgeRecord {
    /// Origin vertex. `None` for the two dual (rotated) records, which do
    /// not name a vertex (spec §3: "may be unset for rotational duals").
    start: Option<Point>,
    onext: EdgeId,
    rot: EdgeId,
}

/// Owns every edge record created during one triangulation's lifetime.
/// No two meshes alias edge ids; an `EdgeId` is only meaningful relative to
/// the `Mesh` that produced it.
#[derive(Default)]
pub struct Mesh {
    edges: Vec<EdgeRecord>,
}

impl Mesh {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    fn alloc(&mut self, start: Option<Point>) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(EdgeRecord {
            start,
            onext: id,
            rot: id,
        });
        id
    }

    fn rec(&self, e: EdgeId) -> &EdgeRecord {
        &self.edges[e.0 as usize]
    }

    fn rec_mut(&mut self, e: EdgeId) -> &mut EdgeRecord {
        &mut self.edges[e.0 as usize]
    }

    /// Rotational dual: the dual edge crossing `e` from its left face to its
    /// right face.
    pub fn rot(&self, e: EdgeId) -> EdgeId {
        self.rec(e).rot
    }

    /// `rot^3(e)`, i.e. `rot`'s inverse (since `rot^4 = id`).
    pub fn tor(&self, e: EdgeId) -> EdgeId {
        self.rot(self.rot(self.rot(e)))
    }

    /// Reverse of `e` (same undirected edge, opposite direction). "Sym".
    pub fn sym(&self, e: EdgeId) -> EdgeId {
        self.rot(self.rot(e))
    }

    /// Next edge counterclockwise around `e`'s origin. "Onext".
    pub fn onext(&self, e: EdgeId) -> EdgeId {
        self.rec(e).onext
    }

    /// Next edge clockwise around `e`'s origin. "Oprev" = `rot(onext(rot(e)))`.
    pub fn oprev(&self, e: EdgeId) -> EdgeId {
        self.rot(self.onext(self.rot(e)))
    }

    /// Next edge counterclockwise around `e`'s left face, starting from
    /// `e`'s destination. "Lnext" = `tor(onext(tor(e)))`... equivalently
    /// `rot(onext(rot^-1(e)))`.
    pub fn lnext(&self, e: EdgeId) -> EdgeId {
        self.rot(self.onext(self.tor(e)))
    }

    /// Previous edge around `e`'s left face. "Lprev" = `sym(onext(e))`.
    pub fn lprev(&self, e: EdgeId) -> EdgeId {
        self.sym(self.onext(e))
    }

    /// Next edge clockwise around `e`'s right face, from `e`'s destination.
    /// "Rprev" = `onext(sym(e))`. This is the walk the boundary traversal
    /// (module D) and the χ-algorithm use to follow the outer ring.
    pub fn rprev(&self, e: EdgeId) -> EdgeId {
        self.onext(self.sym(e))
    }

    /// "Rnext" = `tor(onext(rot(e)))`.
    pub fn rnext(&self, e: EdgeId) -> EdgeId {
        self.tor(self.onext(self.rot(e)))
    }

    pub fn origin(&self, e: EdgeId) -> Point {
        self.rec(e)
            .start
            .expect("origin() called on a rotational-dual edge record")
    }

    pub fn dest(&self, e: EdgeId) -> Point {
        self.origin(self.sym(e))
    }

    /// Allocates the 4-record cycle for a new undirected edge `a -> b` and
    /// returns the primal edge (origin `a`). Grounded on
    /// `QuadEdge.from_endpoints`.
    pub fn make_edge(&mut self, a: Point, b: Point) -> EdgeId {
        let e = self.alloc(Some(a));
        let rot = self.alloc(None);
        let sym = self.alloc(Some(b));
        let tor = self.alloc(None);

        self.rec_mut(e).rot = rot;
        self.rec_mut(rot).rot = sym;
        self.rec_mut(sym).rot = tor;
        self.rec_mut(tor).rot = e;

        // from_endpoints: result._left_from_start=result; opposite._left_from_start=opposite;
        // rotated._left_from_start=triple_rotated; triple_rotated._left_from_start=rotated.
        self.rec_mut(e).onext = e;
        self.rec_mut(sym).onext = sym;
        self.rec_mut(rot).onext = tor;
        self.rec_mut(tor).onext = rot;

        e
    }

    /// The single topological primitive: splices the origin rings of `a`
    /// and `b` together (or apart, if already joined). Grounded on
    /// `QuadEdge.splice`.
    pub fn splice(&mut self, a: EdgeId, b: EdgeId) {
        let alpha = self.rot(self.onext(a));
        let beta = self.rot(self.onext(b));

        let onext_a = self.onext(a);
        let onext_b = self.onext(b);
        self.rec_mut(a).onext = onext_b;
        self.rec_mut(b).onext = onext_a;

        let onext_alpha = self.onext(alpha);
        let onext_beta = self.onext(beta);
        self.rec_mut(alpha).onext = onext_beta;
        self.rec_mut(beta).onext = onext_alpha;
    }

    /// Inserts a new edge from `a.dest()` to `b.origin()`, with `lnext`
    /// going from `a` into `b` along the shared left face. Grounded on
    /// `QuadEdge.connect`.
    pub fn connect(&mut self, a: EdgeId, b: EdgeId) -> EdgeId {
        let e = self.make_edge(self.dest(a), self.origin(b));
        let a_lnext = self.lnext(a);
        self.splice(e, a_lnext);
        let sym_e = self.sym(e);
        self.splice(sym_e, b);
        e
    }

    /// Detaches `e` from both of its site rings. Grounded on
    /// `QuadEdge.delete`.
    pub fn delete(&mut self, e: EdgeId) {
        let oprev_e = self.oprev(e);
        self.splice(e, oprev_e);
        let sym_e = self.sym(e);
        let oprev_sym = self.oprev(sym_e);
        self.splice(sym_e, oprev_sym);
    }

    /// Re-hangs the diagonal `e` to connect the opposite pair of vertices of
    /// the quadrilateral formed by `e`'s two adjacent triangles. Only valid
    /// when that quadrilateral is strictly convex (§4.5); callers are
    /// responsible for checking `is_convex_quadrilateral_diagonal` first —
    /// misuse is a caller bug (spec §4.2 "Failure model"), not a recoverable
    /// error. Grounded on `QuadEdge.flip`.
    pub fn flip(&mut self, e: EdgeId) {
        let side = self.oprev(e);
        let opposite = self.sym(e);
        let opposite_side = self.oprev(opposite);

        self.splice(e, side);
        self.splice(opposite, opposite_side);
        let side_lnext = self.lnext(side);
        self.splice(e, side_lnext);
        let opposite_side_lnext = self.lnext(opposite_side);
        self.splice(opposite, opposite_side_lnext);

        let new_e_origin = self.dest(side);
        let new_opp_origin = self.dest(opposite_side);
        self.rec_mut(e).start = Some(new_e_origin);
        self.rec_mut(opposite).start = Some(new_opp_origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rot_has_order_four() {
        let mut mesh = Mesh::new();
        let e = mesh.make_edge(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let r4 = mesh.rot(mesh.rot(mesh.rot(mesh.rot(e))));
        assert_eq!(r4, e);
    }

    #[test]
    fn sym_swaps_origin_and_dest() {
        let mut mesh = Mesh::new();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let e = mesh.make_edge(a, b);
        assert_eq!(mesh.origin(e), a);
        assert_eq!(mesh.dest(e), b);
        let s = mesh.sym(e);
        assert_eq!(mesh.origin(s), b);
        assert_eq!(mesh.dest(s), a);
    }

    #[test]
    fn connect_links_two_edges_through_their_left_face() {
        let mut mesh = Mesh::new();
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(1.0, 1.0);
        let e1 = mesh.make_edge(a, b);
        let e2 = mesh.make_edge(b, c);
        mesh.splice(mesh.sym(e1), e2);
        let e3 = mesh.connect(e2, e1);
        assert_eq!(mesh.origin(e3), c);
        assert_eq!(mesh.dest(e3), a);
    }

    #[test]
    fn delete_detaches_an_isolated_edge_idempotently() {
        let mut mesh = Mesh::new();
        let e = mesh.make_edge(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        // An isolated edge is its own oprev; deleting it should not panic
        // and should leave rot^4 = id intact.
        mesh.delete(e);
        assert_eq!(mesh.rot(mesh.rot(mesh.rot(mesh.rot(e)))), e);
    }
}
