//! Brute-force segment index used to reject crossing/overlapping geometry
//! (spec §4.7, §4.12). Stands in for the original's `locus.segmental.Tree`
//! (a balanced nearest-segment structure); none of the example repos carry
//! an equivalent spatial index, and at generator scale a linear scan over
//! the segments accumulated so far is fast enough — this is a deliberate
//! simplification, noted in `DESIGN.md`.

use crate::predicates::{segments_relation, SegmentRelation};
use crate::types::Segment;

#[derive(Default)]
pub struct SegmentIndex {
    segments: Vec<Segment>,
}

impl SegmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn add_all(&mut self, segments: impl IntoIterator<Item = Segment>) {
        self.segments.extend(segments);
    }

    /// Does `segment` cross or overlap anything already indexed? A shared
    /// endpoint (`Touch`) is also treated as a conflict: this index backs
    /// disjointness checks between already-finalized contours, which must
    /// not share vertices either.
    pub fn conflicts_with(&self, segment: Segment) -> bool {
        self.segments
            .iter()
            .any(|&s| segments_relation(s, segment) != SegmentRelation::Disjoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn detects_a_crossing_segment() {
        let mut index = SegmentIndex::new();
        index.add(Segment::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0)));
        let crossing = Segment::new(Point::new(0.0, 2.0), Point::new(2.0, 0.0));
        assert!(index.conflicts_with(crossing));
    }

    #[test]
    fn allows_a_disjoint_segment() {
        let mut index = SegmentIndex::new();
        index.add(Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)));
        let disjoint = Segment::new(Point::new(10.0, 10.0), Point::new(11.0, 11.0));
        assert!(!index.conflicts_with(disjoint));
    }
}
