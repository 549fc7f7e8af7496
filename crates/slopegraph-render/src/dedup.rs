use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use slopegraph_core::Segment;

/// Hashable identity of a segment's geometry. The observation index is not
/// part of the key: two observations tracing the same coordinates are the
/// same stroke on screen.
///
/// Endpoint values go in as raw bits with `-0.0` folded into `0.0`; table
/// validation already rejects non-finite cells, so bit equality is exact
/// value equality here. Anything that differs in the last ulp stays a
/// distinct stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SegmentKey {
    x1: usize,
    x2: usize,
    y1: u64,
    y2: u64,
}

fn value_bits(v: f64) -> u64 {
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}

impl SegmentKey {
    fn of(segment: &Segment) -> Self {
        Self {
            x1: segment.x1,
            x2: segment.x2,
            y1: value_bits(segment.y1),
            y2: value_bits(segment.y2),
        }
    }
}

/// Collapses exact coordinate duplicates, keeping the first occurrence of
/// each geometry in input order. The surviving segment carries its original
/// observation index, which is what style resolution keys on.
pub fn draw_set(segments: &[Segment]) -> Vec<Segment> {
    let mut seen: IndexMap<SegmentKey, Segment, FxBuildHasher> =
        IndexMap::with_capacity_and_hasher(segments.len(), FxBuildHasher);
    for segment in segments {
        seen.entry(SegmentKey::of(segment)).or_insert(*segment);
    }
    if seen.len() != segments.len() {
        tracing::debug!(
            input = segments.len(),
            drawn = seen.len(),
            "collapsed duplicate segments"
        );
    }
    seen.into_values().collect()
}
