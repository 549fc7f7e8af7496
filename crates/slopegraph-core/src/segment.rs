use crate::error::{Error, Result};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// One observation's movement between two adjacent periods, in data space.
///
/// `observation` and the period positions `x1`/`x2` are 1-based; `x2` is
/// always `x1 + 1`. The struct stays in data coordinates so it can be
/// inspected, filtered, or re-scaled before any pixel mapping happens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub observation: usize,
    pub x1: usize,
    pub x2: usize,
    pub y1: f64,
    pub y2: f64,
}

/// Builds the full segment set for a table, row-major: all of observation
/// 1's segments first, then observation 2's, and so on.
///
/// A segment exists only where both adjacent cells are present; a missing
/// cell silently drops the segments on either side of it, which is how a
/// slopegraph renders gaps in the record. Duplicate coordinates are kept
/// here, deduplication is a drawing concern, not a data one.
pub fn build_segments(table: &Table) -> Result<Vec<Segment>> {
    let periods = table.periods();
    if periods < 2 {
        return Err(Error::NotEnoughPeriods { periods });
    }

    let mut segments = Vec::with_capacity(table.rows() * (periods - 1));
    for row in 0..table.rows() {
        for period in 0..periods - 1 {
            let (Some(y1), Some(y2)) = (table.value(row, period), table.value(row, period + 1))
            else {
                continue;
            };
            segments.push(Segment {
                observation: row + 1,
                x1: period + 1,
                x2: period + 2,
                y1,
                y2,
            });
        }
    }

    tracing::debug!(
        rows = table.rows(),
        periods,
        segments = segments.len(),
        "built segment set"
    );
    Ok(segments)
}
