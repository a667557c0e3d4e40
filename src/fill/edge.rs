//! Edge records and the row-bucketed edge table.
//!
//! The edge table (the "NET" of the classic algorithm) holds every
//! non-horizontal boundary segment of one polygon, grouped by the scanline row
//! at which the segment becomes active. It is built once per fill call and
//! handed to the [`ScanConverter`](super::ScanConverter), which owns it from
//! then on.
//!
//! # Shared-vertex rule
//!
//! Every vertex of a closed loop is the endpoint of two edges. When the sweep
//! line passes through a vertex, the even-odd pairing only stays correct if
//! that vertex is counted the right number of times:
//!
//! ```text
//!   pass-through (count once)        local extremum (count twice)
//!
//!        \                                 \      /
//!         \  ymax = y - 1                   \    /   ymax = y on both
//!          v ------------ row y              \  /
//!         /  next edge starts here            v ---- row y
//!        /
//! ```
//!
//! The edge ending at a pass-through vertex gives up its last row, so the
//! vertex row is crossed only by the edge that starts there. At a local
//! maximum both edges keep the row and contribute a zero-width pair. A
//! horizontal neighbor counts as "continuing", which makes flat bottoms
//! exclusive: the square `(0,0) (10,0) (10,10) (0,10)` covers rows `0..=9`.

use log::trace;

use super::{LoopDefect, VertexSource};

/// Index of an [`Edge`] inside the edge array of one fill call.
pub type EdgeId = usize;

/// One non-horizontal polygon boundary segment, as seen by the sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// X-intersection with the current scanline.
    pub xi: f32,
    /// Change of `xi` per scanline (inverse slope).
    pub dx: f32,
    /// Last row, inclusive, on which the edge is active.
    pub ymax: i32,
    pub id: EdgeId,
}

/// Most scanline rows a single loop may span, top and bottom rows included.
///
/// The edge table keeps one bucket per row, so taller loops are rejected
/// before anything is allocated.
pub const MAX_ROWS: i64 = 1 << 20;

/// Snaps a screen-space y coordinate to its scanline row.
///
/// Saturates at the `i32` range; such loops fail [`check_row_span`].
#[inline]
pub(crate) fn snap_row(y: f32) -> i32 {
    y.round() as i32
}

/// Rejects row ranges taller than [`MAX_ROWS`].
pub(crate) fn check_row_span(y_min: i32, y_max: i32) -> Result<usize, LoopDefect> {
    let rows = i64::from(y_max) - i64::from(y_min) + 1;
    if rows > MAX_ROWS {
        return Err(LoopDefect::RowRangeTooLarge { rows });
    }
    Ok(rows as usize)
}

/// Edges of one polygon, bucketed by the row at which they activate.
#[derive(Clone, Debug)]
pub struct EdgeTable {
    pub(crate) y_min: i32,
    pub(crate) y_max: i32,
    pub(crate) edges: Vec<Edge>,
    pub(crate) buckets: Vec<Vec<EdgeId>>,
}

impl EdgeTable {
    /// Builds the table for a closed vertex loop.
    ///
    /// Only the row span is checked here; horizontal pairs are skipped and
    /// any other pair produces an edge. Callers that need full validation go
    /// through [`fill_polygon`](super::fill_polygon).
    pub fn build<V>(source: &V, vertex_loop: &[usize]) -> Result<Self, LoopDefect>
    where
        V: VertexSource + ?Sized,
    {
        let points: Vec<(f32, i32)> = vertex_loop
            .iter()
            .map(|&index| {
                let p = source.position(index);
                (p.x, snap_row(p.y))
            })
            .collect();

        let y_min = points.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let y_max = points.iter().map(|&(_, y)| y).max().unwrap_or(0);
        let rows = check_row_span(y_min, y_max)?;

        let mut table = Self {
            y_min,
            y_max,
            edges: Vec::with_capacity(points.len()),
            buckets: vec![Vec::new(); rows],
        };

        let n = points.len();
        for i in 0..n {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % n];
            let (_, y_before) = points[(i + n - 1) % n];
            let (_, y_after) = points[(i + 2) % n];

            if y0 == y1 {
                continue;
            }

            let dx = (x1 - x0) / (y1 - y0) as f32;
            let (xi, anchor, ymax) = if y1 > y0 {
                // Upper endpoint is the second point; its neighbor follows it.
                let ymax = if y_after >= y1 { y1 - 1 } else { y1 };
                (x0, y0, ymax)
            } else {
                // Upper endpoint is the first point; its neighbor precedes it.
                let ymax = if y_before >= y0 { y0 - 1 } else { y0 };
                (x1, y1, ymax)
            };

            table.push(anchor, xi, dx, ymax);
        }

        trace!(
            "edge table: rows {}..={}, {} edges from {} vertices",
            table.y_min,
            table.y_max,
            table.edges.len(),
            n
        );

        Ok(table)
    }

    fn push(&mut self, row: i32, xi: f32, dx: f32, ymax: i32) {
        let id = self.edges.len();
        self.edges.push(Edge { xi, dx, ymax, id });
        self.buckets[(row - self.y_min) as usize].push(id);
    }

    pub fn y_min(&self) -> i32 {
        self.y_min
    }

    pub fn y_max(&self) -> i32 {
        self.y_max
    }

    /// Number of scanline rows the table spans.
    pub fn row_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge ids that activate at absolute row `y`. Empty outside the table.
    pub fn bucket(&self, y: i32) -> &[EdgeId] {
        if y < self.y_min || y > self.y_max {
            return &[];
        }
        &self.buckets[(y - self.y_min) as usize]
    }
}
