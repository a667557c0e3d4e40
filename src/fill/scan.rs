//! The per-scanline sweep.

use super::active::ActiveEdgeList;
use super::edge::{Edge, EdgeId, EdgeTable};

/// Sweeps an [`EdgeTable`] from its first to its last row.
///
/// Each row runs four steps in a fixed order:
///
/// 1. insert the edges whose bucket is this row,
/// 2. emit one span per consecutive pair of active edges,
/// 3. drop the edges whose last row is this row,
/// 4. advance the survivors by their inverse slope and re-sort.
///
/// Emitting before removal is what lets an edge contribute to its `ymax` row.
pub struct ScanConverter {
    y: i32,
    y_min: i32,
    y_max: i32,
    edges: Vec<Edge>,
    buckets: Vec<Vec<EdgeId>>,
    active: ActiveEdgeList,
}

impl ScanConverter {
    pub fn new(table: EdgeTable) -> Self {
        let EdgeTable {
            y_min,
            y_max,
            edges,
            buckets,
        } = table;
        let active = ActiveEdgeList::new(edges.len());

        Self {
            y: y_min,
            y_min,
            y_max,
            edges,
            buckets,
            active,
        }
    }

    /// The row the next call to [`step`](Self::step) will process.
    pub fn current_row(&self) -> i32 {
        self.y
    }

    pub fn is_finished(&self) -> bool {
        self.y > self.y_max
    }

    /// Processes one row, calling `emit(y, x_start, x_end)` for each span.
    ///
    /// Returns `false` without doing anything once the sweep is past the last row.
    pub fn step<F>(&mut self, mut emit: F) -> bool
    where
        F: FnMut(i32, f32, f32),
    {
        if self.is_finished() {
            return false;
        }
        let y = self.y;

        for &id in &self.buckets[(y - self.y_min) as usize] {
            self.active.insert(&self.edges, id);
        }

        for (x_start, x_end) in self.active.pairs(&self.edges) {
            emit(y, x_start, x_end);
        }

        self.active.remove_expired(&self.edges, y);
        if !self.active.is_empty() {
            self.active.advance(&mut self.edges);
            debug_assert!(self.active.is_sorted(&self.edges));
        }

        self.y += 1;
        true
    }

    /// Runs the sweep to completion.
    pub fn run<F>(&mut self, mut emit: F)
    where
        F: FnMut(i32, f32, f32),
    {
        while self.step(&mut emit) {}
    }

    /// Current `xi` of every active edge, head to tail.
    pub fn active_intersections(&self) -> Vec<f32> {
        self.active.iter().map(|id| self.edges[id].xi).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::tests::Points;

    fn converter(points: &[(f32, f32)]) -> ScanConverter {
        let source = Points::new(points);
        let vertex_loop: Vec<usize> = (0..points.len()).collect();
        ScanConverter::new(EdgeTable::build(&source, &vertex_loop).unwrap())
    }

    fn assert_sorted_every_row(mut scan: ScanConverter) {
        while scan.step(|_, _, _| {}) {
            let xs = scan.active_intersections();
            assert!(
                xs.windows(2).all(|w| w[0] <= w[1]),
                "unsorted before row {}: {:?}",
                scan.current_row(),
                xs
            );
        }
    }

    #[test]
    fn test_runs_every_row_once() {
        let mut scan = converter(&[(0.0, 3.0), (6.0, 3.0), (6.0, 8.0), (0.0, 8.0)]);
        let mut rows = Vec::new();
        scan.run(|y, _, _| rows.push(y));

        assert_eq!(rows, vec![3, 4, 5, 6, 7]);
        assert!(scan.is_finished());
        assert!(!scan.step(|_, _, _| panic!("finished sweep emitted a span")));
    }

    #[test]
    fn test_sort_invariant_with_crossing_edges() {
        // Bow tie: the two slanted edges cross at row 5.
        assert_sorted_every_row(converter(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]));
    }

    #[test]
    fn test_sort_invariant_on_pentagram() {
        assert_sorted_every_row(converter(&[
            (50.0, 0.0),
            (79.0, 90.0),
            (2.0, 35.0),
            (98.0, 35.0),
            (21.0, 90.0),
        ]));
    }

    #[test]
    fn test_crossing_edges_swap_sides() {
        let mut scan = converter(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        let mut spans = Vec::new();
        scan.run(|y, a, b| spans.push((y, a, b)));

        let row = |row: i32| -> Vec<(f32, f32)> {
            spans
                .iter()
                .filter(|&&(y, _, _)| y == row)
                .map(|&(_, a, b)| (a, b))
                .collect()
        };

        assert_eq!(row(2), vec![(0.0, 2.0), (8.0, 10.0)]);
        assert_eq!(row(5), vec![(0.0, 5.0), (5.0, 10.0)]);
        assert_eq!(row(8), vec![(0.0, 2.0), (8.0, 10.0)]);
    }
}
