//! Scanline polygon fill.
//!
//! This module converts a closed loop of screen-space vertices into horizontal
//! spans using the edge-table / active-edge-table algorithm.
//!
//! # Algorithm Overview
//!
//! 1. **Build the edge table**: every non-horizontal boundary segment becomes
//!    an [`Edge`] anchored at the row of its smaller-y endpoint. Each edge
//!    records its x-intersection `xi`, its inverse slope `dx` and the last
//!    row `ymax` on which it is active.
//! 2. **Sweep** rows from the polygon's minimum to maximum y, keeping the
//!    active edges in a list sorted by `xi`.
//! 3. **Pair** active edges even-odd: `(1st, 2nd)`, `(3rd, 4th)`, ... Every
//!    pair is one span of the polygon on that row.
//!
//! ```text
//!   row 0   *-----------*          edges from the top vertices activate
//!           |###########|
//!   row 5   |####*------*          pass-through vertex, counted once
//!           |####|
//!   row 9   |####|                 last row of the flat bottom
//!   row 10  *----*                 excluded: the bottom is horizontal
//! ```
//!
//! # Inverse Slope Method
//!
//! Rather than intersecting every edge with every scanline, each active edge
//! carries `dx = (x_end - x_start) / (y_end - y_start)` and moves by `dx`
//! per row. Edges can cross, so after each step the active list is re-sorted
//! with an insertion pass, which is linear when nothing crossed.
//!
//! # Boundaries
//!
//! The engine reads vertices through [`VertexSource`] and writes through
//! [`SpanSink`]. It never owns vertex data and never touches a drawing
//! surface.
//!
//! # References
//!
//! - Foley, van Dam et al., "Computer Graphics: Principles and Practice"

mod active;
mod edge;
mod scan;

pub use edge::{Edge, EdgeId, EdgeTable, MAX_ROWS};
pub use scan::ScanConverter;

use std::fmt;

use log::trace;

use crate::colors::Rgb;
use crate::math::vec2::Vec2;

/// Read access to the vertices a vertex loop refers to.
pub trait VertexSource {
    /// Number of addressable vertices. Valid indices are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Screen-space position of a vertex.
    fn position(&self, index: usize) -> Vec2;

    /// Color of a vertex.
    fn color(&self, index: usize) -> Rgb;
}

/// One horizontal run of a filled polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub y: i32,
    pub x_start: f32,
    pub x_end: f32,
    pub color: Rgb,
}

/// Receives spans in row-ascending, left-to-right order.
pub trait SpanSink {
    fn emit_span(&mut self, span: Span);
}

impl<F> SpanSink for F
where
    F: FnMut(Span),
{
    #[inline]
    fn emit_span(&mut self, span: Span) {
        self(span)
    }
}

/// Why a vertex loop was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopDefect {
    /// Fewer than three vertices.
    TooShort { len: usize },
    /// A loop entry does not address a vertex.
    IndexOutOfRange { index: usize, vertex_count: usize },
    /// A vertex position is NaN or infinite.
    NonFinite { index: usize },
    /// The loop covers more than [`MAX_ROWS`] scanline rows.
    RowRangeTooLarge { rows: i64 },
}

impl fmt::Display for LoopDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopDefect::TooShort { len } => {
                write!(f, "loop has {} vertices, at least 3 are required", len)
            }
            LoopDefect::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "vertex index {} is out of range for {} vertices",
                index, vertex_count
            ),
            LoopDefect::NonFinite { index } => {
                write!(f, "vertex {} has a non-finite position", index)
            }
            LoopDefect::RowRangeTooLarge { rows } => write!(
                f,
                "loop spans {} scanline rows, at most {} are supported",
                rows, MAX_ROWS
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillError {
    InvalidLoop(LoopDefect),
}

impl fmt::Display for FillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillError::InvalidLoop(defect) => write!(f, "invalid vertex loop: {}", defect),
        }
    }
}

impl std::error::Error for FillError {}

impl From<LoopDefect> for FillError {
    fn from(defect: LoopDefect) -> Self {
        FillError::InvalidLoop(defect)
    }
}

/// Checks that `vertex_loop` can be swept at all.
///
/// Self-intersecting and all-horizontal loops pass; they fill by even-odd
/// parity or not at all.
pub fn validate_loop<V>(source: &V, vertex_loop: &[usize]) -> Result<(), FillError>
where
    V: VertexSource + ?Sized,
{
    if vertex_loop.len() < 3 {
        return Err(LoopDefect::TooShort {
            len: vertex_loop.len(),
        }
        .into());
    }

    let vertex_count = source.vertex_count();
    for &index in vertex_loop {
        if index >= vertex_count {
            return Err(LoopDefect::IndexOutOfRange {
                index,
                vertex_count,
            }
            .into());
        }
        if !source.position(index).is_finite() {
            return Err(LoopDefect::NonFinite { index }.into());
        }
    }

    let rows = vertex_loop
        .iter()
        .map(|&index| edge::snap_row(source.position(index).y));
    let (y_min, y_max) = rows.fold((i32::MAX, i32::MIN), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    edge::check_row_span(y_min, y_max)?;
    Ok(())
}

/// Fills a polygon with the color of its first vertex.
pub fn fill_polygon<V, S>(source: &V, vertex_loop: &[usize], sink: &mut S) -> Result<(), FillError>
where
    V: VertexSource + ?Sized,
    S: SpanSink + ?Sized,
{
    validate_loop(source, vertex_loop)?;
    let color = source.color(vertex_loop[0]);
    sweep(source, vertex_loop, color, sink)
}

/// Fills a polygon with an explicit color.
pub fn fill_polygon_with_color<V, S>(
    source: &V,
    vertex_loop: &[usize],
    color: Rgb,
    sink: &mut S,
) -> Result<(), FillError>
where
    V: VertexSource + ?Sized,
    S: SpanSink + ?Sized,
{
    validate_loop(source, vertex_loop)?;
    sweep(source, vertex_loop, color, sink)
}

fn sweep<V, S>(
    source: &V,
    vertex_loop: &[usize],
    color: Rgb,
    sink: &mut S,
) -> Result<(), FillError>
where
    V: VertexSource + ?Sized,
    S: SpanSink + ?Sized,
{
    let table = EdgeTable::build(source, vertex_loop)?;
    let mut scan = ScanConverter::new(table);
    let mut emitted = 0usize;

    scan.run(|y, x_start, x_end| {
        emitted += 1;
        sink.emit_span(Span {
            y,
            x_start,
            x_end,
            color,
        });
    });

    trace!("filled loop {:?}: {} spans", vertex_loop, emitted);
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Bare vertex positions; vertex `i` has color `(i, 0, 0)`.
    pub(crate) struct Points(Vec<Vec2>);

    impl Points {
        pub(crate) fn new(points: &[(f32, f32)]) -> Self {
            Self(points.iter().map(|&p| Vec2::from(p)).collect())
        }
    }

    impl VertexSource for Points {
        fn vertex_count(&self) -> usize {
            self.0.len()
        }

        fn position(&self, index: usize) -> Vec2 {
            self.0[index]
        }

        fn color(&self, index: usize) -> Rgb {
            Rgb::new(index as u8, 0, 0)
        }
    }

    fn spans_of(points: &[(f32, f32)]) -> Vec<Span> {
        let source = Points::new(points);
        let vertex_loop: Vec<usize> = (0..points.len()).collect();
        let mut spans = Vec::new();
        fill_polygon(&source, &vertex_loop, &mut |span: Span| spans.push(span)).unwrap();
        spans
    }

    fn rows(spans: &[Span]) -> Vec<i32> {
        spans.iter().map(|s| s.y).collect()
    }

    #[test]
    fn test_unit_square() {
        let spans = spans_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

        assert_eq!(rows(&spans), (0..=9).collect::<Vec<_>>());
        for span in &spans {
            assert_eq!(span.x_start, 0.0);
            assert_eq!(span.x_end, 10.0);
        }
    }

    #[test]
    fn test_fill_color_is_first_vertex_color() {
        let source = Points::new(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let mut spans = Vec::new();
        fill_polygon(&source, &[2, 3, 0, 1], &mut |span: Span| spans.push(span)).unwrap();

        assert!(!spans.is_empty());
        assert!(spans.iter().all(|s| s.color == Rgb::new(2, 0, 0)));
    }

    #[test]
    fn test_explicit_color() {
        let source = Points::new(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
        let mut spans = Vec::new();
        fill_polygon_with_color(&source, &[0, 1, 2], Rgb::RED, &mut |span: Span| spans.push(span))
            .unwrap();

        assert!(spans.iter().all(|s| s.color == Rgb::RED));
    }

    #[test]
    fn test_convex_quad_one_span_per_inner_row() {
        let spans = spans_of(&[(0.0, 0.0), (20.0, 5.0), (15.0, 30.0), (2.0, 18.0)]);

        for y in 1..30 {
            let count = spans.iter().filter(|s| s.y == y).count();
            assert_eq!(count, 1, "row {}", y);
        }
        assert!(spans.iter().all(|s| (0..=30).contains(&s.y)));
    }

    #[test]
    fn test_spans_ordered() {
        let spans = spans_of(&[
            (0.0, 0.0),
            (30.0, 0.0),
            (30.0, 20.0),
            (20.0, 20.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 20.0),
            (0.0, 20.0),
        ]);

        for pair in spans.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(a.y <= b.y);
            if a.y == b.y {
                assert!(a.x_end <= b.x_start);
            }
        }
        assert!(spans.iter().all(|s| s.x_start <= s.x_end));
    }

    #[test]
    fn test_concave_notch() {
        let spans = spans_of(&[
            (0.0, 0.0),
            (30.0, 0.0),
            (30.0, 20.0),
            (20.0, 20.0),
            (20.0, 10.0),
            (10.0, 10.0),
            (10.0, 20.0),
            (0.0, 20.0),
        ]);

        let row = |y: i32| -> Vec<(f32, f32)> {
            spans
                .iter()
                .filter(|s| s.y == y)
                .map(|s| (s.x_start, s.x_end))
                .collect()
        };
        assert_eq!(row(0), vec![(0.0, 30.0)]);
        assert_eq!(row(9), vec![(0.0, 30.0)]);
        assert_eq!(row(10), vec![(0.0, 10.0), (20.0, 30.0)]);
        assert_eq!(row(19), vec![(0.0, 10.0), (20.0, 30.0)]);
        assert!(row(20).is_empty());
    }

    #[test]
    fn test_shared_edge_tiles_exactly() {
        let source = Points::new(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (12.0, 10.0),
            (0.0, 10.0),
            (20.0, 0.0),
            (20.0, 10.0),
        ]);
        let mut left = Vec::new();
        let mut right = Vec::new();
        fill_polygon(&source, &[0, 1, 2, 3], &mut |s: Span| left.push(s)).unwrap();
        fill_polygon(&source, &[1, 4, 5, 2], &mut |s: Span| right.push(s)).unwrap();

        assert_eq!(rows(&left), (0..=9).collect::<Vec<_>>());
        assert_eq!(rows(&right), rows(&left));
        for (l, r) in left.iter().zip(&right) {
            assert_eq!(l.x_end, r.x_start, "seam or overlap on row {}", l.y);
        }
        assert_relative_eq!(left[5].x_end, 11.0, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_height_edge_matches_triangle() {
        let with_extra = spans_of(&[(0.0, 0.0), (10.0, 10.0), (5.0, 10.0), (0.0, 10.0)]);
        let triangle = spans_of(&[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

        assert_eq!(with_extra, triangle);
        assert_eq!(rows(&triangle), (0..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_idempotent() {
        let points = [(3.0, 1.0), (17.0, 4.0), (13.0, 22.0), (1.0, 15.0)];
        assert_eq!(spans_of(&points), spans_of(&points));
    }

    #[test]
    fn test_all_horizontal_emits_nothing() {
        let spans = spans_of(&[(0.0, 5.0), (10.0, 5.0), (20.0, 5.0)]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_rejects_short_loop() {
        let source = Points::new(&[(0.0, 0.0), (1.0, 1.0)]);
        let err = fill_polygon(&source, &[0, 1], &mut |_: Span| panic!("span emitted")).unwrap_err();
        assert_eq!(err, FillError::InvalidLoop(LoopDefect::TooShort { len: 2 }));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let source = Points::new(&[(0.0, 0.0), (1.0, 1.0), (0.0, 2.0)]);
        let err = fill_polygon(&source, &[0, 1, 7], &mut |_: Span| panic!("span emitted")).unwrap_err();
        assert_eq!(
            err,
            FillError::InvalidLoop(LoopDefect::IndexOutOfRange {
                index: 7,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_rejects_non_finite_vertex() {
        let source = Points::new(&[(0.0, 0.0), (f32::NAN, 1.0), (0.0, 2.0)]);
        let err = fill_polygon(&source, &[0, 1, 2], &mut |_: Span| panic!("span emitted")).unwrap_err();
        assert_eq!(err, FillError::InvalidLoop(LoopDefect::NonFinite { index: 1 }));
        assert_eq!(
            err.to_string(),
            "invalid vertex loop: vertex 1 has a non-finite position"
        );
    }

    #[test]
    fn test_rejects_loop_taller_than_row_limit() {
        let source = Points::new(&[(0.0, -2.0e9), (10.0, 2.0e9), (0.0, 2.0e9)]);
        let err = fill_polygon(&source, &[0, 1, 2], &mut |_: Span| panic!("span emitted")).unwrap_err();
        assert!(matches!(
            err,
            FillError::InvalidLoop(LoopDefect::RowRangeTooLarge { rows }) if rows > MAX_ROWS
        ));

        // Saturated rows from huge coordinates are rejected the same way.
        let source = Points::new(&[(0.0, 0.0), (10.0, 3.0e9), (0.0, 3.0e9)]);
        assert!(fill_polygon(&source, &[0, 1, 2], &mut |_: Span| {}).is_err());
    }

    #[test]
    fn test_tallest_allowed_loop_fills() {
        let bottom = (MAX_ROWS - 1) as f32;
        let source = Points::new(&[(0.0, 0.0), (4.0, 0.0), (4.0, bottom), (0.0, bottom)]);
        let mut count = 0usize;
        fill_polygon(&source, &[0, 1, 2, 3], &mut |_: Span| count += 1).unwrap();
        assert_eq!(count, (MAX_ROWS - 1) as usize);
    }
}
