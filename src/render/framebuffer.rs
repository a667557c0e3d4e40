//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a bounds-checked view into a color buffer and the span-to-pixel
//! convention every filled polygon goes through.

use crate::fill::{Span, SpanSink};

/// Pixel columns covered by a span: `first..end`, end exclusive.
///
/// A pixel `x` is filled when `ceil(x_start) <= x < ceil(x_end)`. Two polygons
/// that share an edge compute the same intersection for it, so one ends
/// exactly where the other begins: no seam and no double write.
#[inline]
pub fn span_columns(x_start: f32, x_end: f32) -> (i32, i32) {
    (x_start.ceil() as i32, x_end.ceil() as i32)
}

/// A view into a color buffer.
///
/// Wraps a 1D slice with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass a buffer + dimensions together, for
/// example as the span sink of a polygon fill.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from a buffer slice and dimensions.
    ///
    /// # Panics
    /// Panics in debug builds if the buffer length doesn't match width * height
    pub fn new(color_buffer: &'a mut [u32], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            (width * height) as usize,
            "Color buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set a pixel. Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.color_buffer[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Fill pixels `x_first..x_end` of row `y`, clipped to the buffer.
    #[inline]
    pub fn fill_scanline(&mut self, y: i32, x_first: i32, x_end: i32, color: u32) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x_first = x_first.max(0);
        let x_end = x_end.min(self.width as i32);
        if x_first >= x_end {
            return;
        }
        let row = (y as u32 * self.width) as usize;
        self.color_buffer[row + x_first as usize..row + x_end as usize].fill(color);
    }
}

impl SpanSink for FrameBuffer<'_> {
    #[inline]
    fn emit_span(&mut self, span: Span) {
        let (first, end) = span_columns(span.x_start, span.x_end);
        self.fill_scanline(span.y, first, end, span.color.to_argb());
    }
}
