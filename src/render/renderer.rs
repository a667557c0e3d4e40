//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the color buffer and implements
//! the drawing operations the editor needs besides polygon fill: vertex
//! handles and outline frames.

use super::framebuffer::FrameBuffer;
use crate::colors;
use crate::math::vec2::Vec2;

pub struct Renderer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = (y as u32 * self.width + x as u32) as usize;
            self.color_buffer[index] = color;
        }
    }

    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.color_buffer[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Packed ARGB8888 pixels, row-major.
    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Draws a filled circle: a vertex handle.
    ///
    /// Covers every pixel whose center lies within `radius` of `center`.
    pub fn draw_handle(&mut self, center: Vec2, radius: f32, color: u32) {
        let r2 = radius * radius;
        let x_min = (center.x - radius).floor() as i32;
        let x_max = (center.x + radius).ceil() as i32;
        let y_min = (center.y - radius).floor() as i32;
        let y_max = (center.y + radius).ceil() as i32;

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let p = Vec2::new(x as f32, y as f32);
                if p.distance_squared(center) <= r2 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draws the closed outline through `points`.
    pub fn draw_outline(&mut self, points: &[Vec2], color: u32) {
        for (i, p0) in points.iter().enumerate() {
            let p1 = points[(i + 1) % points.len()];
            self.draw_line_bresenham(
                p0.x.round() as i32,
                p0.y.round() as i32,
                p1.x.round() as i32,
                p1.y.round() as i32,
                color,
            );
        }
    }

    /// Draws a line between two points using Bresenham's line algorithm.
    ///
    /// Bresenham's algorithm determines which pixels to illuminate using only
    /// integer arithmetic. It tracks an "error" term that represents the
    /// distance between the ideal line and the current pixel; for each step
    /// along the major axis it decides whether to also step along the minor
    /// axis based on the accumulated error.
    pub fn draw_line_bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        // Positive error favors x movement, negative favors y.
        let mut err = dx - dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;

            // Both conditions can hold, which is a diagonal step.
            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }
            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    /// Get a mutable FrameBuffer view into the color buffer.
    pub fn frame_buffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.color_buffer, self.width, self.height)
    }
}
