//! CPU rendering of filled quads, handles and outlines.

mod framebuffer;
mod renderer;

pub use framebuffer::{span_columns, FrameBuffer};
pub use renderer::Renderer;
