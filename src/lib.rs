//! A scanline polygon-fill engine and a small quad-mesh editor built on it.
//!
//! Polygons are closed loops of indices into a shared vertex table. The fill
//! engine sweeps each loop top to bottom with an edge table and an active edge
//! list, handing horizontal spans to a sink. All rendering is done on the CPU
//! into an ARGB8888 color buffer that can be exported as PNG.
//!
//! # Quick Start
//!
//! ```no_run
//! use quadfill::prelude::*;
//!
//! let mut config = RenderConfig::default();
//! Preset::Grid.configure(&mut config);
//! let mut editor = QuadEditor::new(Preset::Grid.mesh(), config);
//! editor.move_vertex(4, Vec2::new(500.0, 300.0))?;
//!
//! let mut renderer = Renderer::new(editor.config().width, editor.config().height);
//! editor.render(&mut renderer)?;
//! save_png(&renderer, "grid.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod editor;
pub mod export;
pub mod fill;
pub mod math;
pub mod render;
pub mod scene;

// Re-export commonly needed types at crate root for convenience
pub use config::{ConfigError, RenderConfig};
pub use editor::QuadEditor;
pub use fill::{fill_polygon, fill_polygon_with_color, FillError, Span, SpanSink, VertexSource};
pub use scene::{Preset, QuadMesh, SceneError};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use quadfill::prelude::*;
/// ```
pub mod prelude {
    // Fill engine
    pub use crate::fill::{
        fill_polygon, fill_polygon_with_color, FillError, LoopDefect, Span, SpanSink,
        VertexSource,
    };

    // Scene & editing
    pub use crate::config::RenderConfig;
    pub use crate::editor::QuadEditor;
    pub use crate::scene::{Preset, QuadMesh};

    // Math & color
    pub use crate::colors::Rgb;
    pub use crate::math::vec2::Vec2;

    // Rendering
    pub use crate::export::save_png;
    pub use crate::render::{FrameBuffer, Renderer};
}
