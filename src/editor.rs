//! Interactive quad editing, independent of any windowing system.
//!
//! The caller feeds pointer positions in canvas coordinates; the editor decides
//! which vertex handle is grabbed, moves it while the pointer stays on the
//! canvas, and renders the mesh so that quads touching the moved vertex are
//! drawn last and win any overlap.

use log::debug;

use crate::config::RenderConfig;
use crate::fill::{fill_polygon, FillError};
use crate::math::vec2::Vec2;
use crate::render::Renderer;
use crate::scene::{QuadMesh, SceneError};

pub struct QuadEditor {
    mesh: QuadMesh,
    config: RenderConfig,
    editable: bool,
    grabbed: Option<usize>,
    last_moved: Option<usize>,
}

impl QuadEditor {
    pub fn new(mesh: QuadMesh, config: RenderConfig) -> Self {
        Self {
            mesh,
            config,
            editable: true,
            grabbed: None,
            last_moved: None,
        }
    }

    pub fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> QuadMesh {
        self.mesh
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Locks or unlocks editing. Locking releases any grabbed handle.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        if !editable {
            self.grabbed = None;
        }
    }

    /// The vertex currently being dragged.
    pub fn grabbed(&self) -> Option<usize> {
        self.grabbed
    }

    /// Strictly inside the canvas; the border itself does not count.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > 0.0
            && point.x < self.config.width as f32
            && point.y > 0.0
            && point.y < self.config.height as f32
    }

    /// The first vertex whose handle contains `point`.
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        if !self.contains(point) {
            return None;
        }
        let r2 = self.config.handle_radius * self.config.handle_radius;
        self.mesh
            .vertices()
            .iter()
            .position(|v| v.distance_squared(point) < r2)
    }

    /// Grabs the handle under `point`, if any.
    pub fn begin_drag(&mut self, point: Vec2) -> Option<usize> {
        if !self.editable {
            return None;
        }
        self.grabbed = self.hit_test(point);
        if let Some(index) = self.grabbed {
            debug!("grabbed vertex {}", index);
            self.last_moved = Some(index);
        }
        self.grabbed
    }

    /// Moves the grabbed vertex to `point`. Returns whether anything moved.
    pub fn drag_to(&mut self, point: Vec2) -> bool {
        let Some(index) = self.grabbed else {
            return false;
        };
        if !self.contains(point) {
            return false;
        }
        self.move_vertex(index, point).is_ok()
    }

    pub fn end_drag(&mut self) {
        self.grabbed = None;
    }

    /// Moves a vertex directly, bypassing handles and canvas bounds.
    pub fn move_vertex(&mut self, index: usize, point: Vec2) -> Result<(), SceneError> {
        self.mesh.set_position(index, point)?;
        debug!("moved vertex {} to ({}, {})", index, point.x, point.y);
        self.last_moved = Some(index);
        Ok(())
    }

    /// Quad indices in fill order.
    ///
    /// Quads that do not use the last moved vertex come first, then the quads
    /// that do, each group in table order.
    pub fn draw_order(&self) -> Vec<usize> {
        let touches_moved = |quad: &[usize; 4]| match self.last_moved {
            Some(moved) => quad.contains(&moved),
            None => false,
        };

        let quads = self.mesh.quads();
        let (mut order, moved): (Vec<usize>, Vec<usize>) =
            (0..quads.len()).partition(|&i| !touches_moved(&quads[i]));
        order.extend(moved);
        order
    }

    /// Clears `renderer` and draws the whole scene into it.
    pub fn render(&self, renderer: &mut Renderer) -> Result<(), FillError> {
        let config = &self.config;
        renderer.clear(config.background.to_argb());

        let quads = self.mesh.quads();
        let order = self.draw_order();
        let mut frame = renderer.frame_buffer();
        for &i in &order {
            fill_polygon(&self.mesh, &quads[i], &mut frame)?;
        }

        if config.show_outlines {
            let color = config.outline_color.to_argb();
            for quad in quads {
                renderer.draw_outline(&self.mesh.quad_points(quad), color);
            }
        }

        if config.show_handles {
            let color = config.handle_color.to_argb();
            for &vertex in self.mesh.vertices() {
                renderer.draw_handle(vertex, config.handle_radius, color);
            }
        }

        debug!("rendered {} quads in order {:?}", quads.len(), order);
        Ok(())
    }
}
