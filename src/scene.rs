//! Quad mesh scenes.
//!
//! A [`QuadMesh`] is a shared vertex table, one color per vertex, and a list of
//! quads given as four vertex indices each. Quads share vertices, so moving one
//! vertex reshapes every quad around it. The mesh is the [`VertexSource`] the
//! fill engine reads from.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::colors::Rgb;
use crate::config::RenderConfig;
use crate::fill::VertexSource;
use crate::math::vec2::Vec2;

/// Four vertex indices forming one closed loop.
pub type Quad = [usize; 4];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadMesh {
    vertices: Vec<Vec2>,
    colors: Vec<Rgb>,
    quads: Vec<Quad>,
}

impl QuadMesh {
    pub fn new(vertices: Vec<Vec2>, colors: Vec<Rgb>, quads: Vec<Quad>) -> Result<Self, SceneError> {
        let mesh = Self {
            vertices,
            colors,
            quads,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Nine vertices on a 1024x768 canvas forming a 2x2 grid of quads.
    pub fn editor_grid() -> Self {
        Self {
            vertices: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(700.0, 0.0),
                Vec2::new(1000.0, 0.0),
                Vec2::new(100.0, 400.0),
                Vec2::new(600.0, 450.0),
                Vec2::new(1000.0, 400.0),
                Vec2::new(50.0, 650.0),
                Vec2::new(700.0, 700.0),
                Vec2::new(1000.0, 700.0),
            ],
            colors: vec![
                Rgb::new(0, 0, 255),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 255, 255),
                Rgb::new(255, 255, 0),
                Rgb::new(0, 255, 255),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 200, 100),
                Rgb::new(255, 255, 0),
            ],
            quads: vec![[0, 1, 4, 3], [1, 2, 5, 4], [3, 4, 7, 6], [4, 5, 8, 7]],
        }
    }

    /// Nine vertices on a 700x700 canvas forming a diamond of four quads.
    pub fn diamond() -> Self {
        Self {
            vertices: vec![
                Vec2::new(350.0, 100.0),
                Vec2::new(420.0, 280.0),
                Vec2::new(600.0, 350.0),
                Vec2::new(280.0, 280.0),
                Vec2::new(350.0, 350.0),
                Vec2::new(420.0, 420.0),
                Vec2::new(100.0, 350.0),
                Vec2::new(280.0, 420.0),
                Vec2::new(350.0, 600.0),
            ],
            colors: vec![
                Rgb::new(165, 0, 165),
                Rgb::new(255, 0, 0),
                Rgb::new(255, 145, 0),
                Rgb::new(56, 20, 175),
                Rgb::new(255, 255, 255),
                Rgb::new(255, 211, 0),
                Rgb::new(17, 63, 170),
                Rgb::new(0, 204, 0),
                Rgb::new(204, 244, 0),
            ],
            quads: vec![[4, 5, 8, 7], [0, 1, 4, 3], [1, 2, 5, 4], [3, 4, 7, 6]],
        }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Corner positions of a quad, in loop order.
    pub fn quad_points(&self, quad: &Quad) -> [Vec2; 4] {
        quad.map(|index| self.vertices[index])
    }

    pub fn set_position(&mut self, index: usize, position: Vec2) -> Result<(), SceneError> {
        let count = self.vertices.len();
        let vertex = self.vertices.get_mut(index).ok_or_else(|| {
            SceneError::Invalid(format!("vertex {} does not exist ({} vertices)", index, count))
        })?;
        *vertex = position;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let mesh: Self = serde_json::from_str(json)?;
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), SceneError> {
        if self.colors.len() != self.vertices.len() {
            return Err(SceneError::Invalid(format!(
                "{} colors for {} vertices",
                self.colors.len(),
                self.vertices.len()
            )));
        }
        if let Some(index) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(SceneError::Invalid(format!(
                "vertex {} has a non-finite position",
                index
            )));
        }
        for (i, quad) in self.quads.iter().enumerate() {
            if let Some(&index) = quad.iter().find(|&&index| index >= self.vertices.len()) {
                return Err(SceneError::Invalid(format!(
                    "quad {} refers to vertex {} ({} vertices)",
                    i,
                    index,
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }
}

impl VertexSource for QuadMesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn position(&self, index: usize) -> Vec2 {
        self.vertices[index]
    }

    fn color(&self, index: usize) -> Rgb {
        self.colors[index]
    }
}

/// Built-in scenes, each with the canvas it was laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// 2x2 grid of quads on a 1024x768 canvas with 10px handles.
    #[default]
    Grid,
    /// Diamond of four quads on a 700x700 canvas with 20px handles.
    Diamond,
}

impl Preset {
    pub fn mesh(self) -> QuadMesh {
        match self {
            Preset::Grid => QuadMesh::editor_grid(),
            Preset::Diamond => QuadMesh::diamond(),
        }
    }

    /// Sets the canvas size and handle radius the preset was laid out for.
    pub fn configure(self, config: &mut RenderConfig) {
        let (width, height, handle_radius) = match self {
            Preset::Grid => (1024, 768, 10.0),
            Preset::Diamond => (700, 700, 20.0),
        };
        config.width = width;
        config.height = height;
        config.handle_radius = handle_radius;
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Grid => write!(f, "grid"),
            Preset::Diamond => write!(f, "diamond"),
        }
    }
}

impl FromStr for Preset {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Preset::Grid),
            "diamond" => Ok(Preset::Diamond),
            other => Err(SceneError::Invalid(format!("unknown preset '{}'", other))),
        }
    }
}

#[derive(Debug)]
pub enum SceneError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "failed to access scene file: {}", e),
            SceneError::Parse(e) => write!(f, "failed to parse scene: {}", e),
            SceneError::Invalid(msg) => write!(f, "invalid scene: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            SceneError::Parse(e) => Some(e),
            SceneError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::{fill_polygon, Span};

    #[test]
    fn test_presets_are_valid() {
        for preset in [Preset::Grid, Preset::Diamond] {
            let mesh = preset.mesh();
            assert!(mesh.validate().is_ok(), "{}", preset);
            assert_eq!(mesh.vertex_count(), 9);
            assert_eq!(mesh.colors().len(), 9);
            assert_eq!(mesh.quads().len(), 4);
        }
    }

    #[test]
    fn test_new_rejects_color_mismatch() {
        let err = QuadMesh::new(vec![Vec2::ZERO; 4], vec![Rgb::WHITE; 3], vec![[0, 1, 2, 3]])
            .unwrap_err();
        assert!(matches!(err, SceneError::Invalid(_)));
    }

    #[test]
    fn test_new_rejects_dangling_index() {
        let err = QuadMesh::new(vec![Vec2::ZERO; 4], vec![Rgb::WHITE; 4], vec![[0, 1, 2, 4]])
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid scene: quad 0 refers to vertex 4 (4 vertices)");
    }

    #[test]
    fn test_json_round_trip() {
        let mesh = QuadMesh::diamond();
        let back = QuadMesh::from_json(&mesh.to_json().unwrap()).unwrap();
        assert_eq!(back, mesh);
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{
            "vertices": [{ "x": 0.0, "y": 0.0 }, { "x": 5.0, "y": 0.0 }],
            "colors": [[0, 0, 0], [1, 1, 1]],
            "quads": [[0, 1, 1, 9]]
        }"#;
        assert!(matches!(QuadMesh::from_json(json), Err(SceneError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("quadfill-scene-{}.json", std::process::id()));
        let mesh = QuadMesh::editor_grid();
        mesh.save(&path).unwrap();
        let loaded = QuadMesh::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, mesh);
    }

    #[test]
    fn test_set_position() {
        let mut mesh = QuadMesh::editor_grid();
        mesh.set_position(4, Vec2::new(500.0, 500.0)).unwrap();
        assert_eq!(mesh.position(4), Vec2::new(500.0, 500.0));
        assert!(mesh.set_position(9, Vec2::ZERO).is_err());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("diamond".parse::<Preset>().unwrap(), Preset::Diamond);
        assert_eq!(Preset::Grid.to_string().parse::<Preset>().unwrap(), Preset::Grid);
        assert!("hexagon".parse::<Preset>().is_err());
    }

    #[test]
    fn test_grid_quads_tile_without_overlap() {
        let mesh = QuadMesh::editor_grid();
        let mut spans: Vec<Span> = Vec::new();
        for quad in mesh.quads() {
            fill_polygon(&mesh, quad, &mut |span: Span| spans.push(span)).unwrap();
        }

        // Rows where two quads meet on a shared edge: the chain has no seam.
        for y in [200, 420, 600] {
            let mut row: Vec<(f32, f32)> = spans
                .iter()
                .filter(|s| s.y == y && s.x_start < s.x_end)
                .map(|s| (s.x_start, s.x_end))
                .collect();
            row.sort_by(|a, b| a.0.total_cmp(&b.0));
            for pair in row.windows(2) {
                assert_eq!(pair[0].1, pair[1].0, "gap or overlap on row {}", y);
            }
        }
    }
}
