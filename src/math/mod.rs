//! Small 2D math types shared by the fill engine and the editor.

pub mod vec2;
