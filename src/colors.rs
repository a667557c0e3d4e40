//! Color types and ARGB8888 packing.
//!
//! Fill colors travel through the engine as [`Rgb`] triples; the color buffer
//! stores packed `0xAARRGGBB` words.

use serde::{Deserialize, Serialize};

// Colors in ARGB8888 format
pub const BACKGROUND: u32 = 0xFFFFFFFF;

/// An opaque 8-bit-per-channel color.
///
/// Serialized as a `[r, g, b]` array, the same shape the scene files use for
/// vertex colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs into a fully opaque ARGB8888 word.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Unpacks an ARGB8888 word, dropping alpha.
    pub const fn from_argb(color: u32) -> Self {
        Self::new((color >> 16) as u8, (color >> 8) as u8, color as u8)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        [color.r, color.g, color.b]
    }
}

/// Converts an ARGB8888 word into the RGBA byte order the `image` crate expects.
#[inline]
pub fn argb_to_rgba(color: u32) -> [u8; 4] {
    let a = (color >> 24) as u8;
    let Rgb { r, g, b } = Rgb::from_argb(color);
    [r, g, b, a]
}
