//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// 8-bit RGBA color
pub type Rgba8 = [u8; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba8,
}

impl Vertex {
    /// Stride in bytes (2 floats + 4 color bytes)
    pub const STRIDE_BYTES: usize = std::mem::size_of::<Vertex>();

    pub const fn new(x: f32, y: f32, color: Rgba8) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(pos: Vec2, color: Rgba8) -> Self {
        Self::new(pos.x, pos.y, color)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgba8;

    /// Uniform grey for a shade value
    pub const fn grey(v: u8) -> Rgba8 {
        [v, v, v, 255]
    }

    pub const CLEAR: Rgba8 = [200, 122, 255, 255]; // Purple, shows through gaps
    pub const WINDOW_BARS: Rgba8 = [0, 0, 0, 255];
    pub const BLOCK_CAP: Rgba8 = grey(20);
    pub const CHECKER_LIGHT: Rgba8 = grey(30);
    pub const CHECKER_DARK: Rgba8 = grey(15);
    pub const PLAYER: Rgba8 = [230, 41, 55, 255];
}
