//! Draw primitives emitted by the renderer
//!
//! The frame is described as an ordered list of commands in viewport pixel
//! space. A backend replays the list in order; later commands paint over
//! earlier ones.

use glam::{IVec2, Vec2};

use super::shapes;
use super::vertex::{Rgba8, Vertex};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole viewport
    Clear(Rgba8),
    /// Checkerboard floor scrolled by `scroll` pixels (each axis in `[0, 64)`)
    Checker { scroll: IVec2 },
    /// Convex quad drawn as a triangle fan
    Fan { verts: [Vec2; 4], color: Rgba8 },
    /// Radial darkening; the gradient source is cropped by `inset` pixels in total
    Vignette { inset: f32 },
    Circle {
        centre: Vec2,
        radius: f32,
        color: Rgba8,
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn fan(&mut self, verts: [Vec2; 4], color: Rgba8) {
        self.push(DrawCommand::Fan { verts, color });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of fan commands (block caps and faces)
    pub fn fan_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fan { .. }))
            .count()
    }

    /// Triangle list for the geometric commands, ready for upload to a vertex buffer
    pub fn to_vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::Fan { verts, color } => {
                    vertices.extend(shapes::fan(verts, *color));
                }
                DrawCommand::Circle {
                    centre,
                    radius,
                    color,
                } => {
                    vertices.extend(shapes::circle(
                        *centre,
                        *radius,
                        *color,
                        shapes::circle_segments(*radius),
                    ));
                }
                DrawCommand::Clear(_)
                | DrawCommand::Checker { .. }
                | DrawCommand::Vignette { .. } => {}
            }
        }
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_cover_geometry_only() {
        let mut list = DrawList::new();
        list.push(DrawCommand::Clear([0; 4]));
        list.fan([Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y], [9; 4]);
        list.push(DrawCommand::Vignette { inset: 3.0 });
        assert_eq!(list.len(), 3);
        assert_eq!(list.fan_count(), 1);
        assert_eq!(list.to_vertices().len(), 6);

        list.clear();
        assert!(list.is_empty());
    }
}
