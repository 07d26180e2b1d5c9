//! Extruded block rendering
//!
//! A block is drawn as a pseudo-3D column seen from above: its rectangle is
//! projected away from the eye (the player) to form a far "cap", and the side
//! faces between the rectangle and the cap are shaded by how squarely they
//! face the light the player carries.

use glam::Vec2;

use super::draw::DrawList;
use super::vertex::colors;
use crate::settings::ChannelOverflow;
use crate::sim::rect::{Quad, Rect, rect_point_distance};

/// Light falloff per pixel of distance
const FALLOFF: f32 = 0.08;
/// Brightness at zero distance before flicker
const BASE_BRIGHTNESS: f32 = 100.0;

/// Per-frame lighting parameters
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    /// Flicker random-walk value in `[0, 64]`
    pub flicker: f32,
    pub overflow: ChannelOverflow,
}

impl Lighting {
    /// Inverse falloff from the eye, scaled by the flicker
    pub fn brightness(&self, eye: Vec2, rect: &Rect) -> f32 {
        (BASE_BRIGHTNESS / (rect_point_distance(eye, rect) * FALLOFF + 1.0))
            * (self.flicker / 256.0 + 0.875)
    }
}

/// Store a shade value in an 8-bit channel
pub fn shade_channel(value: f32, overflow: ChannelOverflow) -> u8 {
    match overflow {
        // Truncate toward zero, keep the low byte
        ChannelOverflow::Wrap => value as i32 as u8,
        ChannelOverflow::Clamp => value.clamp(0.0, 255.0) as u8,
    }
}

/// A side face of an extruded block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Bottom,
    Top,
    Right,
    Left,
}

impl Face {
    pub fn normal(self) -> Vec2 {
        match self {
            Face::Bottom => Vec2::Y,
            Face::Top => Vec2::NEG_Y,
            Face::Right => Vec2::X,
            Face::Left => Vec2::NEG_X,
        }
    }

    /// Face outline: near edge, then the matching far edge reversed
    pub fn outline(self, near: &Quad, far: &Quad) -> [Vec2; 4] {
        let (a, b) = match self {
            Face::Bottom => (0, 1),
            Face::Top => (2, 3),
            Face::Right => (1, 2),
            Face::Left => (3, 0),
        };
        [near.verts[a], near.verts[b], far.verts[b], far.verts[a]]
    }
}

/// Faces turned toward the eye: at most one per axis
pub fn visible_faces(rect: &Rect, eye: Vec2) -> impl Iterator<Item = Face> {
    let vertical = if rect.top() < eye.y {
        Some(Face::Bottom)
    } else if rect.top() > eye.y {
        Some(Face::Top)
    } else {
        None
    };
    let horizontal = if rect.right() < eye.x {
        Some(Face::Right)
    } else if rect.left() > eye.x {
        Some(Face::Left)
    } else {
        None
    };
    [vertical, horizontal].into_iter().flatten()
}

/// Emit the cap and visible side faces of one block
pub fn render_block(out: &mut DrawList, rect: &Rect, height: f32, eye: Vec2, lighting: &Lighting) {
    let near = rect.to_quad();
    let far = near.project_from(eye, height);

    let brightness = lighting.brightness(eye, rect);
    let to_eye = (eye - rect.centre()).normalize_or_zero();

    out.fan(far.verts, colors::BLOCK_CAP);

    for face in visible_faces(rect, eye) {
        let shade = shade_channel(brightness * face.normal().dot(to_eye), lighting.overflow);
        out.fan(face.outline(&near, &far), colors::grey(shade));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::DrawCommand;

    fn lighting(flicker: f32) -> Lighting {
        Lighting {
            flicker,
            overflow: ChannelOverflow::Wrap,
        }
    }

    #[test]
    fn test_brightness_model() {
        let rect = Rect::new(10.0, -5.0, 10.0, 10.0);
        // 10px from the eye, no flicker
        let b = lighting(0.0).brightness(Vec2::ZERO, &rect);
        assert!((b - 100.0 / 1.8 * 0.875).abs() < 1e-3);
        // Full flicker brightens by 64/256
        let b = lighting(64.0).brightness(Vec2::ZERO, &rect);
        assert!((b - 100.0 / 1.8 * 1.125).abs() < 1e-3);
    }

    #[test]
    fn test_shade_channel_policies() {
        assert_eq!(shade_channel(87.9, ChannelOverflow::Wrap), 87);
        assert_eq!(shade_channel(300.0, ChannelOverflow::Wrap), 44);
        assert_eq!(shade_channel(-1.5, ChannelOverflow::Wrap), 255);
        assert_eq!(shade_channel(300.0, ChannelOverflow::Clamp), 255);
        assert_eq!(shade_channel(-1.5, ChannelOverflow::Clamp), 0);
    }

    #[test]
    fn test_faces_toward_eye() {
        let eye = Vec2::new(320.0, 240.0);
        // Up and to the left of the eye: bottom and right faces
        let rect = Rect::new(200.0, 100.0, 32.0, 32.0);
        let faces: Vec<Face> = visible_faces(&rect, eye).collect();
        assert_eq!(faces, vec![Face::Bottom, Face::Right]);

        // Below and to the right: top and left
        let rect = Rect::new(400.0, 300.0, 32.0, 32.0);
        let faces: Vec<Face> = visible_faces(&rect, eye).collect();
        assert_eq!(faces, vec![Face::Top, Face::Left]);

        // Straddling the eye column: only the vertical face
        let rect = Rect::new(310.0, 300.0, 32.0, 32.0);
        let faces: Vec<Face> = visible_faces(&rect, eye).collect();
        assert_eq!(faces, vec![Face::Top]);
    }

    #[test]
    fn test_render_block_emits_cap_then_faces() {
        let eye = Vec2::new(320.0, 240.0);
        let rect = Rect::new(200.0, 100.0, 32.0, 32.0);
        let mut list = DrawList::new();
        render_block(&mut list, &rect, 1.0, eye, &lighting(0.0));

        assert_eq!(list.len(), 3);
        let DrawCommand::Fan { verts, color } = &list.commands()[0] else {
            panic!("expected the cap first");
        };
        assert_eq!(*color, colors::BLOCK_CAP);
        // Unit height: each corner moves as far again from the eye
        assert_eq!(verts[3], Vec2::new(80.0, -40.0));

        let DrawCommand::Fan { verts, .. } = &list.commands()[1] else {
            panic!("expected the bottom face");
        };
        assert_eq!(verts[0], Vec2::new(200.0, 132.0));
        assert_eq!(verts[1], Vec2::new(232.0, 132.0));
    }

    #[test]
    fn test_face_shade_uses_normal_dot_light() {
        let eye = Vec2::new(100.0, 0.0);
        // Directly left of the eye: right face lit head-on
        let rect = Rect::new(0.0, -16.0, 32.0, 32.0);
        let mut list = DrawList::new();
        render_block(&mut list, &rect, 2.0, eye, &lighting(0.0));

        let expected = shade_channel(lighting(0.0).brightness(eye, &rect), ChannelOverflow::Wrap);
        let shades: Vec<u8> = list
            .commands()
            .iter()
            .skip(1)
            .filter_map(|c| match c {
                DrawCommand::Fan { color, .. } => Some(color[0]),
                _ => None,
            })
            .collect();
        // rect.top (-16) < eye.y (0): the bottom face is drawn too, edge-on
        assert_eq!(shades, vec![0, expected]);
    }
}
