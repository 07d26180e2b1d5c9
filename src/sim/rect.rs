//! Axis-aligned rectangle geometry for blocks and tiles
//!
//! Screen convention: y grows downwards, so `y` is the top edge and `y + h`
//! the bottom edge.

use glam::Vec2;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square with its top-left corner at `origin`
    pub fn square(origin: Vec2, size: f32) -> Self {
        Self::new(origin.x, origin.y, size, size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Same rectangle moved by `offset`
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Strictly inside the vertical span (edges excluded)
    #[inline]
    pub fn spans_y(&self, y: f32) -> bool {
        self.bottom() > y && y > self.top()
    }

    /// Strictly inside the horizontal span (edges excluded)
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        self.right() > x && x > self.left()
    }

    /// Whether two rectangles overlap (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn to_quad(&self) -> Quad {
        Quad::from_rect(self)
    }
}

/// Four vertices: bottom-left, bottom-right, top-right, top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub verts: [Vec2; 4],
}

impl Quad {
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            verts: [
                Vec2::new(rect.left(), rect.bottom()),
                Vec2::new(rect.right(), rect.bottom()),
                Vec2::new(rect.right(), rect.top()),
                Vec2::new(rect.left(), rect.top()),
            ],
        }
    }

    /// Each vertex pushed away from `eye` by `(v - eye) / height`
    pub fn project_from(&self, eye: Vec2, height: f32) -> Self {
        let scale = 1.0 / height;
        Self {
            verts: self.verts.map(|v| v + (v - eye) * scale),
        }
    }
}

/// Distance from a point to a rectangle's outline
///
/// Inside a span this is the distance to the nearer of the two facing edges;
/// diagonal to the rectangle it is the distance to the nearest corner.
pub fn rect_point_distance(point: Vec2, rect: &Rect) -> f32 {
    if rect.spans_y(point.y) {
        return (rect.left() - point.x).abs().min((rect.right() - point.x).abs());
    }
    if rect.spans_x(point.x) {
        return (rect.top() - point.y).abs().min((rect.bottom() - point.y).abs());
    }
    rect.to_quad()
        .verts
        .iter()
        .map(|v| point.distance(*v))
        .fold(f32::MAX, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_winding() {
        let quad = Rect::new(1.0, 2.0, 3.0, 4.0).to_quad();
        assert_eq!(
            quad.verts,
            [
                Vec2::new(1.0, 6.0),
                Vec2::new(4.0, 6.0),
                Vec2::new(4.0, 2.0),
                Vec2::new(1.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_project_unit_height_doubles_offset() {
        let quad = Rect::new(10.0, 0.0, 10.0, 10.0).to_quad();
        let far = quad.project_from(Vec2::ZERO, 1.0);
        assert_eq!(far.verts[1], Vec2::new(40.0, 20.0));

        let tall = quad.project_from(Vec2::ZERO, 2.0);
        assert_eq!(tall.verts[1], Vec2::new(30.0, 15.0));
    }

    #[test]
    fn test_rect_point_distance_regions() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Beside the right edge
        assert!((rect_point_distance(Vec2::new(13.0, 5.0), &rect) - 3.0).abs() < 1e-6);
        // Above the top edge
        assert!((rect_point_distance(Vec2::new(5.0, -2.0), &rect) - 2.0).abs() < 1e-6);
        // Diagonal to the bottom-right corner
        assert!((rect_point_distance(Vec2::new(13.0, 14.0), &rect) - 5.0).abs() < 1e-6);
        // Inside: nearest edge
        assert!((rect_point_distance(Vec2::new(2.0, 5.0), &rect) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_spans_are_strict() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!rect.spans_x(0.0));
        assert!(!rect.spans_x(10.0));
        assert!(rect.spans_x(0.001));
        assert!(!rect.spans_y(10.0));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::new(-20.0, -20.0, 5.0, 5.0)));
    }
}
