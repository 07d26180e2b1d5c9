//! Collision detection and response for the player's bounding circle
//!
//! The player is a circle; obstacles are axis-aligned rectangles. Against
//! each rectangle the circle is pushed out along one axis when it sits beside
//! an edge, or radially away from the nearest corner when it sits diagonal to
//! the rectangle.
//!
//! Obstacles are processed one after another (sequential relaxation). A push
//! from a later obstacle can move the circle back into an earlier one; that
//! is accepted, the step is not iterated to convergence.

use glam::Vec2;

use super::rect::Rect;

/// Result of a collision check
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Whether the circle was pushed
    pub hit: bool,
    /// Corrected circle centre (equal to the input on a miss)
    pub point: Vec2,
    /// Direction of the push (zero on a miss)
    pub normal: Vec2,
    /// Push distance
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss(point: Vec2) -> Self {
        Self {
            hit: false,
            point,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    fn pushed(from: Vec2, to: Vec2, normal: Vec2) -> Self {
        Self {
            hit: true,
            point: to,
            normal,
            penetration: from.distance(to),
        }
    }
}

/// Check a circle against one rectangle and compute its pushout
pub fn circle_rect_collision(pos: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    if rect.spans_y(pos.y) {
        // Beside a vertical edge
        if pos.x > rect.right() && pos.x < rect.right() + radius {
            let to = Vec2::new(rect.right() + radius, pos.y);
            return CollisionResult::pushed(pos, to, Vec2::X);
        }
        if pos.x < rect.left() && pos.x > rect.left() - radius {
            let to = Vec2::new(rect.left() - radius, pos.y);
            return CollisionResult::pushed(pos, to, Vec2::NEG_X);
        }
        return CollisionResult::miss(pos);
    }

    if rect.spans_x(pos.x) {
        // Beside a horizontal edge
        if pos.y > rect.bottom() && pos.y < rect.bottom() + radius {
            let to = Vec2::new(pos.x, rect.bottom() + radius);
            return CollisionResult::pushed(pos, to, Vec2::Y);
        }
        if pos.y < rect.top() && pos.y > rect.top() - radius {
            let to = Vec2::new(pos.x, rect.top() - radius);
            return CollisionResult::pushed(pos, to, Vec2::NEG_Y);
        }
        return CollisionResult::miss(pos);
    }

    // Diagonal: the corners behave like point obstacles
    let (corner, dist) = nearest_corner(pos, rect);
    if dist < radius {
        let normal = (pos - corner).normalize_or_zero();
        if normal == Vec2::ZERO {
            // Exactly on the corner, no direction to push in
            return CollisionResult::miss(pos);
        }
        return CollisionResult::pushed(pos, corner + normal * radius, normal);
    }

    CollisionResult::miss(pos)
}

/// Nearest rectangle corner and its distance; ties go to the later corner in quad order
fn nearest_corner(pos: Vec2, rect: &Rect) -> (Vec2, f32) {
    let mut best = (Vec2::ZERO, f32::MAX);
    for v in rect.to_quad().verts {
        let d = pos.distance(v);
        if d <= best.1 {
            best = (v, d);
        }
    }
    best
}

/// Resolve a desired position against a sequence of obstacles
pub fn resolve<I>(desired: Vec2, radius: f32, obstacles: I) -> Vec2
where
    I: IntoIterator<Item = Rect>,
{
    obstacles.into_iter().fold(desired, |pos, rect| {
        let result = circle_rect_collision(pos, radius, &rect);
        if result.hit {
            log::trace!(
                "pushout {:.3} along {:?} from {:?}",
                result.penetration,
                result.normal,
                rect
            );
        }
        result.point
    })
}
