//! Software framebuffer
//!
//! Replays a [`DrawList`] into an RGBA8 pixel buffer and composites the
//! fixed-size viewport into a window-sized buffer with letterboxing. This is
//! the headless stand-in for a windowing backend.

use glam::{IVec2, Vec2};

use super::draw::{DrawCommand, DrawList};
use super::shapes;
use super::vertex::{Rgba8, Vertex, colors};

/// Checkerboard tile period and cell size in pixels
const CHECKER_PERIOD: i32 = 64;
const CHECKER_CELL: i32 = 32;
/// Fraction of the vignette radius left fully transparent
const VIGNETTE_DENSITY: f32 = 0.1;

/// Pixel count of a `width` x `height` buffer
#[inline]
fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Row-major index of pixel `(x, y)` in a buffer `width` pixels wide
#[inline]
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Placement of the scaled viewport inside the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub offset: Vec2,
}

impl Letterbox {
    /// Largest uniform scale that fits, centred
    pub fn fit(window: (u32, u32), viewport: (u32, u32)) -> Self {
        let (ww, wh) = (window.0 as f32, window.1 as f32);
        let (vw, vh) = (viewport.0 as f32, viewport.1 as f32);
        let scale = (ww / vw).min(wh / vh);
        Self {
            scale,
            offset: Vec2::new(ww / 2.0 - vw / 2.0 * scale, wh / 2.0 - vh / 2.0 * scale),
        }
    }
}

/// RGBA8 pixel buffer
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![colors::WINDOW_BARS; buffer_len(width, height)],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x < self.width && y < self.height {
            Some(self.pixels[pixel_index(self.width, x, y)])
        } else {
            None
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn clear(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    /// Replay a draw list in order
    pub fn execute(&mut self, list: &DrawList) {
        for command in list.commands() {
            match command {
                DrawCommand::Clear(color) => self.clear(*color),
                DrawCommand::Checker { scroll } => self.checker(*scroll),
                DrawCommand::Fan { verts, color } => {
                    self.fill_triangles(&shapes::fan(verts, *color))
                }
                DrawCommand::Vignette { inset } => self.vignette(*inset),
                DrawCommand::Circle {
                    centre,
                    radius,
                    color,
                } => self.fill_triangles(&shapes::circle(
                    *centre,
                    *radius,
                    *color,
                    shapes::circle_segments(*radius),
                )),
            }
        }
    }

    /// Fill a triangle list (every three vertices, first vertex's color)
    pub fn fill_triangles(&mut self, vertices: &[Vertex]) {
        for tri in vertices.chunks_exact(3) {
            self.fill_polygon(&[tri[0].pos(), tri[1].pos(), tri[2].pos()], tri[0].color);
        }
    }

    /// Scanline fill of a polygon, sampling at pixel centres
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Rgba8) {
        if points.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }

        let (min_y, max_y) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        if !min_y.is_finite() || !max_y.is_finite() {
            return;
        }
        let y0 = ((min_y - 0.5).ceil() as i32).max(0);
        let y1 = ((max_y - 0.5).ceil() as i32).min(self.height as i32);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        let n = points.len();
        for y in y0..y1 {
            crossings.clear();
            let yf = y as f32 + 0.5;
            for i in 0..n {
                let a = points[i];
                let b = points[(i + 1) % n];
                if (a.y <= yf && b.y > yf) || (b.y <= yf && a.y > yf) {
                    crossings.push(a.x + (yf - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            crossings.sort_unstable_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                self.span(y, pair[0], pair[1], color);
            }
        }
    }

    /// Pixels whose centres lie in `[x0, x1)` on row `y`
    fn span(&mut self, y: i32, x0: f32, x1: f32, color: Rgba8) {
        let start = ((x0 - 0.5).ceil() as i32).max(0);
        let end = ((x1 - 0.5).ceil() as i32).min(self.width as i32);
        if start >= end {
            return;
        }
        let row = pixel_index(self.width, 0, y as u32);
        self.pixels[row + start as usize..row + end as usize].fill(color);
    }

    /// Two-tone checkerboard floor
    pub fn checker(&mut self, scroll: IVec2) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cx = (x + scroll.x).rem_euclid(CHECKER_PERIOD) / CHECKER_CELL;
                let cy = (y + scroll.y).rem_euclid(CHECKER_PERIOD) / CHECKER_CELL;
                let color = if (cx + cy) % 2 == 0 {
                    colors::CHECKER_LIGHT
                } else {
                    colors::CHECKER_DARK
                };
                self.pixels[pixel_index(self.width, x as u32, y as u32)] = color;
            }
        }
    }

    /// Darken towards the edges with a radial gradient.
    ///
    /// The gradient is sampled from the sub-rectangle inset by `inset / 2` on
    /// every side, so a larger inset pushes the dark rim further out.
    pub fn vignette(&mut self, inset: f32) {
        let (w, h) = (self.width as f32, self.height as f32);
        let centre = Vec2::new(w / 2.0, h / 2.0);
        let radius = w.min(h) / 2.0;
        let clear_radius = radius * VIGNETTE_DENSITY;
        let src_scale = Vec2::new((w - inset) / w, (h - inset) / h);
        let src_origin = Vec2::splat(inset / 2.0);

        for y in 0..self.height {
            for x in 0..self.width {
                let src = src_origin + Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * src_scale;
                let t = ((src.distance(centre) - clear_radius) / (radius - clear_radius))
                    .clamp(0.0, 1.0);
                let keep = 1.0 - t;
                let px = &mut self.pixels[pixel_index(self.width, x, y)];
                for channel in &mut px[..3] {
                    *channel = (*channel as f32 * keep) as u8;
                }
            }
        }
    }

    /// Nearest-neighbour scale of this buffer into `window`, black bars around it
    pub fn present_letterboxed(&self, window: &mut FrameBuffer) -> Letterbox {
        let fit = Letterbox::fit((window.width, window.height), (self.width, self.height));
        window.clear(colors::WINDOW_BARS);
        if fit.scale <= 0.0 {
            return fit;
        }

        let x0 = fit.offset.x.max(0.0) as u32;
        let y0 = fit.offset.y.max(0.0) as u32;
        let x1 = ((fit.offset.x + self.width as f32 * fit.scale).ceil() as u32).min(window.width);
        let y1 = ((fit.offset.y + self.height as f32 * fit.scale).ceil() as u32).min(window.height);

        for wy in y0..y1 {
            let sy = ((wy as f32 + 0.5 - fit.offset.y) / fit.scale) as u32;
            if sy >= self.height {
                continue;
            }
            for wx in x0..x1 {
                let sx = ((wx as f32 + 0.5 - fit.offset.x) / fit.scale) as u32;
                if sx >= self.width {
                    continue;
                }
                window.pixels[pixel_index(window.width, wx, wy)] =
                    self.pixels[pixel_index(self.width, sx, sy)];
            }
        }
        fit
    }
}
