//! Frame composition
//!
//! Turns the current [`GameState`] into a [`DrawList`]: background, level
//! blocks in painter's order, vignette and the player marker.

use std::time::{Duration, Instant};

use glam::{IVec2, Vec2};

use super::draw::{DrawCommand, DrawList};
use super::tiles::{Lighting, render_block};
use super::vertex::colors;
use crate::consts::*;
use crate::sim::depth::{SortKey, back_to_front};
use crate::sim::level::LevelStore;
use crate::sim::rect::{Rect, rect_point_distance};
use crate::sim::spiral::{SpiralIter, spiral_len};
use crate::sim::state::{Block, Camera, GameState, NearestBlocks, World};
use crate::{SCREEN_CENTRE, cell_of, wrap_mod};

/// Checkerboard period in pixels
const CHECKER_PERIOD: i32 = 64;
/// Grid blocks extrude by their own footprint
const GRID_BLOCK_HEIGHT: f32 = 1.0;

/// What a frame's draw pass did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Time spent emitting level geometry
    pub level_draw: Duration,
    /// Blocks that produced geometry
    pub blocks_drawn: usize,
}

/// Compose one frame into `out` (cleared first).
///
/// Advances the flicker walk and, for free-form worlds, refreshes the
/// nearest-block cache used by the next update.
pub fn draw_world(state: &mut GameState, out: &mut DrawList) -> FrameReport {
    out.clear();
    state.step_flicker();

    let camera = state.camera;
    let scroll = camera.viewport_pos.as_ivec2();
    out.push(DrawCommand::Clear(colors::CLEAR));
    out.push(DrawCommand::Checker {
        scroll: IVec2::new(
            wrap_mod(scroll.x, CHECKER_PERIOD),
            wrap_mod(scroll.y, CHECKER_PERIOD),
        ),
    });

    let lighting = Lighting {
        flicker: state.flicker,
        overflow: state.overflow,
    };

    let start = Instant::now();
    let blocks_drawn = match &mut state.world {
        World::Grid(level) => draw_grid(out, level, state.player.pos, &lighting),
        World::Blocks { blocks, nearest } => draw_blocks(out, blocks, nearest, &camera, &lighting),
    };
    let level_draw = start.elapsed();

    out.push(DrawCommand::Vignette {
        inset: state.flicker,
    });
    out.push(DrawCommand::Circle {
        centre: SCREEN_CENTRE,
        radius: PLAYER_RADIUS,
        color: colors::PLAYER,
    });

    FrameReport {
        level_draw,
        blocks_drawn,
    }
}

/// Solid cells within the draw radius, outermost ring first, centre last
fn draw_grid(out: &mut DrawList, level: &LevelStore, pos: Vec2, lighting: &Lighting) -> usize {
    let cell = cell_of(pos);
    let tile = TILE_SIZE as i32;
    let sub = IVec2::new(wrap_mod(pos.x as i32, tile), wrap_mod(pos.y as i32, tile)).as_vec2();

    let rings = SpiralIter::new(1, spiral_len(DRAW_RADIUS) - 1)
        .rev()
        .map(|(_, rel)| rel)
        .chain(std::iter::once(IVec2::ZERO));

    let mut drawn = 0;
    for rel in rings {
        if !level.get(cell + rel) {
            continue;
        }
        let origin = rel.as_vec2() * TILE_SIZE - sub + SCREEN_CENTRE;
        let rect = Rect::square(origin, TILE_SIZE);
        render_block(out, &rect, GRID_BLOCK_HEIGHT, SCREEN_CENTRE, lighting);
        drawn += 1;
    }
    drawn
}

/// Visible free-form blocks back to front; refills `nearest`
fn draw_blocks(
    out: &mut DrawList,
    blocks: &[Block],
    nearest: &mut NearestBlocks,
    camera: &Camera,
    lighting: &Lighting,
) -> usize {
    let viewport = Rect::new(0.0, 0.0, VIEWPORT_WIDTH as f32, VIEWPORT_HEIGHT as f32);

    let mut keys: Vec<SortKey> = blocks
        .iter()
        .enumerate()
        .filter_map(|(i, block)| {
            let on_screen = block.rect.translate(camera.offset);
            on_screen.intersects(&viewport).then(|| {
                SortKey::from_distance(i, rect_point_distance(SCREEN_CENTRE, &on_screen))
            })
        })
        .collect();
    back_to_front(&mut keys);

    for key in &keys {
        let block = &blocks[key.index];
        let on_screen = block.rect.translate(camera.offset);
        render_block(out, &on_screen, block.height, SCREEN_CENTRE, lighting);
    }

    nearest.clear();
    let first = keys.len().saturating_sub(NearestBlocks::CAPACITY);
    for key in &keys[first..] {
        nearest.push(key.index);
    }
    log::trace!("{} blocks visible, nearest {:?}", keys.len(), nearest.as_slice());

    keys.len()
}
