//! Lantern Blocks - a top-down block world lit by a flickering lantern
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spiral indexing, level grid, collision, depth order)
//! - `renderer`: Extruded block geometry, draw lists and the software framebuffer
//! - `game`: Frame loop owner (update then draw, timing stats)
//! - `screen`: Screen state machine
//! - `settings`: Data-driven configuration
//! - `stats`: Smoothed frame timings for the debug overlay

pub mod game;
pub mod renderer;
pub mod screen;
pub mod settings;
pub mod sim;
pub mod stats;

pub use game::Game;
pub use settings::{ChannelOverflow, Settings, WorldKind};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Offscreen viewport size in pixels
    pub const VIEWPORT_WIDTH: u32 = 640;
    pub const VIEWPORT_HEIGHT: u32 = 480;

    /// Edge length of one grid tile in pixels
    pub const TILE_SIZE: f32 = 32.0;
    /// Dimensions of the repeating level pattern
    pub const LEVEL_WIDTH: u32 = 21;
    pub const LEVEL_HEIGHT: u32 = 21;

    /// Player movement speed in pixels per second
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Radius of the player's bounding circle
    pub const PLAYER_RADIUS: f32 = 6.0;

    /// Per-frame speed jitter, integer percent (inclusive)
    pub const JITTER_MIN_PERCENT: u32 = 30;
    pub const JITTER_MAX_PERCENT: u32 = 100;

    /// Time scale applied while paused
    pub const PAUSED_TIME_SCALE: f32 = 0.01;

    /// Chebyshev radius of the tiles drawn around the player
    pub const DRAW_RADIUS: u32 = 10;
    /// Number of spiral neighbours checked for collisions (ring 1)
    pub const COLLISION_NEIGHBOURS: u32 = 8;

    /// Flicker random walk step bound in hundredths (±1.5) and clamp range
    pub const FLICKER_STEP_HUNDREDTHS: i32 = 150;
    pub const FLICKER_MAX: f32 = 64.0;

    /// Free-form blocks cached as next frame's collision candidates
    pub const NEAREST_BLOCKS: usize = 4;

    /// Weight of the previous value in the timing moving averages (out of 20)
    pub const STATS_HISTORY_WEIGHT: f64 = 19.0;
}

/// Centre of the offscreen viewport, where the player is always drawn
pub const SCREEN_CENTRE: Vec2 = Vec2::new(
    consts::VIEWPORT_WIDTH as f32 / 2.0,
    consts::VIEWPORT_HEIGHT as f32 / 2.0,
);

/// True (non-negative) modulo: result lies in `[0, m)` for any `x` and `m > 0`
#[inline]
pub fn wrap_mod(x: i32, m: i32) -> i32 {
    debug_assert!(m > 0, "modulus must be positive");
    x.rem_euclid(m)
}

/// Grid cell containing a world position (floor division by tile size)
#[inline]
pub fn cell_of(pos: Vec2) -> IVec2 {
    IVec2::new(
        (pos.x / consts::TILE_SIZE).floor() as i32,
        (pos.y / consts::TILE_SIZE).floor() as i32,
    )
}

/// Chebyshev (chessboard) distance of an offset from the origin
#[inline]
pub fn chebyshev(offset: IVec2) -> i32 {
    offset.x.abs().max(offset.y.abs())
}
