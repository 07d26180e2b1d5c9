//! Game state and core simulation types
//!
//! Everything the update and draw steps touch lives in [`GameState`]; there
//! is no global state, so independent instances can run side by side.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::level::{Addressing, LevelError, LevelStore};
use super::rect::Rect;
use crate::consts::*;
use crate::settings::{ChannelOverflow, Settings, WorldKind};
use crate::{SCREEN_CENTRE, cell_of};

/// Fixed level: a walled room with pillars and a few interior walls
const FIXED_LEVEL: [&str; 21] = [
    "#####################",
    "#...................#",
    "#...................#",
    "#...##.......##.....#",
    "#...##.......##.....#",
    "#...................#",
    "#.........#.........#",
    "#.........#.........#",
    "#.....#########.....#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#.##.............##.#",
    "#.##......#......##.#",
    "#.........#.........#",
    "#.........#.........#",
    "#...######.######...#",
    "#...................#",
    "#...................#",
    "#...................#",
    "#####################",
];

/// Hand-placed free-form blocks; more are scattered at random
const FREE_FORM_BLOCKS: [(f32, f32, f32, f32, f32); 5] = [
    (150.0, 80.0, 40.0, 40.0, 1.0),
    (1200.0, 700.0, 40.0, 40.0, 1.5),
    (200.0, 600.0, 40.0, 40.0, 2.0),
    (1000.0, 50.0, 40.0, 40.0, 1.0),
    (500.0, 350.0, 40.0, 40.0, 1.25),
];
const FREE_FORM_RANDOM_BLOCKS: usize = 15;
const FREE_FORM_AREA: Vec2 = Vec2::new(1280.0, 800.0);

/// The player: continuous position plus its per-frame rounded placement
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Unrounded position that movement and collision act on
    pub raw: Vec2,
    /// `raw` rounded to whole pixels; camera and drawing use this
    pub pos: Vec2,
}

impl Player {
    pub fn at(pos: Vec2) -> Self {
        Self {
            raw: pos,
            pos: pos.round(),
        }
    }
}

/// Screen mapping derived from the player's rounded position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    /// Added to world positions to get screen positions
    pub offset: Vec2,
    /// World position of the viewport's top-left corner
    pub viewport_pos: Vec2,
}

impl Camera {
    pub fn follow(pos: Vec2) -> Self {
        Self {
            offset: SCREEN_CENTRE - pos,
            viewport_pos: pos - SCREEN_CENTRE,
        }
    }
}

/// A free-form obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub rect: Rect,
    /// Projection scale: larger values extrude less
    pub height: f32,
}

/// Indices of the blocks nearest the player, farthest of them first.
///
/// Holds at most [`NEAREST_BLOCKS`] entries; the draw step refills it and the
/// next update uses it as the collision candidate set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NearestBlocks {
    slots: [usize; NEAREST_BLOCKS],
    len: usize,
}

impl NearestBlocks {
    pub const CAPACITY: usize = NEAREST_BLOCKS;

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append an index; returns false when full
    pub fn push(&mut self, index: usize) -> bool {
        if self.len == Self::CAPACITY {
            return false;
        }
        self.slots[self.len] = index;
        self.len += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.slots[..self.len]
    }
}

/// The level geometry of the active world variant
#[derive(Debug, Clone)]
pub enum World {
    /// Bit grid, wrapping (infinite) or absolute (fixed)
    Grid(LevelStore),
    /// Free-form blocks with the nearest-block cache
    Blocks {
        blocks: Vec<Block>,
        nearest: NearestBlocks,
    },
}

impl World {
    /// Toroidal repeat of a diagonal wall
    pub fn infinite() -> Result<Self, LevelError> {
        let mut level = LevelStore::new(LEVEL_WIDTH, LEVEL_HEIGHT, Addressing::Wrapping)?;
        for i in 0..LEVEL_WIDTH.min(LEVEL_HEIGHT) as i32 {
            level.set(IVec2::new(i, i), true);
        }
        Ok(World::Grid(level))
    }

    pub fn fixed() -> Result<Self, LevelError> {
        Ok(World::Grid(LevelStore::from_rows(
            &FIXED_LEVEL,
            Addressing::Absolute,
        )?))
    }

    /// Hand-placed blocks plus random ones, none overlapping the spawn point
    pub fn free_form(rng: &mut Pcg32, spawn: Vec2) -> Self {
        let mut blocks: Vec<Block> = FREE_FORM_BLOCKS
            .iter()
            .map(|&(x, y, w, h, height)| Block {
                rect: Rect::new(x, y, w, h),
                height,
            })
            .collect();

        for _ in 0..FREE_FORM_RANDOM_BLOCKS {
            let rect = Rect::new(
                rng.random_range(0.0..FREE_FORM_AREA.x),
                rng.random_range(0.0..FREE_FORM_AREA.y),
                rng.random_range(10.0..100.0),
                rng.random_range(10.0..100.0),
            );
            let height = rng.random_range(0.75..2.5);
            blocks.push(Block { rect, height });
        }

        let clearance = Rect::new(
            spawn.x - PLAYER_RADIUS,
            spawn.y - PLAYER_RADIUS,
            PLAYER_RADIUS * 2.0,
            PLAYER_RADIUS * 2.0,
        );
        blocks.retain(|b| !b.rect.intersects(&clearance));

        World::Blocks {
            blocks,
            nearest: NearestBlocks::default(),
        }
    }

    /// Obstacles the player can touch this frame
    pub fn collision_candidates(&self, raw: Vec2) -> Vec<Rect> {
        match self {
            World::Grid(level) => {
                let cell = cell_of(raw);
                super::spiral::SpiralIter::neighbours()
                    .map(|(_, rel)| cell + rel)
                    .filter(|c| level.get(*c))
                    .map(|c| Rect::square(c.as_vec2() * TILE_SIZE, TILE_SIZE))
                    .collect()
            }
            World::Blocks { blocks, nearest } => nearest
                .as_slice()
                .iter()
                .filter_map(|&i| blocks.get(i).map(|b| b.rect))
                .collect(),
        }
    }
}

/// Where the player starts in each world variant
pub fn spawn_point(kind: WorldKind) -> Vec2 {
    match kind {
        WorldKind::Infinite => Vec2::new(48.0, 16.0),
        WorldKind::Fixed => Vec2::new(48.0, 48.0),
        WorldKind::FreeForm => Vec2::new(600.0, 400.0),
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG for movement jitter and flicker
    pub rng: Pcg32,
    pub player: Player,
    pub camera: Camera,
    pub world: World,
    /// Lantern flicker random walk in `[0, FLICKER_MAX]`
    pub flicker: f32,
    pub flicker_enabled: bool,
    pub overflow: ChannelOverflow,
    /// Slow-motion pause
    pub paused: bool,
    /// Update steps taken
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(seed: u64, kind: WorldKind) -> Result<Self, LevelError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn = spawn_point(kind);
        let world = match kind {
            WorldKind::Infinite => World::infinite()?,
            WorldKind::Fixed => World::fixed()?,
            WorldKind::FreeForm => World::free_form(&mut rng, spawn),
        };
        let player = Player::at(spawn);
        let camera = Camera::follow(player.pos);

        Ok(Self {
            seed,
            rng,
            player,
            camera,
            world,
            flicker: 0.0,
            flicker_enabled: true,
            overflow: ChannelOverflow::default(),
            paused: false,
            time_ticks: 0,
        })
    }

    /// Build the state described by the settings
    pub fn from_settings(settings: &Settings) -> Result<Self, LevelError> {
        let mut state = Self::new(settings.seed, settings.world)?;
        state.overflow = settings.channel_overflow;
        state.flicker_enabled = settings.effective_flicker();
        Ok(state)
    }

    /// Advance the flicker random walk by one frame
    pub fn step_flicker(&mut self) {
        if !self.flicker_enabled {
            return;
        }
        // Whole hundredths, like the jitter percentages
        let step = self.rng.random_range(-FLICKER_STEP_HUNDREDTHS..=FLICKER_STEP_HUNDREDTHS);
        let step = step as f32 / 100.0;
        self.flicker = (self.flicker + step).clamp(0.0, FLICKER_MAX);
    }
}
