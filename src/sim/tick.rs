//! Per-frame simulation step
//!
//! Input -> desired displacement -> collision resolution -> rounded player
//! position -> camera.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve;
use super::state::{Camera, GameState};
use crate::consts::*;

/// Keys the game reacts to. Directions have a primary and an alternate binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Left,
    Down,
    Right,
    P,
    Escape,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Toggle slow-motion pause
    pub pause: bool,
    /// Escape or window close; handled by the frame loop, not the simulation
    pub quit: bool,
}

impl TickInput {
    /// Sample the held keys for this frame
    pub fn from_keys(keys: &[Key]) -> Self {
        let held = |a: Key, b: Key| keys.iter().any(|k| *k == a || *k == b);
        Self {
            up: held(Key::W, Key::Up),
            down: held(Key::S, Key::Down),
            left: held(Key::A, Key::Left),
            right: held(Key::D, Key::Right),
            pause: keys.contains(&Key::P),
            quit: keys.contains(&Key::Escape),
        }
    }

    /// Unit direction (zero when idle or when opposite keys cancel)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.paused = !state.paused;
        log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
    }
    let dt = if state.paused { dt * PAUSED_TIME_SCALE } else { dt };

    state.time_ticks += 1;

    // Drawn every frame so the RNG stream doesn't depend on input
    let jitter = state.rng.random_range(JITTER_MIN_PERCENT..=JITTER_MAX_PERCENT) as f32 / 100.0;
    let desired = state.player.raw + input.direction() * (PLAYER_SPEED * dt * jitter);

    let candidates = state.world.collision_candidates(desired);
    let resolved = resolve(desired, PLAYER_RADIUS, candidates);

    state.player.raw = resolved;
    state.player.pos = resolved.round();
    state.camera = Camera::follow(state.player.pos);
}
