//! Deterministic simulation module
//!
//! Level storage, spiral neighbourhoods, collision and depth ordering live
//! here. This module must stay deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spiral order for grids, sorted keys for blocks)
//! - No rendering or platform dependencies

pub mod collision;
pub mod depth;
pub mod level;
pub mod rect;
pub mod spiral;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, circle_rect_collision, resolve};
pub use depth::{SortKey, SortOrder, back_to_front, sort_descending, sort_keys};
pub use level::{Addressing, LevelError, LevelStore};
pub use rect::{Quad, Rect, rect_point_distance};
pub use spiral::{SpiralIter, spiral_len, spiral_offset};
pub use state::{Block, Camera, GameState, NearestBlocks, Player, World, spawn_point};
pub use tick::{Key, TickInput, tick};
