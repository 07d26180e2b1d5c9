//! Rendering module
//!
//! Game state is turned into an ordered [`DrawList`] of viewport-space
//! primitives; [`FrameBuffer`] rasterizes the list in software and
//! letterboxes it into the window.

pub mod draw;
pub mod frame;
pub mod raster;
pub mod shapes;
pub mod tiles;
pub mod vertex;

pub use draw::{DrawCommand, DrawList};
pub use frame::{FrameReport, draw_world};
pub use raster::{FrameBuffer, Letterbox};
pub use tiles::{Face, Lighting, render_block, shade_channel, visible_faces};
pub use vertex::{Rgba8, Vertex, colors};
