//! Rendering module
//!
//! The simulation never touches pixels. `draw_scene` walks the game state and
//! emits an ordered list of abstract draw commands; whatever implements
//! `Surface` turns them into pixels.

pub mod commands;
pub mod raster;
pub mod scene;

pub use commands::{DrawCommand, Surface, palette};
pub use raster::{Framebuffer, Label};
pub use scene::draw_scene;
