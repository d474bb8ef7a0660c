//! Camera state and the world/screen coordinate mapping shared by rendering and input.
//!
//! Everything that turns a voxel coordinate into pixels, or pixels back into a voxel
//! coordinate, goes through [`ViewProjector`]. The renderer and the pointer hit-tester
//! use the same projector, so what is drawn at a rectangle is exactly what a click inside
//! that rectangle resolves to.

mod camera;
mod projector;

pub use camera::{Camera, ViewMode};
pub use projector::{
    DEFAULT_TILE_BASE_SIZE, ScreenRect, ViewProjector, ViewWindow, screen_to_world, tile_size,
    visible_window, world_to_screen,
};
