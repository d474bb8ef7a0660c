//! World rendering: draw-command emission for the 2D tile view and the 3D cube view,
//! plus a software canvas that rasterizes draw commands into an RGBA image.

pub mod canvas;
pub mod cubes;
pub mod draw;
pub mod world;

pub use canvas::{Canvas, TextureSet};
pub use cubes::{CubeDraw, CubeRenderer, CubeSink, type_color};
pub use draw::{DrawCommand, DrawList, DrawSink, HIGHLIGHT_COLOR, PLACEHOLDER_COLOR};
pub use world::{RenderStats, WorldRenderer};
