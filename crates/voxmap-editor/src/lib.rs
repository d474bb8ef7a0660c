//! Voxel map editor host.
//!
//! Ties the world, sprites, renderers, tools and effects together into an
//! [`EditorSession`] driven one frame at a time. The `voxmap` binary runs a session
//! headless and writes the resulting frame as a PNG.

pub mod activity;
pub mod maps;
pub mod preview;
pub mod session;
pub mod stats;


pub use activity::{ActivityEntry, ActivityLog};
pub use maps::MapLibrary;
pub use preview::rasterize_cubes;
pub use session::{
    BACKGROUND, EditorSession, FrameInput, FrameOutcome, FrameView, SessionError,
};
pub use stats::{FRAME_SAMPLES, FrameStats};
