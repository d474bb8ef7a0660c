//! Pointer-driven editing tools.
//!
//! Each frame the host feeds a [`PointerState`] and the current [`ViewProjector`] to the
//! [`ToolDispatcher`], which resolves the hovered voxel and forwards hover and click events
//! to the single active [`Tool`]. Tools read and write the [`VoxelStore`] directly and
//! report what they did as [`ToolEvent`]s.
//!
//! [`ViewProjector`]: voxmap_view::ViewProjector
//! [`VoxelStore`]: voxmap_world::VoxelStore

pub mod dispatcher;
pub mod event;
pub mod pointer;
pub mod tools;

pub use dispatcher::{Dispatch, ToolDispatcher};
pub use event::ToolEvent;
pub use pointer::{ButtonState, PointerState};
pub use tools::{
    CopyPaint, STACK_SCAN_TOP, StackPlace, TileHit, TileInspect, Tool, ToolContext, ToolKind,
    UnknownTool,
};
