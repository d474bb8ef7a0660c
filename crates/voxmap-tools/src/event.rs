//! Reports produced by tools.

use std::fmt;

use voxmap_world::VoxelPos;

/// Something a tool did or observed. The `Display` form is the line shown in the
/// activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolEvent {
    /// An inspected coordinate holds a voxel.
    Inspected { pos: VoxelPos, kind: String },
    /// An inspected coordinate is empty.
    InspectedEmpty { pos: VoxelPos },
    /// Copy-paint captured a type and is armed.
    CopyStarted { kind: String },
    /// Copy-paint was disarmed by clicking empty space.
    CopyCancelled,
    /// A voxel was stacked on top of a column.
    Placed {
        pos: VoxelPos,
        kind: String,
        above: String,
    },
    /// Stack placement found nothing to stand on.
    NoBase { x: i32, y: i32 },
}

impl fmt::Display for ToolEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inspected { pos, kind } => write!(f, "{pos} '{kind}' Voxel"),
            Self::InspectedEmpty { pos } => write!(f, "Empty space at {pos}"),
            Self::CopyStarted { kind } => write!(f, "Started copy-paint with type: {kind}"),
            Self::CopyCancelled => f.write_str("Copy-paint cancelled, clicked empty voxel"),
            Self::Placed { pos, kind, above } => {
                write!(f, "Placing {kind} at {pos} above {above}")
            }
            Self::NoBase { .. } => f.write_str("No base voxel found to place above."),
        }
    }
}
