//! Voxel values and world coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A typed unit of world content.
///
/// The only payload is the semantic type tag (e.g. "grass", "water"). A voxel has no
/// identity beyond the coordinate it is stored at, and is replaced wholesale rather than
/// edited in place, so there is deliberately no setter for the type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Voxel {
    kind: String,
}

impl Voxel {
    /// Creates a voxel of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// Returns the semantic type tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl fmt::Display for Voxel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)
    }
}

/// Integer world coordinate of a voxel. All components are unbounded signed integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelPos {
    /// Horizontal axis.
    pub x: i32,
    /// Vertical screen axis in the 2D view.
    pub y: i32,
    /// Layer (height) axis.
    pub z: i32,
}

impl VoxelPos {
    /// Creates a coordinate from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate directly above this one (`z + 1`).
    pub const fn above(self) -> Self {
        Self::new(self.x, self.y, self.z + 1)
    }
}

impl From<(i32, i32, i32)> for VoxelPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for VoxelPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
