//! Sparse voxel world: typed voxels addressed by unbounded integer coordinates, plus the
//! JSON map format used to persist them.

pub mod map_file;
pub mod store;
pub mod voxel;

pub use map_file::{MapError, VoxelRecord};
pub use store::VoxelStore;
pub use voxel::{Voxel, VoxelPos};
