//! Sprite lookup for voxel types: atlas documents, the per-type mapping table, and the
//! resolver that combines them.

mod atlas;
mod mapping;
mod resolver;

pub use atlas::{
    AtlasDocument, AtlasError, SpriteAtlas, SpriteDef, SpriteHandle, SpriteRect, TextureId,
};
pub use mapping::{
    DEFAULT_VOXEL_TYPES, MappingError, MappingStrategy, VoxelMapping, VoxelMappings,
};
pub use resolver::{Fallback, SpriteLookup, SpriteResolver};
