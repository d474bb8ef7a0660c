//! Voxel type -> sprite resolution.

use std::fmt;

use voxmap_world::Voxel;

use crate::atlas::{SpriteAtlas, SpriteHandle};
use crate::mapping::VoxelMappings;

/// Source of sprites by namespaced key.
pub trait SpriteLookup {
    /// Returns the sprite registered under `key`.
    fn sprite(&self, key: &str) -> Option<SpriteHandle>;
}

impl SpriteLookup for SpriteAtlas {
    fn sprite(&self, key: &str) -> Option<SpriteHandle> {
        self.get(key)
    }
}

/// Why a voxel type has no sprite. Callers treat all three the same way (draw a
/// placeholder); the distinction is for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// The type has no entry in the mapping table.
    Unmapped,
    /// The entry exists but no sprite key is assigned.
    EmptyKey,
    /// The key does not exist in any loaded atlas.
    MissingSprite,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unmapped => "no mapping",
            Self::EmptyKey => "mapping has no sprite key",
            Self::MissingSprite => "sprite not in atlas",
        })
    }
}

/// Resolves voxel types to sprites through the mapping table and an atlas.
///
/// Borrows both collaborators for the duration of a frame so mapping edits made between
/// frames are picked up immediately.
#[derive(Clone, Copy)]
pub struct SpriteResolver<'a> {
    mappings: &'a VoxelMappings,
    atlas: &'a dyn SpriteLookup,
}

impl<'a> SpriteResolver<'a> {
    /// Creates a resolver over the given mapping table and atlas.
    pub fn new(mappings: &'a VoxelMappings, atlas: &'a dyn SpriteLookup) -> Self {
        Self { mappings, atlas }
    }

    /// Returns the sprite for `voxel_type`, or `None` if any fallback applies.
    pub fn resolve(&self, voxel_type: &str) -> Option<SpriteHandle> {
        self.lookup(voxel_type).ok()
    }

    /// Returns the sprite for `voxel`.
    pub fn resolve_voxel(&self, voxel: &Voxel) -> Option<SpriteHandle> {
        self.resolve(voxel.kind())
    }

    /// Like [`resolve`](Self::resolve), but reports which fallback applied.
    pub fn lookup(&self, voxel_type: &str) -> Result<SpriteHandle, Fallback> {
        let mapping = self.mappings.get(voxel_type).ok_or(Fallback::Unmapped)?;
        if mapping.sprite_key.is_empty() {
            return Err(Fallback::EmptyKey);
        }
        // Every strategy currently selects by the plain key.
        self.atlas
            .sprite(&mapping.sprite_key)
            .ok_or(Fallback::MissingSprite)
    }
}

impl fmt::Debug for SpriteResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpriteResolver")
            .field("mappings", &self.mappings.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
