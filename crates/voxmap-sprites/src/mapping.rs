//! Per-voxel-type sprite configuration.
//!
//! Persisted as a flat JSON object keyed by voxel type:
//!
//! ```json
//! { "grass": { "spriteKey": "assets.atlas:grass_5_0", "strategy": "Simple" } }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Voxel types present in a fresh mapping table.
pub const DEFAULT_VOXEL_TYPES: [&str; 4] = ["grass", "dirt", "water", "sword"];

/// Errors returned while editing or persisting the mapping table.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Failed to read or write the mapping file.
    #[error("mapping io error: {0}")]
    Io(#[from] std::io::Error),
    /// The mapping file is not valid JSON of the expected shape.
    #[error("malformed mapping document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The type name is empty after trimming.
    #[error("voxel type name is empty")]
    EmptyName,
    /// The type is already present.
    #[error("voxel type '{0}' already exists")]
    Duplicate(String),
    /// The type is not present.
    #[error("voxel type '{0}' is not mapped")]
    UnknownType(String),
}

/// How sprite selection varies for a voxel type.
///
/// Only [`Simple`](Self::Simple) has renderer behaviour; the other two select the same
/// sprite key as `Simple` until context-aware selection exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum MappingStrategy {
    /// Always the same sprite.
    #[default]
    Simple,
    /// Chosen from the surrounding tiles.
    Contextual2D,
    /// Chosen from the voxel's orientation.
    Oriented3D,
}

impl MappingStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [MappingStrategy; 3] = [Self::Simple, Self::Contextual2D, Self::Oriented3D];

    fn from_index(index: u64) -> Option<Self> {
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.to_string().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for MappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simple => "Simple",
            Self::Contextual2D => "Contextual2D",
            Self::Oriented3D => "Oriented3D",
        })
    }
}

// Older files store the strategy as its integer index.
impl<'de> Deserialize<'de> for MappingStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Index(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(name) => Self::from_name(&name)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown strategy '{name}'"))),
            Repr::Index(index) => Self::from_index(index)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown strategy index {index}"))),
        }
    }
}

/// Sprite configuration for one voxel type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoxelMapping {
    /// Namespaced atlas key; empty means "not yet assigned".
    #[serde(default, alias = "SpriteKey")]
    pub sprite_key: String,
    /// Selection strategy.
    #[serde(default, alias = "Strategy")]
    pub strategy: MappingStrategy,
}

impl VoxelMapping {
    /// Mapping with a simple sprite key.
    pub fn simple(sprite_key: impl Into<String>) -> Self {
        Self {
            sprite_key: sprite_key.into(),
            strategy: MappingStrategy::Simple,
        }
    }
}

/// Mapping table from voxel type to [`VoxelMapping`].
///
/// Edits are visible to the next resolve; nothing downstream caches resolved sprites.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoxelMappings {
    entries: BTreeMap<String, VoxelMapping>,
}

impl VoxelMappings {
    /// Creates a table with no types at all.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the mapping for `voxel_type`.
    pub fn get(&self, voxel_type: &str) -> Option<&VoxelMapping> {
        self.entries.get(voxel_type)
    }

    /// Inserts or replaces the mapping for `voxel_type` verbatim.
    pub fn insert(&mut self, voxel_type: impl Into<String>, mapping: VoxelMapping) {
        self.entries.insert(voxel_type.into(), mapping);
    }

    /// Adds a new, unassigned voxel type.
    ///
    /// The name is trimmed and lowercased. Returns the normalized name.
    pub fn add_type(&mut self, name: &str) -> Result<String, MappingError> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return Err(MappingError::EmptyName);
        }
        if self.entries.contains_key(&key) {
            return Err(MappingError::Duplicate(key));
        }
        self.entries.insert(key.clone(), VoxelMapping::default());
        tracing::info!("Voxel type '{}' added", key);
        Ok(key)
    }

    /// Assigns the sprite key for an existing type.
    pub fn set_sprite_key(&mut self, voxel_type: &str, key: impl Into<String>) -> Result<(), MappingError> {
        self.entry_mut(voxel_type)?.sprite_key = key.into();
        Ok(())
    }

    /// Assigns the strategy for an existing type.
    pub fn set_strategy(&mut self, voxel_type: &str, strategy: MappingStrategy) -> Result<(), MappingError> {
        self.entry_mut(voxel_type)?.strategy = strategy;
        Ok(())
    }

    /// Iterates over all types in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VoxelMapping)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Types whose name contains `filter`, case-insensitively. An empty filter matches all.
    pub fn filter<'a>(&'a self, filter: &str) -> impl Iterator<Item = (&'a str, &'a VoxelMapping)> + use<'a> {
        let needle = filter.to_lowercase();
        self.iter()
            .filter(move |(name, _)| needle.is_empty() || name.to_lowercase().contains(&needle))
    }

    /// Number of mapped types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no types are mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges the table stored at `path` over the current entries.
    ///
    /// A missing file is not an error and leaves the table unchanged. Returns the number
    /// of entries read.
    pub fn load_from_file(&mut self, path: &Path) -> Result<usize, MappingError> {
        if !path.exists() {
            tracing::debug!("No mapping file at {}", path.display());
            return Ok(0);
        }
        let loaded: BTreeMap<String, VoxelMapping> =
            serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let count = loaded.len();
        self.entries.extend(loaded);
        tracing::info!("Loaded {} voxel mappings from {}", count, path.display());
        Ok(count)
    }

    /// Writes the table to `path` as pretty JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<(), MappingError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::info!("Voxel mappings saved to {}", path.display());
        Ok(())
    }

    fn entry_mut(&mut self, voxel_type: &str) -> Result<&mut VoxelMapping, MappingError> {
        self.entries
            .get_mut(voxel_type)
            .ok_or_else(|| MappingError::UnknownType(voxel_type.to_string()))
    }
}

impl Default for VoxelMappings {
    fn default() -> Self {
        Self {
            entries: DEFAULT_VOXEL_TYPES
                .iter()
                .map(|t| (t.to_string(), VoxelMapping::default()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
