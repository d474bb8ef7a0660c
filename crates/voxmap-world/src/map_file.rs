//! JSON map format: one record per occupied voxel.
//!
//! ```json
//! [
//!   { "x": 0, "y": 0, "z": 0, "type": "grass" },
//!   { "x": 1, "y": 0, "z": 0, "type": "water" }
//! ]
//! ```
//!
//! Empty coordinates have no record and record order is not significant. Field names
//! written by the earlier tool (`X`, `Y`, `Z`, `Type`) are accepted on read.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::store::VoxelStore;
use crate::voxel::{Voxel, VoxelPos};

/// Errors that can occur while reading or writing a map file.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// Failed to read or write the file.
    #[error("map io error: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not a valid list of voxel records.
    #[error("malformed map document: {0}")]
    Parse(#[from] serde_json::Error),
    /// A map name that is empty or would leave the maps folder.
    #[error("invalid map name '{0}'")]
    InvalidName(String),
}

/// A single persisted voxel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxelRecord {
    /// X coordinate.
    #[serde(alias = "X")]
    pub x: i32,
    /// Y coordinate.
    #[serde(alias = "Y")]
    pub y: i32,
    /// Z (layer) coordinate.
    #[serde(alias = "Z")]
    pub z: i32,
    /// Voxel type tag.
    #[serde(rename = "type", alias = "Type")]
    pub kind: String,
}

impl VoxelStore {
    /// Flattens the store into records, sorted by `(z, y, x)` so saved files are stable.
    pub fn to_records(&self) -> Vec<VoxelRecord> {
        let mut records: Vec<VoxelRecord> = self
            .iter()
            .map(|(pos, voxel)| VoxelRecord {
                x: pos.x,
                y: pos.y,
                z: pos.z,
                kind: voxel.kind().to_string(),
            })
            .collect();
        records.sort_by_key(|r| (r.z, r.y, r.x));
        records
    }

    /// Builds a store from records. Later duplicates of a coordinate win.
    pub fn from_records(records: impl IntoIterator<Item = VoxelRecord>) -> Self {
        records
            .into_iter()
            .map(|r| (VoxelPos::new(r.x, r.y, r.z), Voxel::new(r.kind)))
            .collect()
    }

    /// Serializes the store as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string_pretty(&self.to_records())?)
    }

    /// Parses a JSON map document.
    ///
    /// Parsing completes before any store is built, so a malformed document never yields
    /// a partially populated store.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let records: Vec<VoxelRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Loads a map file.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let contents = std::fs::read_to_string(path)?;
        let store = Self::from_json(&contents)?;
        tracing::info!("Loaded {} voxels from {}", store.len(), path.display());
        Ok(store)
    }

    /// Writes the store to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), MapError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        tracing::info!("Saved {} voxels to {}", self.len(), path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
