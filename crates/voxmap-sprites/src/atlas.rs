//! Sprite atlases: JSON documents describing named regions of a texture, and the registry
//! that merges several of them under namespaced keys.
//!
//! A document looks like:
//!
//! ```json
//! {
//!   "textureFile": "assets.png",
//!   "tileWidth": 16,
//!   "tileHeight": 16,
//!   "sprites": [ { "name": "grass_5_0", "x": 80, "y": 0, "w": 16, "h": 16 } ]
//! }
//! ```
//!
//! Sprites are registered as `"<atlas file stem>:<sprite name>"`, so the sprite above
//! loaded from `assets.atlas.json` is `assets.atlas:grass_5_0`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// AtlasError
// ---------------------------------------------------------------------------

/// Errors returned while loading an atlas document.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Failed to read the document.
    #[error("atlas io error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid atlas JSON.
    #[error("malformed atlas document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document does not name a texture.
    #[error("atlas {0} does not name a texture file")]
    MissingTextureName(PathBuf),

    /// The texture named by the document does not exist.
    #[error("texture not found: {0}")]
    TextureNotFound(PathBuf),
}

// ---------------------------------------------------------------------------
// Document types
// ---------------------------------------------------------------------------

/// Pixel rectangle inside a texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

/// One named sprite in an atlas document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteDef {
    /// Sprite name, unique within its atlas.
    #[serde(alias = "Name")]
    pub name: String,
    /// Left edge in pixels.
    #[serde(alias = "X")]
    pub x: u32,
    /// Top edge in pixels.
    #[serde(alias = "Y")]
    pub y: u32,
    /// Width in pixels.
    #[serde(alias = "W")]
    pub w: u32,
    /// Height in pixels.
    #[serde(alias = "H")]
    pub h: u32,
}

impl SpriteDef {
    /// Source rectangle of this sprite.
    pub fn rect(&self) -> SpriteRect {
        SpriteRect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

/// An atlas document as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasDocument {
    /// Texture path, relative to the document.
    #[serde(alias = "texture", alias = "Texture")]
    pub texture_file: String,
    /// Grid cell width used when the atlas was sliced.
    #[serde(default, alias = "TileWidth")]
    pub tile_width: u32,
    /// Grid cell height used when the atlas was sliced.
    #[serde(default, alias = "TileHeight")]
    pub tile_height: u32,
    /// Named sprite regions.
    #[serde(default, alias = "Sprites")]
    pub sprites: Vec<SpriteDef>,
}

impl AtlasDocument {
    /// Parses a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, AtlasError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the document as pretty JSON.
    pub fn to_json(&self) -> Result<String, AtlasError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// SpriteAtlas
// ---------------------------------------------------------------------------

/// Index of a texture registered with a [`SpriteAtlas`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Renderable sprite: an opaque texture handle plus the source rectangle within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteHandle {
    /// Texture holding the sprite.
    pub texture: TextureId,
    /// Region of the texture to draw.
    pub source: SpriteRect,
}

/// Registry of sprites from any number of atlas documents.
///
/// Textures shared between documents are registered once.
#[derive(Debug, Default)]
pub struct SpriteAtlas {
    sprites: HashMap<String, SpriteHandle>,
    textures: Vec<PathBuf>,
    texture_ids: HashMap<PathBuf, TextureId>,
    atlas_files: Vec<PathBuf>,
}

impl SpriteAtlas {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an atlas document and registers its sprites.
    ///
    /// Returns the number of sprites registered. Nothing is registered unless the whole
    /// document parses and its texture exists.
    pub fn load(&mut self, path: &Path) -> Result<usize, AtlasError> {
        let doc = AtlasDocument::from_json(&std::fs::read_to_string(path)?)?;
        if doc.texture_file.trim().is_empty() {
            return Err(AtlasError::MissingTextureName(path.to_path_buf()));
        }

        let dir = path.parent().unwrap_or(Path::new(""));
        let texture_path = dir.join(&doc.texture_file);
        if !texture_path.is_file() {
            return Err(AtlasError::TextureNotFound(texture_path));
        }
        let texture_path = std::fs::canonicalize(&texture_path)?;

        let namespace = atlas_namespace(path);
        let count = self.insert_document(&namespace, &doc, texture_path);
        if !self.atlas_files.iter().any(|f| f == path) {
            self.atlas_files.push(path.to_path_buf());
        }
        tracing::info!("Loaded atlas '{}' with {} sprites", namespace, count);
        Ok(count)
    }

    /// Registers the sprites of an already parsed document under `namespace`.
    ///
    /// Existing keys are overwritten. Returns the number of sprites registered.
    pub fn insert_document(
        &mut self,
        namespace: &str,
        doc: &AtlasDocument,
        texture_path: PathBuf,
    ) -> usize {
        let texture = self.texture_id(texture_path);
        for sprite in &doc.sprites {
            self.sprites.insert(
                format!("{namespace}:{}", sprite.name),
                SpriteHandle {
                    texture,
                    source: sprite.rect(),
                },
            );
        }
        doc.sprites.len()
    }

    /// Looks up a sprite by its namespaced key.
    pub fn get(&self, key: &str) -> Option<SpriteHandle> {
        self.sprites.get(key).copied()
    }

    /// Returns `true` if `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.sprites.contains_key(key)
    }

    /// All sprite keys, sorted.
    pub fn sprite_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.sprites.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Returns `true` if no sprites are registered.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Atlas documents loaded from disk, in load order.
    pub fn atlas_files(&self) -> &[PathBuf] {
        &self.atlas_files
    }

    /// Texture paths indexed by [`TextureId`].
    pub fn textures(&self) -> &[PathBuf] {
        &self.textures
    }

    /// Path of the given texture.
    pub fn texture_path(&self, id: TextureId) -> Option<&Path> {
        self.textures.get(id.0 as usize).map(PathBuf::as_path)
    }

    fn texture_id(&mut self, path: PathBuf) -> TextureId {
        if let Some(id) = self.texture_ids.get(&path) {
            return *id;
        }
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(path.clone());
        self.texture_ids.insert(path, id);
        id
    }
}

/// Namespace for an atlas file: the file name without its final extension.
fn atlas_namespace(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
