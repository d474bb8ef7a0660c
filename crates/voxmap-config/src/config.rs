//! Configuration structs with editor defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Smallest zoom ever handed to the renderer.
const SCALE_FLOOR: f32 = 0.01;

/// `<platform config dir>/voxmap`, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("voxmap"))
}

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output surface settings.
    pub window: WindowConfig,
    /// Camera and zoom.
    pub camera: CameraConfig,
    /// Tile view parameters.
    pub view: ViewConfig,
    /// Tool selection.
    pub tools: ToolsConfig,
    /// Post-effect tuning.
    pub effect: EffectConfig,
    /// Asset and map locations.
    pub assets: AssetsConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Output surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Camera configuration.
///
/// The 2D view centres on `position.x`, `position.y` at layer `layer`. `position`,
/// `target` and `fov_y` also describe the perspective camera of the cube view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position.
    pub position: [f32; 3],
    /// Point the 3D camera looks at.
    pub target: [f32; 3],
    /// Lowest layer drawn by the 2D view.
    pub layer: i32,
    /// Zoom factor.
    pub scale: f32,
    /// Lower zoom bound.
    pub min_scale: f32,
    /// Upper zoom bound.
    pub max_scale: f32,
    /// Show the cube view instead of the tile view.
    pub use_3d: bool,
    /// Vertical field of view in degrees (cube view).
    pub fov_y: f32,
}

/// Tile view configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Tile edge in pixels at zoom 1.
    pub tile_base_size: u32,
    /// Number of layers drawn upward from the camera layer.
    pub render_depth: u32,
    /// Cube edge length in the 3D view.
    pub cube_size: f32,
}

/// Tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolsConfig {
    /// Active tool: `tile_inspect`, `copy_paint`, `stack_place` or `none`.
    pub active: String,
    /// Voxel type placed by the stack tool.
    pub stack_place_type: String,
}

/// Post-effect configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectConfig {
    /// Pixels finalized per frame by the pixel sort.
    pub pixels_per_frame: usize,
}

/// Asset locations. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Atlas documents loaded at startup.
    pub atlases: Vec<PathBuf>,
    /// Voxel type to sprite mapping file.
    pub mappings: PathBuf,
    /// Folder holding map files.
    pub maps_dir: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log frame statistics.
    pub show_stats: bool,
    /// Log the hovered tile each frame.
    pub show_tile_info: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Voxmap Editor".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [30.0, 20.0, 30.0],
            target: [10.0, 0.0, 10.0],
            layer: 0,
            scale: 3.0,
            min_scale: 1.0,
            max_scale: 8.0,
            use_3d: false,
            fov_y: 60.0,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tile_base_size: 16,
            render_depth: 4,
            cube_size: 1.0,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            active: "tile_inspect".to_string(),
            stack_place_type: "grass".to_string(),
        }
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            pixels_per_frame: 50_000,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            atlases: Vec::new(),
            mappings: PathBuf::from("voxel_mappings.json"),
            maps_dir: PathBuf::from("maps"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_stats: false,
            show_tile_info: false,
        }
    }
}

impl CameraConfig {
    /// `scale` clamped into `[min_scale, max_scale]`, never below a small positive floor.
    pub fn clamped_scale(&self) -> f32 {
        let lo = self.min_scale.max(SCALE_FLOOR);
        let hi = self.max_scale.max(lo);
        if self.scale.is_nan() {
            return lo;
        }
        self.scale.clamp(lo, hi)
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Rejects values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view.tile_base_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "view.tile_base_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.camera.max_scale < self.camera.min_scale {
            return Err(ConfigError::InvalidValue {
                field: "camera.max_scale",
                reason: format!(
                    "{} is below min_scale {}",
                    self.camera.max_scale, self.camera.min_scale
                ),
            });
        }
        if self.view.cube_size.is_nan() || self.view.cube_size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "view.cube_size",
                reason: "must be positive".to_string(),
            });
        }
        if self.effect.pixels_per_frame == 0 {
            return Err(ConfigError::InvalidValue {
                field: "effect.pixels_per_frame",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}
