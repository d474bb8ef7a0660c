//! Configuration for the voxel map editor.
//!
//! Settings persist to disk as a RON file and can be overridden from the command line.
//! Every section is `#[serde(default)]`, so files written by older or newer builds load
//! with missing fields filled in and unknown ones ignored.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AssetsConfig, CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, EffectConfig, ToolsConfig,
    ViewConfig, WindowConfig, default_config_dir,
};
pub use error::ConfigError;
