//! Command-line argument parsing for the editor.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Voxmap editor command-line arguments.
///
/// CLI values override settings loaded from `config.ron`. The run-control flags
/// (`--frames`, `--output`, `--pixel-sort`, `--map`) only affect the current run and are
/// never written back.
#[derive(Parser, Debug, Default)]
#[command(name = "voxmap", about = "Voxel map editor")]
pub struct CliArgs {
    /// Output width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Zoom factor.
    #[arg(long)]
    pub scale: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Active tool (tile_inspect, copy_paint, stack_place, none).
    #[arg(long)]
    pub tool: Option<String>,

    /// Map file to open instead of the last map in the maps folder.
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Show the cube view.
    #[arg(long = "mode-3d")]
    pub mode_3d: bool,

    /// Number of frames to run.
    #[arg(long, default_value_t = 1)]
    pub frames: u32,

    /// Write the last frame to this PNG file.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Run the pixel-sort effect to completion before writing the frame.
    #[arg(long)]
    pub pixel_sort: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(scale) = args.scale {
            self.camera.scale = scale;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref tool) = args.tool {
            self.tools.active = tool.clone();
        }
        if args.mode_3d {
            self.camera.use_3d = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            scale: Some(5.0),
            tool: Some("stack_place".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.camera.scale, 5.0);
        assert_eq!(config.tools.active, "stack_place");
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert!(!config.camera.use_3d);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "voxmap",
            "--mode-3d",
            "--frames",
            "10",
            "--pixel-sort",
            "--output",
            "out.png",
            "--log-level",
            "debug",
        ]);
        assert!(args.mode_3d);
        assert!(args.pixel_sort);
        assert_eq!(args.frames, 10);
        assert_eq!(args.output, Some(PathBuf::from("out.png")));

        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert!(config.camera.use_3d);
        assert_eq!(config.debug.log_level, "debug");
    }

    #[test]
    fn test_frames_default_to_one() {
        let args = CliArgs::parse_from(["voxmap"]);
        assert_eq!(args.frames, 1);
        assert!(args.map.is_none());
    }
}
