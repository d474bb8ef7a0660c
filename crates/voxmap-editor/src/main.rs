//! Headless editor binary: loads the config, assets and a map, runs frames through the
//! session, and writes the last frame to a PNG.
//!
//! Run with `cargo run -p voxmap-editor -- --map maps/island.json --output frame.png`.
//! Add `--pixel-sort` to run the sort effect to completion, or `--mode-3d` for the cube
//! preview.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use voxmap_config::{CliArgs, Config, default_config_dir};
use voxmap_editor::{BACKGROUND, EditorSession, FrameInput, FrameView, SessionError, rasterize_cubes};
use voxmap_render::{Canvas, CubeDraw};
use voxmap_tools::PointerState;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    voxmap_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs, config: Config) -> Result<(), SessionError> {
    let (width, height) = (config.window.width, config.window.height);
    let mut session = EditorSession::new(config)?;

    let sprites = session.load_assets();
    info!("{} sprites, {} voxel types mapped", sprites, session.mappings().len());
    match session.open_startup_map(args.map.as_deref()) {
        Some(path) => info!("Editing {}", path.display()),
        None => info!("No map loaded, starting with an empty world"),
    }

    let textures = session.textures();
    let mut pointer = PointerState::new();
    pointer.on_cursor_moved(f64::from(width) / 2.0, f64::from(height) / 2.0);

    let mut frame = Canvas::new(width, height, &textures);
    let mut index = 0u32;
    let mut last = Instant::now();
    loop {
        let more_frames = index < args.frames.max(1);
        let sorting = args.pixel_sort && (index == 0 || session.effect().is_running());
        if !more_frames && !sorting {
            break;
        }

        let now = Instant::now();
        let input = FrameInput {
            dt: now - last,
            pointer: pointer.clone(),
            ui_wants_pointer: false,
            trigger_effect: args.pixel_sort && index == 0,
        };
        last = now;

        frame.clear(BACKGROUND);
        let mut cubes: Vec<CubeDraw> = Vec::new();
        let outcome = session.frame(&input, &mut frame, &mut cubes);
        if let FrameView::Cubes(_) = outcome.view {
            rasterize_cubes(&cubes, &session.config().camera, &mut frame);
        }
        pointer.clear_transients();
        index += 1;
    }

    info!(
        "Ran {} frames, {:.2} ms average",
        session.stats().total_frames(),
        session.stats().average_ms()
    );

    if let Some(output) = &args.output {
        frame.image().save(output)?;
        info!("Wrote frame to {}", output.display());
    }

    for entry in session.activity().entries() {
        println!("{entry}");
    }
    Ok(())
}
