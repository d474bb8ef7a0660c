//! The editor session: world, assets, tools, and the per-frame loop.
//!
//! [`EditorSession`] owns everything a frame touches and nothing is read from ambient
//! state: the camera is rebuilt from [`Config`] every frame and handed to the renderer and
//! the dispatcher by value.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use glam::{IVec2, Vec3};
use image::Rgba;
use voxmap_config::{Config, ConfigError};
use voxmap_effect::PixelSorter;
use voxmap_render::{
    Canvas, CubeRenderer, CubeSink, DrawSink, RenderStats, TextureSet, WorldRenderer,
};
use voxmap_sprites::{AtlasError, MappingError, SpriteAtlas, SpriteResolver, VoxelMappings};
use voxmap_tools::{PointerState, ToolDispatcher, ToolEvent, ToolKind, UnknownTool};
use voxmap_view::{Camera, ViewMode, ViewProjector};
use voxmap_world::{MapError, VoxelStore};

use crate::activity::ActivityLog;
use crate::maps::MapLibrary;
use crate::stats::FrameStats;

/// Clear colour of every frame.
pub const BACKGROUND: Rgba<u8> = Rgba([24, 24, 28, 255]);

/// Frames between stats lines when `debug.show_stats` is on.
const STATS_INTERVAL: u64 = 60;

/// Errors surfaced by the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Map file could not be read or written.
    #[error(transparent)]
    Map(#[from] MapError),
    /// Atlas document could not be loaded.
    #[error(transparent)]
    Atlas(#[from] AtlasError),
    /// Mapping table could not be loaded or saved.
    #[error(transparent)]
    Mapping(#[from] MappingError),
    /// Configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Configured tool name is not known.
    #[error(transparent)]
    UnknownTool(#[from] UnknownTool),
    /// Frame could not be encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Host input for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Time since the previous frame.
    pub dt: Duration,
    /// Pointer state collected this frame.
    pub pointer: PointerState,
    /// A UI widget owns the pointer; tools must not react.
    pub ui_wants_pointer: bool,
    /// Start the pixel-sort effect from the current map view.
    pub trigger_effect: bool,
}

/// What a frame showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameView {
    /// The 2D tile view.
    Tiles(RenderStats),
    /// The cube view; number of cubes.
    Cubes(usize),
    /// The pixel-sort effect.
    Effect {
        /// Pixels finalized so far.
        sorted: usize,
        /// Pixels in the captured frame.
        total: usize,
    },
}

/// Result of [`EditorSession::frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOutcome {
    /// What was drawn.
    pub view: FrameView,
    /// Voxel column under the pointer, when tools ran.
    pub hovered: Option<IVec2>,
    /// Tool reports, also appended to the activity log.
    pub events: Vec<ToolEvent>,
}

/// One editing session.
#[derive(Debug)]
pub struct EditorSession {
    config: Config,
    store: VoxelStore,
    current_map: Option<PathBuf>,
    atlas: SpriteAtlas,
    textures: Arc<TextureSet>,
    mappings: VoxelMappings,
    renderer: WorldRenderer,
    cubes: CubeRenderer,
    dispatcher: ToolDispatcher,
    sorter: PixelSorter,
    activity: ActivityLog,
    stats: FrameStats,
}

impl EditorSession {
    /// Creates a session with an empty world and no assets.
    pub fn new(config: Config) -> Result<Self, SessionError> {
        config.validate()?;
        let tool: ToolKind = config.tools.active.parse()?;
        Ok(Self {
            renderer: WorldRenderer::new(config.view.tile_base_size),
            cubes: CubeRenderer::new(config.view.cube_size),
            dispatcher: ToolDispatcher::new(tool),
            config,
            store: VoxelStore::new(),
            current_map: None,
            atlas: SpriteAtlas::new(),
            textures: Arc::new(TextureSet::new()),
            mappings: VoxelMappings::default(),
            sorter: PixelSorter::new(),
            activity: ActivityLog::new(),
            stats: FrameStats::new(),
        })
    }

    // ── Assets and maps ─────────────────────────────────────────────

    /// Loads the configured atlases, their textures, and the mapping table.
    ///
    /// Individual failures are reported to the activity log and skipped. Returns the
    /// number of sprites registered.
    pub fn load_assets(&mut self) -> usize {
        let mut sprites = 0;
        for path in self.config.assets.atlases.clone() {
            match self.atlas.load(&path) {
                Ok(n) => sprites += n,
                Err(e) => {
                    tracing::warn!("Failed to load atlas {}: {}", path.display(), e);
                    self.activity
                        .write(format!("Failed to load atlas {}: {}", path.display(), e));
                }
            }
        }
        self.textures = Arc::new(TextureSet::load(&self.atlas));

        let mappings_path = self.config.assets.mappings.clone();
        if let Err(e) = self.mappings.load_from_file(&mappings_path) {
            tracing::warn!("Failed to load voxel mappings: {}", e);
            self.activity.write(format!("Failed to load voxel mappings: {e}"));
        }
        sprites
    }

    /// Opens `explicit`, or else the last map in the maps folder. Returns the path loaded.
    pub fn open_startup_map(&mut self, explicit: Option<&Path>) -> Option<PathBuf> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => MapLibrary::open(&self.config.assets.maps_dir)
                .last()?
                .to_path_buf(),
        };
        self.load_map(&path).ok().map(|()| path)
    }

    /// Replaces the world with the map at `path`.
    ///
    /// All-or-nothing: on failure the current world is kept and the error is reported.
    pub fn load_map(&mut self, path: &Path) -> Result<(), SessionError> {
        match VoxelStore::load(path) {
            Ok(store) => {
                tracing::info!("Loaded map {} ({} voxels)", path.display(), store.len());
                self.store = store;
                self.current_map = Some(path.to_path_buf());
                self.activity.write(format!("Loaded map: {}", path.display()));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load map {}: {}", path.display(), e);
                self.activity.write(format!("Failed to load map: {e}"));
                Err(e.into())
            }
        }
    }

    /// Writes the world to `path`.
    pub fn save_map(&mut self, path: &Path) -> Result<(), SessionError> {
        self.store.save(path)?;
        self.activity.write(format!("Saved map as: {}", path.display()));
        Ok(())
    }

    /// Writes the mapping table to the configured file.
    pub fn save_mappings(&mut self) -> Result<(), SessionError> {
        self.mappings.save_to_file(&self.config.assets.mappings)?;
        self.activity.write("Voxel Mappings Saved");
        Ok(())
    }

    // ── Tools ───────────────────────────────────────────────────────

    /// Switches the active tool; any in-progress drag is abandoned.
    pub fn select_tool(&mut self, kind: ToolKind) {
        self.dispatcher.select(kind);
        self.config.tools.active = kind.as_str().to_string();
    }

    /// The active tool kind.
    pub fn active_tool(&self) -> ToolKind {
        self.dispatcher.active_kind()
    }

    /// Type placed by the stack tool from the next click on.
    pub fn set_stack_place_type(&mut self, kind: impl Into<String>) {
        self.config.tools.stack_place_type = kind.into();
    }

    // ── Frame ───────────────────────────────────────────────────────

    /// Camera for the current config.
    pub fn camera(&self) -> Camera {
        let cam = &self.config.camera;
        let mode = if cam.use_3d {
            ViewMode::Cubes3D
        } else {
            ViewMode::Flat2D
        };
        Camera::new(
            Vec3::new(cam.position[0], cam.position[1], cam.layer as f32),
            cam.clamped_scale(),
        )
        .with_mode(mode)
    }

    /// Projector shared by the tile renderer and the tool hit-test.
    pub fn projector(&self) -> ViewProjector {
        self.renderer.projector(
            &self.camera(),
            self.config.window.width,
            self.config.window.height,
        )
    }

    /// Draws the 2D tile view.
    pub fn render_map(&self, sink: &mut dyn DrawSink) -> RenderStats {
        let resolver = SpriteResolver::new(&self.mappings, &self.atlas);
        let camera = self.camera();
        self.renderer.render(
            &self.store,
            &resolver,
            &self.projector(),
            camera.focus_voxel().z,
            self.config.view.render_depth,
            sink,
        )
    }

    /// Captures the tile view offscreen and starts the pixel sort on it.
    pub fn start_effect(&mut self) {
        let textures = Arc::clone(&self.textures);
        let mut canvas = Canvas::new(
            self.config.window.width,
            self.config.window.height,
            &textures,
        );
        canvas.clear(BACKGROUND);
        self.render_map(&mut canvas);
        self.sorter.start(canvas.image());
        self.activity.write("Pixel sort started");
    }

    /// Runs one frame.
    pub fn frame(
        &mut self,
        input: &FrameInput,
        sink: &mut dyn DrawSink,
        cubes: &mut dyn CubeSink,
    ) -> FrameOutcome {
        self.stats.record_frame(input.dt);
        if self.config.debug.show_stats && self.stats.total_frames() % STATS_INTERVAL == 0 {
            tracing::info!(
                "frame {}: {:.2} ms avg, {:.1} fps",
                self.stats.total_frames(),
                self.stats.average_ms(),
                self.stats.fps()
            );
        }

        if input.trigger_effect && !self.sorter.is_running() {
            self.start_effect();
        }

        if self.sorter.is_running() {
            // config_mut can zero the budget after validation; always make progress.
            self.sorter.advance(self.config.effect.pixels_per_frame.max(1));
            if let Some(image) = self.sorter.render_current() {
                sink.present_image(&image, 0, 0);
            }
            if self.sorter.is_done() {
                self.activity.write("Pixel sort done");
            }
            return FrameOutcome {
                view: FrameView::Effect {
                    sorted: self.sorter.sorted_len(),
                    total: self.sorter.len(),
                },
                hovered: None,
                events: Vec::new(),
            };
        }

        if self.camera().mode == ViewMode::Cubes3D {
            let count = self.cubes.render(&self.store, cubes);
            return FrameOutcome {
                view: FrameView::Cubes(count),
                hovered: None,
                events: Vec::new(),
            };
        }

        let stats = self.render_map(sink);
        let projector = self.projector();
        let dispatch = self.dispatcher.dispatch(
            &input.pointer,
            input.ui_wants_pointer,
            &projector,
            &mut self.store,
            sink,
            &self.config.tools.stack_place_type,
        );
        for event in &dispatch.events {
            self.activity.write(event.to_string());
        }
        if self.config.debug.show_tile_info
            && let Some(voxel) = dispatch.hovered
        {
            tracing::debug!("hover ({}, {})", voxel.x, voxel.y);
        }

        FrameOutcome {
            view: FrameView::Tiles(stats),
            hovered: dispatch.hovered,
            events: dispatch.events,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable configuration; camera and tool-type edits apply from the next frame.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The world.
    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    /// The world, for direct edits.
    pub fn store_mut(&mut self) -> &mut VoxelStore {
        &mut self.store
    }

    /// Path of the last loaded map.
    pub fn current_map(&self) -> Option<&Path> {
        self.current_map.as_deref()
    }

    /// Loaded sprites.
    pub fn atlas(&self) -> &SpriteAtlas {
        &self.atlas
    }

    /// Decoded atlas textures, shared with the host's canvas.
    pub fn textures(&self) -> Arc<TextureSet> {
        Arc::clone(&self.textures)
    }

    /// Voxel type to sprite table.
    pub fn mappings(&self) -> &VoxelMappings {
        &self.mappings
    }

    /// Mapping table for editing; edits show on the next frame.
    pub fn mappings_mut(&mut self) -> &mut VoxelMappings {
        &mut self.mappings
    }

    /// The pixel-sort effect.
    pub fn effect(&self) -> &PixelSorter {
        &self.sorter
    }

    /// User-visible reports.
    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Frame timing.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}
