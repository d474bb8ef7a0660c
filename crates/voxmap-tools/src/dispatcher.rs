//! Per-frame pointer-to-tool routing.

use glam::IVec2;
use voxmap_render::DrawSink;
use voxmap_view::ViewProjector;
use voxmap_world::VoxelStore;

use crate::event::ToolEvent;
use crate::pointer::PointerState;
use crate::tools::{TileHit, Tool, ToolContext, ToolKind};

/// Result of one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Voxel column under the pointer, if a hit-test ran.
    pub hovered: Option<IVec2>,
    /// Reports from the active tool.
    pub events: Vec<ToolEvent>,
}

/// Owns the single active tool and routes pointer input to it.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    active: Option<Tool>,
}

impl Default for ToolDispatcher {
    fn default() -> Self {
        Self::new(ToolKind::default())
    }
}

impl ToolDispatcher {
    /// Creates a dispatcher with `kind` active.
    pub fn new(kind: ToolKind) -> Self {
        Self {
            active: Tool::from_kind(kind),
        }
    }

    /// Kind of the active tool.
    pub fn active_kind(&self) -> ToolKind {
        self.active.as_ref().map_or(ToolKind::None, Tool::kind)
    }

    /// The active tool, if any.
    pub fn active(&self) -> Option<&Tool> {
        self.active.as_ref()
    }

    /// Switches tools. The outgoing tool's transient state (an armed copy, for example)
    /// is discarded, even when reselecting the same kind.
    pub fn select(&mut self, kind: ToolKind) {
        if self.active_kind() != kind {
            tracing::debug!("tool: {} -> {}", self.active_kind(), kind);
        }
        self.active = Tool::from_kind(kind);
    }

    /// Runs one frame of tool input.
    ///
    /// When `ui_wants_pointer` is set no hit-test happens and the store is untouched.
    /// Otherwise the hovered column is resolved through `projector` (the same projector
    /// the renderer drew with), the tool gets a hover event, and then a click event if the
    /// primary button went down this frame.
    pub fn dispatch(
        &mut self,
        pointer: &PointerState,
        ui_wants_pointer: bool,
        projector: &ViewProjector,
        store: &mut VoxelStore,
        overlay: &mut dyn DrawSink,
        stack_place_kind: &str,
    ) -> Dispatch {
        let mut out = Dispatch::default();
        let Some(tool) = self.active.as_mut() else {
            return out;
        };
        if ui_wants_pointer {
            return out;
        }

        if pointer.just_released() {
            tool.on_release();
        }

        let voxel = projector.screen_to_world(pointer.position());
        let hit = TileHit {
            voxel,
            rect: projector.tile_rect(voxel.x, voxel.y),
        };
        out.hovered = Some(voxel);

        let mut ctx = ToolContext {
            store,
            overlay,
            events: &mut out.events,
            primary_down: pointer.is_primary_down(),
            stack_place_kind,
        };
        tool.on_hover(&mut ctx, hit);
        if pointer.just_pressed() {
            tool.on_click(&mut ctx, hit);
        }

        for event in &out.events {
            tracing::info!("{}", event);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
