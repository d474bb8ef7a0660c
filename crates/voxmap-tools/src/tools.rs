//! The tool variants.
//!
//! Every tool answers the same two events: hover (called every dispatched frame) and click
//! (called on the frame the primary button goes down). Transient state such as an armed
//! copy lives inside the variant and is dropped when the tool is replaced.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use voxmap_render::{DrawCommand, DrawSink, HIGHLIGHT_COLOR};
use voxmap_view::ScreenRect;
use voxmap_world::{Voxel, VoxelPos, VoxelStore};

use crate::event::ToolEvent;

/// Exclusive upper layer bound scanned by [`StackPlace`].
pub const STACK_SCAN_TOP: i32 = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The voxel column under the pointer and where it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHit {
    /// Voxel column `(x, y)`.
    pub voxel: IVec2,
    /// Screen rectangle the renderer uses for that column.
    pub rect: ScreenRect,
}

/// What a tool may touch during one event.
pub struct ToolContext<'a> {
    /// The world being edited.
    pub store: &'a mut VoxelStore,
    /// Overlay for hover feedback.
    pub overlay: &'a mut dyn DrawSink,
    /// Reports emitted this frame.
    pub events: &'a mut Vec<ToolEvent>,
    /// Level state of the primary button.
    pub primary_down: bool,
    /// Type placed by [`StackPlace`], read fresh on every click.
    pub stack_place_kind: &'a str,
}

/// Selectable tool identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// No tool; pointer input is ignored.
    None,
    /// Read-only inspection of layer 0.
    #[default]
    TileInspect,
    /// Copy a type and paint it while dragging.
    CopyPaint,
    /// Place a voxel on top of a column.
    StackPlace,
}

impl ToolKind {
    /// All kinds, in menu order.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::None,
        ToolKind::TileInspect,
        ToolKind::CopyPaint,
        ToolKind::StackPlace,
    ];

    /// Config/CLI name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TileInspect => "tile_inspect",
            Self::CopyPaint => "copy_paint",
            Self::StackPlace => "stack_place",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised tool name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Highlights the hovered tile and reports what is at layer 0 on click.
#[derive(Debug, Clone, Default)]
pub struct TileInspect;

impl TileInspect {
    fn on_hover(&mut self, ctx: &mut ToolContext<'_>, hit: TileHit) {
        ctx.overlay.draw(DrawCommand::Highlight {
            dest: hit.rect,
            color: HIGHLIGHT_COLOR,
        });
    }

    fn on_click(&mut self, ctx: &mut ToolContext<'_>, hit: TileHit) {
        let pos = VoxelPos::new(hit.voxel.x, hit.voxel.y, 0);
        let event = match ctx.store.get_at(pos) {
            Some(voxel) => ToolEvent::Inspected {
                pos,
                kind: voxel.kind().to_string(),
            },
            None => ToolEvent::InspectedEmpty { pos },
        };
        ctx.events.push(event);
    }
}

/// Captures a type from a clicked voxel and paints it at layer 0 while the button is held.
#[derive(Debug, Clone, Default)]
pub struct CopyPaint {
    armed: Option<Voxel>,
}

impl CopyPaint {
    /// Type currently captured, if armed.
    pub fn armed_kind(&self) -> Option<&str> {
        self.armed.as_ref().map(Voxel::kind)
    }

    /// Drops the captured type.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    fn on_hover(&mut self, ctx: &mut ToolContext<'_>, hit: TileHit) {
        if !ctx.primary_down {
            self.disarm();
            return;
        }
        if let Some(voxel) = &self.armed {
            tracing::trace!("paint {} at ({}, {}, 0)", voxel, hit.voxel.x, hit.voxel.y);
            ctx.store.set(hit.voxel.x, hit.voxel.y, 0, voxel.clone());
        }
    }

    fn on_click(&mut self, ctx: &mut ToolContext<'_>, hit: TileHit) {
        match ctx.store.get(hit.voxel.x, hit.voxel.y, 0) {
            Some(voxel) => {
                ctx.events.push(ToolEvent::CopyStarted {
                    kind: voxel.kind().to_string(),
                });
                self.armed = Some(voxel.clone());
            }
            None => {
                self.disarm();
                ctx.events.push(ToolEvent::CopyCancelled);
            }
        }
    }
}

/// Places the configured type one layer above the highest voxel in a column.
#[derive(Debug, Clone, Default)]
pub struct StackPlace;

impl StackPlace {
    fn on_click(&mut self, ctx: &mut ToolContext<'_>, hit: TileHit) {
        let (x, y) = (hit.voxel.x, hit.voxel.y);
        for z in (0..STACK_SCAN_TOP).rev() {
            let Some(base) = ctx.store.get(x, y, z) else {
                continue;
            };
            let pos = VoxelPos::new(x, y, z + 1);
            ctx.events.push(ToolEvent::Placed {
                pos,
                kind: ctx.stack_place_kind.to_string(),
                above: base.kind().to_string(),
            });
            ctx.store.set_at(pos, Voxel::new(ctx.stack_place_kind));
            return;
        }
        ctx.events.push(ToolEvent::NoBase { x, y });
    }
}

/// The active tool.
#[derive(Debug, Clone)]
pub enum Tool {
    TileInspect(TileInspect),
    CopyPaint(CopyPaint),
    StackPlace(StackPlace),
}

impl Tool {
    /// A fresh tool of `kind`, or `None` for [`ToolKind::None`].
    pub fn from_kind(kind: ToolKind) -> Option<Self> {
        match kind {
            ToolKind::None => None,
            ToolKind::TileInspect => Some(Self::TileInspect(TileInspect)),
            ToolKind::CopyPaint => Some(Self::CopyPaint(CopyPaint::default())),
            ToolKind::StackPlace => Some(Self::StackPlace(StackPlace)),
        }
    }

    /// Identifier of this variant.
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::TileInspect(_) => ToolKind::TileInspect,
            Self::CopyPaint(_) => ToolKind::CopyPaint,
            Self::StackPlace(_) => ToolKind::StackPlace,
        }
    }

    /// Pointer is over `hit` this frame.
    pub fn on_hover(&mut self, ctx: &mut ToolContext<'_>, hit: TileHit) {
        match self {
            Self::TileInspect(t) => t.on_hover(ctx, hit),
            Self::CopyPaint(t) => t.on_hover(ctx, hit),
            Self::StackPlace(_) => {}
        }
    }

    /// Primary button went down over `hit`.
    pub fn on_click(&mut self, ctx: &mut ToolContext<'_>, hit: TileHit) {
        match self {
            Self::TileInspect(t) => t.on_click(ctx, hit),
            Self::CopyPaint(t) => t.on_click(ctx, hit),
            Self::StackPlace(t) => t.on_click(ctx, hit),
        }
    }

    /// Primary button went up, wherever the pointer is.
    pub fn on_release(&mut self) {
        if let Self::CopyPaint(t) = self {
            t.disarm();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use voxmap_render::DrawList;

    fn hit(x: i32, y: i32) -> TileHit {
        TileHit {
            voxel: IVec2::new(x, y),
            rect: ScreenRect::new(x * 16, y * 16, 16, 16),
        }
    }

    struct Harness {
        store: VoxelStore,
        overlay: DrawList,
        events: Vec<ToolEvent>,
    }

    impl Harness {
        fn new(store: VoxelStore) -> Self {
            Self {
                store,
                overlay: DrawList::new(),
                events: Vec::new(),
            }
        }

        fn ctx(&mut self, primary_down: bool, kind: &'static str) -> ToolContext<'_> {
            ToolContext {
                store: &mut self.store,
                overlay: &mut self.overlay,
                events: &mut self.events,
                primary_down,
                stack_place_kind: kind,
            }
        }
    }

    #[test]
    fn test_tool_kind_names_parse() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.as_str().parse::<ToolKind>(), Ok(kind));
        }
        assert_eq!("Copy-Paint".parse::<ToolKind>(), Ok(ToolKind::CopyPaint));
        assert!("eraser".parse::<ToolKind>().is_err());
    }

    #[test]
    fn test_unknown_tool_error_message() {
        let err = "eraser".parse::<ToolKind>().unwrap_err();
        assert_eq!(err, UnknownTool("eraser".into()));
        assert_eq!(err.to_string(), "unknown tool: eraser");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_tool_kind_serde_names() {
        let s = ron::to_string(&ToolKind::StackPlace).unwrap();
        assert_eq!(s, "stack_place");
        let k: ToolKind = ron::from_str("copy_paint").unwrap();
        assert_eq!(k, ToolKind::CopyPaint);
    }

    #[test]
    fn test_inspect_reports_type_or_empty() {
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("water"));
        let mut h = Harness::new(store);
        let mut tool = Tool::from_kind(ToolKind::TileInspect).unwrap();

        tool.on_click(&mut h.ctx(false, "grass"), hit(0, 0));
        tool.on_click(&mut h.ctx(false, "grass"), hit(1, 0));

        assert_eq!(
            h.events,
            vec![
                ToolEvent::Inspected {
                    pos: VoxelPos::new(0, 0, 0),
                    kind: "water".into()
                },
                ToolEvent::InspectedEmpty {
                    pos: VoxelPos::new(1, 0, 0)
                },
            ]
        );
        assert_eq!(h.store.len(), 1);
    }

    #[test]
    fn test_inspect_hover_highlights_only() {
        let mut h = Harness::new(VoxelStore::new());
        let mut tool = Tool::from_kind(ToolKind::TileInspect).unwrap();
        tool.on_hover(&mut h.ctx(false, "grass"), hit(2, 3));
        assert_eq!(
            h.overlay.commands(),
            &[DrawCommand::Highlight {
                dest: ScreenRect::new(32, 48, 16, 16),
                color: HIGHLIGHT_COLOR
            }]
        );
        assert!(h.events.is_empty());
    }

    #[test]
    fn test_copy_paint_recaptures_without_disarm() {
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("grass"));
        store.set(5, 0, 0, Voxel::new("dirt"));
        let mut h = Harness::new(store);
        let mut tool = CopyPaint::default();

        tool.on_click(&mut h.ctx(true, ""), hit(0, 0));
        assert_eq!(tool.armed_kind(), Some("grass"));
        tool.on_click(&mut h.ctx(true, ""), hit(5, 0));
        assert_eq!(tool.armed_kind(), Some("dirt"));
    }

    #[test]
    fn test_copy_paint_hover_without_button_disarms() {
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("grass"));
        let mut h = Harness::new(store);
        let mut tool = CopyPaint::default();

        tool.on_click(&mut h.ctx(true, ""), hit(0, 0));
        tool.on_hover(&mut h.ctx(false, ""), hit(1, 0));
        assert_eq!(tool.armed_kind(), None);
        assert!(h.store.get(1, 0, 0).is_none());
    }

    #[test]
    fn test_stack_place_on_column() {
        let mut store = VoxelStore::new();
        store.set(3, 3, 0, Voxel::new("dirt"));
        store.set(3, 3, 1, Voxel::new("dirt"));
        let mut h = Harness::new(store);
        let mut tool = Tool::from_kind(ToolKind::StackPlace).unwrap();

        tool.on_click(&mut h.ctx(true, "grass"), hit(3, 3));
        assert_eq!(h.store.get(3, 3, 2), Some(&Voxel::new("grass")));
        assert_eq!(h.store.len(), 3);
    }

    #[test]
    fn test_stack_place_reads_kind_fresh() {
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("dirt"));
        let mut h = Harness::new(store);
        let mut tool = Tool::from_kind(ToolKind::StackPlace).unwrap();

        tool.on_click(&mut h.ctx(true, "grass"), hit(0, 0));
        tool.on_click(&mut h.ctx(true, "water"), hit(0, 0));
        assert_eq!(h.store.get(0, 0, 1), Some(&Voxel::new("grass")));
        assert_eq!(h.store.get(0, 0, 2), Some(&Voxel::new("water")));
    }

    #[test]
    fn test_stack_place_empty_column_is_noop() {
        let mut store = VoxelStore::new();
        // Above the scanned range, so it does not count as a base.
        store.set(7, 7, STACK_SCAN_TOP, Voxel::new("dirt"));
        let mut h = Harness::new(store);
        let mut tool = Tool::from_kind(ToolKind::StackPlace).unwrap();

        tool.on_click(&mut h.ctx(true, "grass"), hit(7, 7));
        assert_eq!(h.store.len(), 1);
        assert_eq!(h.events, vec![ToolEvent::NoBase { x: 7, y: 7 }]);
    }

    #[test]
    fn test_stack_place_top_layer_base() {
        let mut store = VoxelStore::new();
        store.set(1, 1, STACK_SCAN_TOP - 1, Voxel::new("dirt"));
        let mut h = Harness::new(store);
        let mut tool = Tool::from_kind(ToolKind::StackPlace).unwrap();

        tool.on_click(&mut h.ctx(true, "grass"), hit(1, 1));
        assert!(h.store.contains(VoxelPos::new(1, 1, STACK_SCAN_TOP)));
    }

    #[test]
    fn test_none_kind_has_no_tool() {
        assert!(Tool::from_kind(ToolKind::None).is_none());
        assert_eq!(
            Tool::from_kind(ToolKind::CopyPaint).map(|t| t.kind()),
            Some(ToolKind::CopyPaint)
        );
    }
}
