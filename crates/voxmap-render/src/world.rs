//! Windowed 2D tile rendering.
//!
//! Layers `center_z .. center_z + depth` are drawn bottom-up (painter's algorithm), each
//! one over the visible window from [`ViewProjector`]. Empty coordinates produce no draw
//! call; a present voxel without a resolvable sprite produces a placeholder fill.

use image::Rgba;
use voxmap_sprites::SpriteResolver;
use voxmap_view::{Camera, DEFAULT_TILE_BASE_SIZE, ViewProjector};
use voxmap_world::VoxelStore;

use crate::draw::{DrawCommand, DrawSink, PLACEHOLDER_COLOR};

/// Counters from one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Sprite draw calls emitted.
    pub sprites: usize,
    /// Placeholder fills emitted.
    pub placeholders: usize,
    /// Tiles visited (present or not).
    pub tiles_visited: usize,
}

/// Walks the visible window of a [`VoxelStore`] and emits draw commands.
#[derive(Clone, Copy, Debug)]
pub struct WorldRenderer {
    tile_base_size: u32,
    placeholder_color: Rgba<u8>,
}

impl Default for WorldRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_BASE_SIZE)
    }
}

impl WorldRenderer {
    /// Creates a renderer for tiles of `tile_base_size` pixels at zoom 1.
    pub fn new(tile_base_size: u32) -> Self {
        Self {
            tile_base_size,
            placeholder_color: PLACEHOLDER_COLOR,
        }
    }

    /// Overrides the placeholder fill colour.
    #[must_use]
    pub fn with_placeholder_color(mut self, color: Rgba<u8>) -> Self {
        self.placeholder_color = color;
        self
    }

    /// Tile edge length at zoom 1.
    pub fn tile_base_size(&self) -> u32 {
        self.tile_base_size
    }

    /// Projector this renderer uses for `camera` on the given screen. Hit-testing must use
    /// the same projector.
    pub fn projector(&self, camera: &Camera, screen_width: u32, screen_height: u32) -> ViewProjector {
        ViewProjector::from_camera(camera, screen_width, screen_height, self.tile_base_size)
    }

    /// Renders `depth` layers starting at the camera's focus layer.
    #[allow(clippy::too_many_arguments)]
    pub fn render_camera(
        &self,
        store: &VoxelStore,
        resolver: &SpriteResolver<'_>,
        camera: &Camera,
        screen_width: u32,
        screen_height: u32,
        depth: u32,
        sink: &mut dyn DrawSink,
    ) -> RenderStats {
        let projector = self.projector(camera, screen_width, screen_height);
        self.render(store, resolver, &projector, camera.focus_voxel().z, depth, sink)
    }

    /// Renders layers `center_z .. center_z + depth` of the window described by
    /// `projector`.
    pub fn render(
        &self,
        store: &VoxelStore,
        resolver: &SpriteResolver<'_>,
        projector: &ViewProjector,
        center_z: i32,
        depth: u32,
        sink: &mut dyn DrawSink,
    ) -> RenderStats {
        let mut stats = RenderStats::default();

        for z in (0..depth as i32).map(|dz| center_z + dz) {
            for column in projector.visible_columns() {
                stats.tiles_visited += 1;
                let Some(voxel) = store.get(column.x, column.y, z) else {
                    continue;
                };

                let dest = projector.tile_rect(column.x, column.y);
                match resolver.lookup(voxel.kind()) {
                    Ok(sprite) => {
                        sink.draw(DrawCommand::Sprite { sprite, dest });
                        stats.sprites += 1;
                    }
                    Err(reason) => {
                        tracing::trace!("placeholder for '{}': {}", voxel.kind(), reason);
                        sink.draw(DrawCommand::Placeholder {
                            dest,
                            color: self.placeholder_color,
                        });
                        stats.placeholders += 1;
                    }
                }
            }
        }

        stats
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawList;
    use glam::{IVec2, Vec3};
    use voxmap_sprites::{AtlasDocument, SpriteAtlas, SpriteDef, VoxelMappings};
    use voxmap_view::{ScreenRect, ViewWindow};
    use voxmap_world::Voxel;

    fn atlas() -> SpriteAtlas {
        let mut atlas = SpriteAtlas::new();
        let doc = AtlasDocument {
            texture_file: "assets.png".into(),
            tile_width: 16,
            tile_height: 16,
            sprites: vec![SpriteDef {
                name: "grass".into(),
                x: 0,
                y: 0,
                w: 16,
                h: 16,
            }],
        };
        atlas.insert_document("assets", &doc, "assets.png".into());
        atlas
    }

    fn mappings() -> VoxelMappings {
        let mut m = VoxelMappings::default();
        m.set_sprite_key("grass", "assets:grass").unwrap();
        m
    }

    fn small_projector() -> ViewProjector {
        ViewProjector::new(IVec2::ZERO, ViewWindow { radius_x: 1, radius_y: 1 }, 16)
    }

    #[test]
    fn test_empty_store_emits_nothing() {
        let (atlas, mappings) = (atlas(), mappings());
        let resolver = SpriteResolver::new(&mappings, &atlas);
        let mut list = DrawList::new();
        let stats = WorldRenderer::default().render(
            &VoxelStore::new(),
            &resolver,
            &small_projector(),
            0,
            4,
            &mut list,
        );
        assert!(list.is_empty());
        assert_eq!(stats.tiles_visited, 9 * 4);
    }

    #[test]
    fn test_mapped_voxel_draws_sprite_unmapped_draws_placeholder() {
        let (atlas, mappings) = (atlas(), mappings());
        let resolver = SpriteResolver::new(&mappings, &atlas);
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("grass"));
        store.set(1, 0, 0, Voxel::new("lava"));

        let mut list = DrawList::new();
        let stats =
            WorldRenderer::default().render(&store, &resolver, &small_projector(), 0, 1, &mut list);

        assert_eq!(stats.sprites, 1);
        assert_eq!(stats.placeholders, 1);
        assert_eq!(list.len(), 2);
        let grass = list
            .commands()
            .iter()
            .find(|c| matches!(c, DrawCommand::Sprite { .. }))
            .unwrap();
        assert_eq!(grass.dest(), ScreenRect::new(16, 16, 16, 16));
    }

    #[test]
    fn test_layers_drawn_in_ascending_z() {
        let (atlas, mappings) = (atlas(), mappings());
        let resolver = SpriteResolver::new(&mappings, &atlas);
        let mut store = VoxelStore::new();
        store.set(0, 0, 2, Voxel::new("grass"));
        store.set(0, 0, 0, Voxel::new("lava"));
        store.set(0, 0, 1, Voxel::new("grass"));

        let mut list = DrawList::new();
        WorldRenderer::default().render(&store, &resolver, &small_projector(), 0, 3, &mut list);

        let kinds: Vec<_> = list
            .commands()
            .iter()
            .map(|c| matches!(c, DrawCommand::Placeholder { .. }))
            .collect();
        // The z=0 placeholder comes first, then the two sprite layers over it.
        assert_eq!(kinds, vec![true, false, false]);
    }

    #[test]
    fn test_depth_limits_layers() {
        let (atlas, mappings) = (atlas(), mappings());
        let resolver = SpriteResolver::new(&mappings, &atlas);
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("grass"));
        store.set(0, 0, 4, Voxel::new("grass"));
        store.set(0, 0, -1, Voxel::new("grass"));

        let mut list = DrawList::new();
        let stats =
            WorldRenderer::default().render(&store, &resolver, &small_projector(), 0, 4, &mut list);
        assert_eq!(stats.sprites, 1);
    }

    #[test]
    fn test_outside_window_not_drawn() {
        let (atlas, mappings) = (atlas(), mappings());
        let resolver = SpriteResolver::new(&mappings, &atlas);
        let mut store = VoxelStore::new();
        store.set(2, 0, 0, Voxel::new("grass"));

        let mut list = DrawList::new();
        WorldRenderer::default().render(&store, &resolver, &small_projector(), 0, 1, &mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_drawn_rect_hit_tests_to_same_voxel() {
        let (atlas, mappings) = (atlas(), mappings());
        let resolver = SpriteResolver::new(&mappings, &atlas);
        let mut store = VoxelStore::new();
        for (x, y) in [(20, 20), (17, 24), (25, 18)] {
            store.set(x, y, 0, Voxel::new("grass"));
        }

        let renderer = WorldRenderer::default();
        let camera = Camera::new(Vec3::new(20.4, 20.9, 0.0), 2.0);
        let mut list = DrawList::new();
        renderer.render_camera(&store, &resolver, &camera, 640, 480, 1, &mut list);
        assert_eq!(list.len(), 3);

        let projector = renderer.projector(&camera, 640, 480);
        for cmd in list.commands() {
            let dest = cmd.dest();
            let inside = glam::Vec2::new(dest.x as f32 + 3.0, dest.y as f32 + dest.h as f32 - 1.0);
            let hit = projector.screen_to_world(inside);
            assert!(store.get(hit.x, hit.y, 0).is_some());
            assert_eq!(projector.tile_rect(hit.x, hit.y), dest);
        }
    }
}
