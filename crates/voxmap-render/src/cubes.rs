//! 3D presentation: one unit cube per occupied voxel.
//!
//! Unlike the 2D view this is not windowed; every occupied coordinate in the store is
//! emitted. Voxel `(x, y, z)` sits at world `(x, z, y) * cube_size`, so the voxel layer
//! axis becomes the 3D up axis.

use glam::Vec3;
use image::Rgba;
use voxmap_world::{VoxelPos, VoxelStore};

/// Colour of the cube outline.
pub const WIRE_COLOR: Rgba<u8> = Rgba([80, 80, 80, 255]);

/// One cube to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeDraw {
    /// Voxel the cube represents.
    pub voxel: VoxelPos,
    /// Cube centre in 3D world space (y-up).
    pub position: Vec3,
    /// Edge length.
    pub size: f32,
    /// Face colour.
    pub color: Rgba<u8>,
    /// Outline colour.
    pub wire_color: Rgba<u8>,
}

/// Consumer of cube draws.
pub trait CubeSink {
    /// Executes or records one cube.
    fn draw_cube(&mut self, cube: CubeDraw);
}

impl CubeSink for Vec<CubeDraw> {
    fn draw_cube(&mut self, cube: CubeDraw) {
        self.push(cube);
    }
}

/// Flat colour for a voxel type in the cube view.
pub fn type_color(kind: &str) -> Rgba<u8> {
    match kind {
        "grass" => Rgba([0, 228, 48, 255]),
        "dirt" => Rgba([139, 69, 19, 255]),
        "water" => Rgba([0, 121, 241, 255]),
        _ => Rgba([130, 130, 130, 255]),
    }
}

/// Emits a cube for every voxel in a store.
#[derive(Clone, Copy, Debug)]
pub struct CubeRenderer {
    cube_size: f32,
}

impl Default for CubeRenderer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl CubeRenderer {
    /// Creates a renderer with the given cube edge length.
    pub fn new(cube_size: f32) -> Self {
        Self { cube_size }
    }

    /// World-space centre of the cube for `pos`.
    pub fn cube_position(&self, pos: VoxelPos) -> Vec3 {
        Vec3::new(pos.x as f32, pos.z as f32, pos.y as f32) * self.cube_size
    }

    /// Emits every occupied voxel, ordered by `(z, y, x)`. Returns the number of cubes.
    pub fn render(&self, store: &VoxelStore, sink: &mut dyn CubeSink) -> usize {
        let mut voxels: Vec<_> = store.iter().collect();
        voxels.sort_unstable_by_key(|(pos, _)| (pos.z, pos.y, pos.x));

        for (pos, voxel) in &voxels {
            sink.draw_cube(CubeDraw {
                voxel: *pos,
                position: self.cube_position(*pos),
                size: self.cube_size,
                color: type_color(voxel.kind()),
                wire_color: WIRE_COLOR,
            });
        }
        voxels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmap_world::Voxel;

    #[test]
    fn test_every_voxel_emitted_regardless_of_distance() {
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("grass"));
        store.set(1000, -500, 3, Voxel::new("water"));
        store.set(-20, 7, 1, Voxel::new("lava"));

        let mut cubes = Vec::new();
        assert_eq!(CubeRenderer::default().render(&store, &mut cubes), 3);
        let order: Vec<_> = cubes.iter().map(|c| c.voxel.z).collect();
        assert_eq!(order, vec![0, 1, 3]);
    }

    #[test]
    fn test_layer_axis_is_up() {
        let r = CubeRenderer::new(2.0);
        assert_eq!(r.cube_position(VoxelPos::new(1, 2, 3)), Vec3::new(2.0, 6.0, 4.0));
    }

    #[test]
    fn test_cube_colors_follow_type() {
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("dirt"));
        store.set(1, 0, 0, Voxel::new("mystery"));
        let mut cubes = Vec::new();
        CubeRenderer::default().render(&store, &mut cubes);
        assert_eq!(cubes[0].color, Rgba([139, 69, 19, 255]));
        assert_eq!(cubes[1].color, type_color("anything else"));
        assert_eq!(cubes[1].wire_color, WIRE_COLOR);
    }
}
