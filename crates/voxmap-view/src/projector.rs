//! World voxel coordinates <-> screen pixel coordinates.
//!
//! The screen shows a window of `(2 * radius + 1)` tiles per axis centred on the camera
//! focus voxel. With `t` the tile size in pixels:
//!
//! ```text
//! screen_x = (voxel_x - center_x + radius_x) * t
//! voxel_x  = floor(pointer_x / t) - radius_x + center_x
//! ```
//!
//! The free functions are the single source of truth; [`ViewProjector`] bundles their
//! parameters for one frame.

use glam::{IVec2, Vec2};

use crate::camera::Camera;

/// Tile edge length in pixels at zoom `1.0`.
pub const DEFAULT_TILE_BASE_SIZE: u32 = 16;

/// Number of tiles visible on each side of the centre tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewWindow {
    /// Horizontal radius in tiles.
    pub radius_x: i32,
    /// Vertical radius in tiles.
    pub radius_y: i32,
}

impl ViewWindow {
    /// Returns the radii as a vector.
    pub fn radius(&self) -> IVec2 {
        IVec2::new(self.radius_x, self.radius_y)
    }

    /// Iterates over every `(dx, dy)` offset of the window, row by row.
    pub fn offsets(&self) -> impl Iterator<Item = IVec2> + use<> {
        let (rx, ry) = (self.radius_x, self.radius_y);
        (-ry..=ry).flat_map(move |dy| (-rx..=rx).map(move |dx| IVec2::new(dx, dy)))
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenRect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner.
    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Returns `true` if `point` lies inside (left/top edges inclusive, right/bottom
    /// exclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x as f32
            && point.y >= self.y as f32
            && point.x < (self.x + self.w) as f32
            && point.y < (self.y + self.h) as f32
    }
}

/// Tile edge length in whole pixels for the given zoom, never below one pixel.
///
/// `scale` must be positive.
pub fn tile_size(tile_base_size: u32, scale: f32) -> i32 {
    ((tile_base_size as f32 * scale) as i32).max(1)
}

/// Computes the visible window for a screen of `screen_width x screen_height` pixels.
///
/// Each radius is `ceil(screen_dim / tile_size) / 2`, per axis.
pub fn visible_window(
    screen_width: u32,
    screen_height: u32,
    tile_base_size: u32,
    scale: f32,
) -> ViewWindow {
    let t = tile_size(tile_base_size, scale) as u32;
    ViewWindow {
        radius_x: (screen_width.div_ceil(t) / 2) as i32,
        radius_y: (screen_height.div_ceil(t) / 2) as i32,
    }
}

/// Top-left pixel of the tile showing `voxel`.
pub fn world_to_screen(voxel: IVec2, center: IVec2, window: ViewWindow, tile_size: i32) -> IVec2 {
    (voxel - center + window.radius()) * tile_size
}

/// Voxel column under the pixel `pointer`. Inverse of [`world_to_screen`].
pub fn screen_to_world(pointer: Vec2, center: IVec2, window: ViewWindow, tile_size: i32) -> IVec2 {
    let cell = (pointer / tile_size as f32).floor().as_ivec2();
    cell - window.radius() + center
}

/// Projection parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewProjector {
    center: IVec2,
    window: ViewWindow,
    tile_size: i32,
}

impl ViewProjector {
    /// Creates a projector from explicit parameters.
    pub fn new(center: IVec2, window: ViewWindow, tile_size: i32) -> Self {
        Self {
            center,
            window,
            tile_size,
        }
    }

    /// Derives the projector for `camera` on a screen of the given size.
    pub fn from_camera(
        camera: &Camera,
        screen_width: u32,
        screen_height: u32,
        tile_base_size: u32,
    ) -> Self {
        Self {
            center: camera.focus_voxel().truncate(),
            window: visible_window(screen_width, screen_height, tile_base_size, camera.scale),
            tile_size: tile_size(tile_base_size, camera.scale),
        }
    }

    /// Camera focus column.
    pub fn center(&self) -> IVec2 {
        self.center
    }

    /// Visible window radii.
    pub fn window(&self) -> ViewWindow {
        self.window
    }

    /// Tile edge length in pixels.
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Top-left pixel of the tile showing voxel column `(x, y)`.
    pub fn world_to_screen(&self, x: i32, y: i32) -> IVec2 {
        world_to_screen(IVec2::new(x, y), self.center, self.window, self.tile_size)
    }

    /// Voxel column under `pointer`.
    pub fn screen_to_world(&self, pointer: Vec2) -> IVec2 {
        screen_to_world(pointer, self.center, self.window, self.tile_size)
    }

    /// Full pixel rectangle of the tile showing voxel column `(x, y)`.
    pub fn tile_rect(&self, x: i32, y: i32) -> ScreenRect {
        let origin = self.world_to_screen(x, y);
        ScreenRect::new(origin.x, origin.y, self.tile_size, self.tile_size)
    }

    /// Iterates over the world columns inside the window, row by row.
    pub fn visible_columns(&self) -> impl Iterator<Item = IVec2> + use<> {
        let center = self.center;
        self.window.offsets().map(move |offset| center + offset)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
