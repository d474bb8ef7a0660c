//! Per-frame camera state.

use glam::{IVec3, Vec3};

/// Which presentation of the world the host is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Windowed top-down tile view.
    #[default]
    Flat2D,
    /// Unit cubes over the whole occupied region.
    Cubes3D,
}

/// Camera focus, zoom and view mode.
///
/// Owned by the host and handed to the core by reference every frame; nothing in the
/// core keeps a copy between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space focus point.
    pub center: Vec3,
    /// Zoom factor. Must be `> 0`; clamping is the host's job.
    pub scale: f32,
    /// Presentation mode.
    pub mode: ViewMode,
}

impl Camera {
    /// Creates a 2D camera looking at `center` with the given zoom.
    pub fn new(center: Vec3, scale: f32) -> Self {
        Self {
            center,
            scale,
            mode: ViewMode::Flat2D,
        }
    }

    /// Returns the same camera in the given mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// The voxel the camera is centred on (components floored).
    pub fn focus_voxel(&self) -> IVec3 {
        self.center.floor().as_ivec3()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0)
    }
}
