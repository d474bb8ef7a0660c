//! Flat-shaded preview of the cube view for the software canvas.
//!
//! Each cube is projected through the configured perspective camera and drawn as a
//! screen-aligned square with an outline, far to near.

use glam::{Mat4, Vec3};
use voxmap_config::CameraConfig;
use voxmap_render::{Canvas, CubeDraw};
use voxmap_view::ScreenRect;

const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

/// Projects `cubes` through `camera` and paints them into `canvas`. Returns the number of
/// cubes in front of the camera.
pub fn rasterize_cubes(cubes: &[CubeDraw], camera: &CameraConfig, canvas: &mut Canvas<'_>) -> usize {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    if w <= 0.0 || h <= 0.0 {
        return 0;
    }

    let view = Mat4::look_at_rh(
        Vec3::from(camera.position),
        Vec3::from(camera.target),
        Vec3::Y,
    );
    let fov = camera.fov_y.clamp(1.0, 179.0).to_radians();
    let proj = Mat4::perspective_rh(fov, w / h, NEAR, FAR);
    let view_proj = proj * view;
    let focal = 1.0 / (fov * 0.5).tan();

    let mut visible: Vec<(f32, ScreenRect, &CubeDraw)> = cubes
        .iter()
        .filter_map(|cube| {
            let clip = view_proj * cube.position.extend(1.0);
            if clip.w <= NEAR {
                return None;
            }
            let ndc = clip.truncate() / clip.w;
            let cx = (ndc.x * 0.5 + 0.5) * w;
            let cy = (0.5 - ndc.y * 0.5) * h;
            let side = (cube.size * focal * h * 0.5 / clip.w).max(1.0);
            let rect = ScreenRect::new(
                (cx - side * 0.5).round() as i32,
                (cy - side * 0.5).round() as i32,
                side.round() as i32,
                side.round() as i32,
            );
            Some((clip.w, rect, cube))
        })
        .collect();

    visible.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, rect, cube) in &visible {
        canvas.fill_rect(*rect, cube.color);
        outline(canvas, *rect, cube.wire_color);
    }
    visible.len()
}

fn outline(canvas: &mut Canvas<'_>, r: ScreenRect, color: image::Rgba<u8>) {
    canvas.fill_rect(ScreenRect::new(r.x, r.y, r.w, 1), color);
    canvas.fill_rect(ScreenRect::new(r.x, r.y + r.h - 1, r.w, 1), color);
    canvas.fill_rect(ScreenRect::new(r.x, r.y, 1, r.h), color);
    canvas.fill_rect(ScreenRect::new(r.x + r.w - 1, r.y, 1, r.h), color);
}
