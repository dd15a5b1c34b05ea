//! Camera state and per-frame wireframe assembly.

use image::Rgb;

use crate::projection::{project, ScreenPoint};
use crate::shading::{shade_face, Vec3};
use crate::tilemap::Tilemap;

pub const DEFAULT_ZOOM_STEP: f32 = 0.1;
pub const DEFAULT_MIN_ZOOM: f32 = 0.1;
pub const DEFAULT_CAMERA_SPEED: f32 = 5.0;

/// Pan offset and zoom factor applied to every projected vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub offset: ScreenPoint,
    pub zoom: f32,
}

impl Camera {
    pub fn new(offset: ScreenPoint) -> Self {
        Self { offset, zoom: 1.0 }
    }

    /// Camera for a window `window_width` pixels wide: grid origin centered
    /// horizontally, 150px from the top.
    pub fn for_window(window_width: usize) -> Self {
        Self::new(ScreenPoint::new(window_width as f32 / 2.0, 150.0))
    }

    /// Shift by a mouse drag delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset += ScreenPoint::new(dx, dy);
    }

    /// Held movement keys. Each moves the terrain, not the viewer: W pushes
    /// it down, A pushes it right.
    pub fn apply_keys(&mut self, keys: MoveKeys, speed: f32) {
        if keys.up {
            self.offset.y += speed;
        }
        if keys.down {
            self.offset.y -= speed;
        }
        if keys.left {
            self.offset.x += speed;
        }
        if keys.right {
            self.offset.x -= speed;
        }
    }

    pub fn zoom_in(&mut self, step: f32) {
        self.zoom += step;
    }

    /// Never drops below `min_zoom`, however many times it is called.
    pub fn zoom_out(&mut self, step: f32, min_zoom: f32) {
        self.zoom = (self.zoom - step).max(min_zoom);
    }

    /// Scroll wheel: positive delta zooms in, negative zooms out.
    pub fn scroll(&mut self, delta: f32, step: f32, min_zoom: f32) {
        if delta > 0.0 {
            self.zoom_in(step);
        } else if delta < 0.0 {
            self.zoom_out(step, min_zoom);
        }
    }
}

/// Which WASD keys are held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// One colored wireframe edge in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub color: Rgb<u8>,
}

/// Build the wireframe for one frame.
///
/// Walks interior cells row by row and emits two edges per cell, corner to
/// right neighbour then corner to down neighbour, both in the cell's shade.
/// The last row and column only appear as endpoints, so a W x H grid gives
/// exactly `2 * (W - 1) * (H - 1)` segments.
pub fn assemble_frame(
    heightmap: &Tilemap<u32>,
    camera: &Camera,
    light_dir: Vec3,
    scale: f32,
) -> Vec<LineSegment> {
    let cells_x = heightmap.width.saturating_sub(1);
    let cells_y = heightmap.height.saturating_sub(1);
    let mut lines = Vec::with_capacity(2 * cells_x * cells_y);

    let vertex = |x: usize, y: usize, z: u32| {
        project(x as i32, y as i32, z, scale, camera.zoom) + camera.offset
    };

    for y in 0..cells_y {
        for x in 0..cells_x {
            let z = *heightmap.get(x, y);
            let z_right = *heightmap.get(x + 1, y);
            let z_down = *heightmap.get(x, y + 1);

            let color = shade_face(z, z_right, z_down, light_dir);

            let corner = vertex(x, y, z);
            let right = vertex(x + 1, y, z_right);
            let down = vertex(x, y + 1, z_down);

            lines.push(LineSegment { from: corner, to: right, color });
            lines.push(LineSegment { from: corner, to: down, color });
        }
    }

    lines
}
