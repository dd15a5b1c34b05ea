//! Isometric projection of grid vertices onto the screen plane.

use std::ops::{Add, AddAssign};

/// Width of one grid step on screen at zoom 1.0, in pixels.
pub const DEFAULT_TILE_SCALE: f32 = 20.0;

/// A point in screen space (pixels, y down).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for ScreenPoint {
    type Output = ScreenPoint;

    fn add(self, rhs: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for ScreenPoint {
    fn add_assign(&mut self, rhs: ScreenPoint) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Project grid vertex `(x, y)` at `elevation` to screen space.
///
/// The grid diagonal runs down the screen: +x goes right-down, +y goes
/// left-down, each at half the horizontal rate. Elevation lifts the point
/// straight up and is scaled by zoom only, not by the tile scale.
/// The result is relative to the origin; callers add the camera offset.
pub fn project(x: i32, y: i32, elevation: u32, scale: f32, zoom: f32) -> ScreenPoint {
    let iso_x = (x - y) as f32 * scale * zoom;
    let iso_y = (x + y) as f32 * scale / 2.0 * zoom - elevation as f32 * zoom;
    ScreenPoint::new(iso_x, iso_y)
}
