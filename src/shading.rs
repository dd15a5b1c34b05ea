//! Per-face Lambert shading for the wireframe.

use image::Rgb;

/// Minimal 3-vector for face normals and the light direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy. A zero vector has no direction and is returned
    /// unchanged, so anything dotted with it yields 0.
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len == 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(self.x / len, self.y / len, self.z / len)
    }
}

/// Directional light from the top-left-front, already normalized.
pub fn default_light_dir() -> Vec3 {
    Vec3::new(-1.0, -1.0, 1.0).normalized()
}

/// Unit normal of the face spanned by a vertex and its right and down
/// neighbours.
pub fn face_normal(z: u32, z_right: u32, z_down: u32) -> Vec3 {
    let rise = |to: u32| (to as i64 - z as i64) as f32;
    let v1 = Vec3::new(1.0, 0.0, rise(z_right));
    let v2 = Vec3::new(0.0, 1.0, rise(z_down));
    v1.cross(v2).normalized()
}

/// Lambert term against a unit light direction, never negative.
pub fn light_intensity(normal: Vec3, light_dir: Vec3) -> f32 {
    normal.dot(light_dir).max(0.0)
}

/// Line color for a given intensity: green only, with a floor of 55 so
/// faces turned away from the light stay visible.
pub fn shade_color(intensity: f32) -> Rgb<u8> {
    let channel = |gain: f32, bias: f32| (gain * intensity + bias).clamp(0.0, 255.0) as u8;
    Rgb([channel(0.0, 0.0), channel(200.0, 55.0), channel(0.0, 0.0)])
}

/// Normal, intensity and color for one cell in a single call.
pub fn shade_face(z: u32, z_right: u32, z_down: u32, light_dir: Vec3) -> Rgb<u8> {
    shade_color(light_intensity(face_normal(z, z_right, z_down), light_dir))
}
