//! Viewer configuration.
//!
//! Everything has a default matching the classic 800x600 demo. A JSON file
//! may override any subset of fields; command-line flags are applied on top
//! by `main`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::frame::{DEFAULT_CAMERA_SPEED, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM_STEP};
use crate::heightmap::HeightmapParams;
use crate::projection::DEFAULT_TILE_SCALE;
use crate::seeds::DEFAULT_SEED_FILE;
use crate::shading::Vec3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Window size in pixels.
    pub window_width: usize,
    pub window_height: usize,

    /// Frame-rate cap.
    pub target_fps: usize,

    /// Grid shape and elevation bound.
    pub grid: HeightmapParams,

    /// Screen width of one grid step at zoom 1.0.
    pub tile_scale: f32,

    /// Pixels per frame moved by a held WASD key.
    pub camera_speed: f32,

    /// Zoom change per scroll notch.
    pub zoom_step: f32,

    /// Zoom floor.
    pub min_zoom: f32,

    /// Direction the light comes from. Normalized on use.
    pub light_dir: [f32; 3],

    /// Where "Download Seed" writes.
    pub seed_file: PathBuf,

    /// Bottom-right credit line.
    pub credits: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: 800,
            window_height: 600,
            target_fps: 60,
            grid: HeightmapParams::default(),
            tile_scale: DEFAULT_TILE_SCALE,
            camera_speed: DEFAULT_CAMERA_SPEED,
            zoom_step: DEFAULT_ZOOM_STEP,
            min_zoom: DEFAULT_MIN_ZOOM,
            light_dir: [-1.0, -1.0, 1.0],
            seed_file: PathBuf::from(DEFAULT_SEED_FILE),
            credits: "Made by Avazbek".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load from a JSON file. Fields missing from the file keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TerrainError::io(path, e))?;
        let config = Self::from_json(&contents)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;

        if self.window_width == 0 || self.window_height == 0 {
            return Err(TerrainError::InvalidParameter(format!(
                "window size must be positive, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if !(self.min_zoom > 0.0) {
            return Err(TerrainError::InvalidParameter(format!(
                "min_zoom must be positive, got {}",
                self.min_zoom
            )));
        }
        if !(self.zoom_step > 0.0 && self.zoom_step.is_finite()) {
            return Err(TerrainError::InvalidParameter(format!(
                "zoom_step must be positive and finite, got {}",
                self.zoom_step
            )));
        }
        if !self.camera_speed.is_finite() {
            return Err(TerrainError::InvalidParameter(format!(
                "camera_speed must be finite, got {}",
                self.camera_speed
            )));
        }
        if !(self.tile_scale > 0.0) {
            return Err(TerrainError::InvalidParameter(format!(
                "tile_scale must be positive, got {}",
                self.tile_scale
            )));
        }
        if self.light().length() == 0.0 {
            return Err(TerrainError::InvalidParameter(
                "light_dir must not be the zero vector".to_string(),
            ));
        }
        Ok(())
    }

    /// Unit light direction.
    pub fn light(&self) -> Vec3 {
        let [x, y, z] = self.light_dir;
        Vec3::new(x, y, z).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::default_light_dir;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewerConfig::default();
        config.validate().unwrap();

        assert_eq!(config.grid.width, 30);
        assert_eq!(config.grid.height, 30);
        assert_eq!(config.grid.max_elevation, 30);
        assert_eq!(config.light(), default_light_dir());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "window_width": 1024, "grid": { "width": 50, "height": 40, "max_elevation": 12 } }"#)
            .unwrap();

        assert_eq!(config.window_width, 1024);
        assert_eq!(config.window_height, 600);
        assert_eq!(config.grid, HeightmapParams { width: 50, height: 40, max_elevation: 12 });
        assert_eq!(config.seed_file, PathBuf::from("seed.txt"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "min_zoom": 0.0 }"#),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "grid": { "width": 0, "height": 5, "max_elevation": 5 } }"#),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "light_dir": [0.0, 0.0, 0.0] }"#),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "zoom_step": -0.5 }"#),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "zoom_step": 0.0 }"#),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "grid": { "max_elevation": 4000000000 } }"#),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json("{ not json"),
            Err(TerrainError::Config(_))
        ));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let config = ViewerConfig { camera_speed: f32::INFINITY, ..ViewerConfig::default() };
        assert!(matches!(config.validate(), Err(TerrainError::InvalidParameter(_))));

        let config = ViewerConfig { zoom_step: f32::NAN, ..ViewerConfig::default() };
        assert!(matches!(config.validate(), Err(TerrainError::InvalidParameter(_))));
    }

    #[test]
    fn test_validated_zoom_never_reaches_zero() {
        let config = ViewerConfig::from_json(r#"{ "zoom_step": 0.5, "min_zoom": 0.1 }"#).unwrap();
        let mut camera = crate::frame::Camera::for_window(config.window_width);
        for delta in [1.0, -1.0, -1.0, -1.0, -1.0, 1.0, -1.0] {
            camera.scroll(delta, config.zoom_step, config.min_zoom);
            assert!(camera.zoom >= config.min_zoom);
        }
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = ViewerConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(ViewerConfig::from_json(&json).unwrap(), config);
    }
}
