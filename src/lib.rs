//! Isometric terrain viewer library
//!
//! Heightmap generation, isometric projection and face shading, plus the
//! software-rendered window shell that drives them.

pub mod config;
pub mod error;
pub mod export;
pub mod font;
pub mod frame;
pub mod heightmap;
pub mod projection;
pub mod raster;
pub mod render;
pub mod seeds;
pub mod shading;
pub mod tilemap;
pub mod ui;
pub mod viewer;

pub use error::{Result, TerrainError};
