//! Headless PNG export of a single frame.

use std::path::Path;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::frame::Camera;
use crate::raster::Framebuffer;
use crate::render::render_terrain;
use crate::ui::{Session, UiEvent};

/// Render the terrain for `seed` exactly as the main view would show it on
/// its first frame, without UI, and return the pixels.
pub fn render_frame(config: &ViewerConfig, seed: u64) -> Result<Framebuffer> {
    config.validate()?;

    let mut session = Session::new(config.grid, seed, Camera::for_window(config.window_width))?;
    session.handle(UiEvent::Start)?;

    let mut fb = Framebuffer::new(config.window_width, config.window_height);
    render_terrain(&mut fb, &session, config);
    Ok(fb)
}

/// Render the terrain for `seed` and write it to `path` as a PNG.
pub fn export_frame_png(config: &ViewerConfig, seed: u64, path: &Path) -> Result<()> {
    let fb = render_frame(config, seed)?;
    fb.save_png(path)?;
    tracing::info!(
        "Exported {}x{} frame for seed {} to {}",
        fb.width,
        fb.height,
        seed,
        path.display()
    );
    Ok(())
}
