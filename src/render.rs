//! Draws a session into a framebuffer: the start menu, or the terrain
//! wireframe with its controls and readouts.

use image::Rgb;

use crate::config::ViewerConfig;
use crate::frame::assemble_frame;
use crate::raster::{text_size, Framebuffer};
use crate::ui::{buttons_for, Button, Screen, Session};

const MENU_BACKGROUND: Rgb<u8> = Rgb([20, 20, 20]);
const MAIN_BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const CREDITS_COLOR: Rgb<u8> = Rgb([180, 180, 180]);

/// Redraw the whole window for the session's current screen.
pub fn render_session(fb: &mut Framebuffer, session: &Session, config: &ViewerConfig, fps: f32) {
    match session.screen() {
        Screen::StartMenu => render_start_menu(fb, session, config),
        Screen::Main => render_main(fb, session, config, fps),
        Screen::Terminated => {}
    }
}

fn render_start_menu(fb: &mut Framebuffer, session: &Session, config: &ViewerConfig) {
    let center = config.window_width as i64 / 2;
    fb.clear(MENU_BACKGROUND);

    fb.draw_text(center - 150, 100, "Random Terrain Generator", TEXT_COLOR, 2);
    fb.draw_text(center - 100, 200, &format!("Seed: {}", session.start_seed()), TEXT_COLOR, 2);

    for button in buttons_for(Screen::StartMenu, config.window_width) {
        draw_button(fb, &button, 2);
    }
}

fn render_main(fb: &mut Framebuffer, session: &Session, config: &ViewerConfig, fps: f32) {
    fb.clear(MAIN_BACKGROUND);
    render_terrain(fb, session, config);

    for button in buttons_for(Screen::Main, config.window_width) {
        draw_button(fb, &button, 1);
    }

    // Right-aligned under the download button.
    let info = format!("FPS: {} | Seed: {}", fps as u32, session.seed());
    let (info_w, _) = text_size(&info, 2);
    fb.draw_text(config.window_width as i64 - info_w as i64 - 10, 50, &info, TEXT_COLOR, 2);

    let (credit_w, credit_h) = text_size(&config.credits, 2);
    fb.draw_text(
        config.window_width as i64 - credit_w as i64 - 10,
        config.window_height as i64 - credit_h as i64 - 10,
        &config.credits,
        CREDITS_COLOR,
        2,
    );
}

/// Only the wireframe, no UI. Also used for headless export.
pub fn render_terrain(fb: &mut Framebuffer, session: &Session, config: &ViewerConfig) {
    let lines = assemble_frame(session.heightmap(), &session.camera, config.light(), config.tile_scale);
    for line in &lines {
        fb.draw_segment(line);
    }
}

/// Filled button with its label centred.
fn draw_button(fb: &mut Framebuffer, button: &Button, text_scale: usize) {
    fb.fill_rect(button.rect, button.color);

    let (w, h) = text_size(button.label, text_scale);
    let x = button.rect.x + (button.rect.width - w as f32) / 2.0;
    let y = button.rect.y + (button.rect.height - h as f32) / 2.0;
    fb.draw_text(x.round() as i64, y.round() as i64, button.label, TEXT_COLOR, text_scale);
}
