use std::io;
use std::time::Instant;

use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::frame::{Camera, MoveKeys};
use crate::raster::Framebuffer;
use crate::render::render_session;
use crate::seeds::{clock_seed, prompt_seed, save_seed};
use crate::ui::{buttons_for, hit_test, ButtonAction, Effect, Screen, Session, UiEvent};

/// Frames-per-second over roughly one-second windows.
struct FpsCounter {
    started: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) -> f32 {
        self.frames += 1;
        let elapsed = self.started.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.started = Instant::now();
        }
        self.fps
    }
}

/// Left-button drag state. minifb only reports whether the button is held,
/// so presses and releases are edges between frames.
#[derive(Default)]
struct MouseState {
    was_down: bool,
    dragging: bool,
    last_pos: Option<(f32, f32)>,
}

/// Run the interactive viewer until the window is closed or Exit is
/// clicked. Returns an error only if the window cannot be created or
/// presented.
pub fn run_viewer(config: &ViewerConfig, start_seed: u64, skip_menu: bool) -> Result<()> {
    let (width, height) = (config.window_width, config.window_height);

    let mut window = Window::new(
        "Random Terrain Generator",
        width,
        height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(config.target_fps);

    let mut session = Session::new(config.grid, start_seed, Camera::for_window(width))?;
    if skip_menu {
        session.handle(UiEvent::Start)?;
    }

    tracing::info!("Viewer started with seed {}", start_seed);
    tracing::info!("Controls: drag or WASD to pan, scroll to zoom");

    let mut fb = Framebuffer::new(width, height);
    let mut mouse = MouseState::default();
    let mut fps = FpsCounter::new();

    while session.is_running() {
        if !window.is_open() {
            session.handle(UiEvent::Close)?;
            break;
        }

        handle_mouse(&window, &mut session, &mut mouse, config)?;

        if session.screen() == Screen::Main {
            if let Some((_, dy)) = window.get_scroll_wheel() {
                session.camera.scroll(dy, config.zoom_step, config.min_zoom);
            }

            let keys = MoveKeys {
                up: window.is_key_down(Key::W),
                down: window.is_key_down(Key::S),
                left: window.is_key_down(Key::A),
                right: window.is_key_down(Key::D),
            };
            session.camera.apply_keys(keys, config.camera_speed);
        }

        let current_fps = fps.tick();
        render_session(&mut fb, &session, config, current_fps);
        window.update_with_buffer(fb.pixels(), width, height)?;
    }

    Ok(())
}

fn handle_mouse(
    window: &Window,
    session: &mut Session,
    mouse: &mut MouseState,
    config: &ViewerConfig,
) -> Result<()> {
    let down = window.get_mouse_down(MouseButton::Left);
    let pos = window.get_mouse_pos(MouseMode::Pass);
    let pressed = down && !mouse.was_down;
    mouse.was_down = down;

    if !down {
        mouse.dragging = false;
    }

    if mouse.dragging {
        if let (Some((x, y)), Some((last_x, last_y))) = (pos, mouse.last_pos) {
            session.camera.pan(x - last_x, y - last_y);
        }
        mouse.last_pos = pos;
    }

    let Some((x, y)) = pos.filter(|_| pressed) else {
        return Ok(());
    };

    let buttons = buttons_for(session.screen(), config.window_width);
    match hit_test(&buttons, x, y) {
        Some(action) => dispatch(action, session, config),
        None if session.screen() == Screen::Main => {
            mouse.dragging = true;
            mouse.last_pos = Some((x, y));
            Ok(())
        }
        None => Ok(()),
    }
}

/// Resolve a button into a session event, reading seeds from the clock or
/// the terminal as needed, then carry out any effect it produces.
fn dispatch(action: ButtonAction, session: &mut Session, config: &ViewerConfig) -> Result<()> {
    let event = match action {
        ButtonAction::Start => Some(UiEvent::Start),
        ButtonAction::EnterSeed => read_seed().map(UiEvent::EnterSeed),
        ButtonAction::Regenerate => Some(UiEvent::Regenerate(clock_seed())),
        ButtonAction::LoadSeed => read_seed().map(UiEvent::LoadSeed),
        ButtonAction::DownloadSeed => Some(UiEvent::DownloadSeed),
        ButtonAction::Exit => Some(UiEvent::Exit),
    };

    let Some(event) = event else {
        return Ok(());
    };

    if let Some(Effect::SaveSeed(seed)) = session.handle(event)? {
        if let Err(e) = save_seed(&config.seed_file, seed) {
            tracing::error!("Failed to save seed: {}", e);
        }
    }
    Ok(())
}

/// Blocking prompt on stdin. Bad input is reported and dropped.
fn read_seed() -> Option<u64> {
    match prompt_seed(io::stdin().lock(), io::stdout()) {
        Ok(seed) => Some(seed),
        Err(e) => {
            tracing::warn!("Ignoring seed input: {}", e);
            None
        }
    }
}
