//! Session state machine and button layout.
//!
//! The viewer turns raw input into [`UiEvent`]s and feeds them to
//! [`Session::handle`]; nothing in here touches the window. Side effects
//! that need the outside world (writing the seed file) come back as an
//! [`Effect`] for the caller to perform.

use image::Rgb;

use crate::error::Result;
use crate::frame::Camera;
use crate::heightmap::{heightmap_stats, HeightmapParams};
use crate::raster::Rect;
use crate::tilemap::Tilemap;

/// Which screen the session is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    StartMenu,
    Main,
    Terminated,
}

/// Something the user asked for. Seeds are resolved by the caller (clock,
/// prompt) before the event is raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// Start menu: enter the main view with the start seed.
    Start,
    /// Start menu: replace the start seed.
    EnterSeed(u64),
    /// Main view: regenerate with a fresh seed.
    Regenerate(u64),
    /// Main view: regenerate with a user-chosen seed.
    LoadSeed(u64),
    /// Main view: persist the active seed.
    DownloadSeed,
    /// Exit button.
    Exit,
    /// Window closed.
    Close,
}

/// Work the caller must carry out after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    SaveSeed(u64),
}

pub struct Session {
    screen: Screen,
    params: HeightmapParams,
    /// Seed shown on the start menu and used by "Start".
    start_seed: u64,
    /// Seed behind the current heightmap.
    seed: u64,
    heightmap: Tilemap<u32>,
    pub camera: Camera,
}

impl Session {
    /// New session on the start menu. The heightmap is generated up front
    /// so the main view always has terrain to show.
    pub fn new(params: HeightmapParams, start_seed: u64, camera: Camera) -> Result<Self> {
        let heightmap = params.generate(start_seed)?;
        Ok(Self {
            screen: Screen::StartMenu,
            params,
            start_seed,
            seed: start_seed,
            heightmap,
            camera,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn start_seed(&self) -> u64 {
        self.start_seed
    }

    pub fn heightmap(&self) -> &Tilemap<u32> {
        &self.heightmap
    }

    pub fn params(&self) -> HeightmapParams {
        self.params
    }

    pub fn is_running(&self) -> bool {
        self.screen != Screen::Terminated
    }

    /// Apply one event. Events that mean nothing on the current screen are
    /// ignored; a terminated session ignores everything.
    pub fn handle(&mut self, event: UiEvent) -> Result<Option<Effect>> {
        match (self.screen, event) {
            (Screen::Terminated, _) => {}
            (_, UiEvent::Exit | UiEvent::Close) => {
                tracing::info!("Session terminated");
                self.screen = Screen::Terminated;
            }
            (Screen::StartMenu, UiEvent::Start) => {
                self.regenerate(self.start_seed)?;
                self.screen = Screen::Main;
            }
            (Screen::StartMenu, UiEvent::EnterSeed(seed)) => {
                tracing::info!("Start seed set to {}", seed);
                self.start_seed = seed;
            }
            (Screen::Main, UiEvent::Regenerate(seed) | UiEvent::LoadSeed(seed)) => {
                self.regenerate(seed)?;
            }
            (Screen::Main, UiEvent::DownloadSeed) => {
                return Ok(Some(Effect::SaveSeed(self.seed)));
            }
            (screen, event) => {
                tracing::trace!("Ignoring {:?} on {:?}", event, screen);
            }
        }
        Ok(None)
    }

    /// Replace the whole heightmap. Dimensions never change; a failure
    /// leaves the previous terrain and seed in place.
    fn regenerate(&mut self, seed: u64) -> Result<()> {
        let heightmap = self.params.generate(seed)?;
        self.heightmap = heightmap;
        self.seed = seed;

        if let Some(stats) = heightmap_stats(&self.heightmap) {
            tracing::info!(
                "Generated {}x{} terrain with seed {} (heights {}..={}, mean {:.1})",
                self.params.width,
                self.params.height,
                seed,
                stats.min,
                stats.max,
                stats.mean
            );
        }
        Ok(())
    }
}

// =============================================================================
// BUTTONS
// =============================================================================

pub const BUTTON_COLOR: Rgb<u8> = Rgb([100, 100, 200]);
pub const EXIT_BUTTON_COLOR: Rgb<u8> = Rgb([200, 50, 50]);

/// What a button does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Start,
    EnterSeed,
    Regenerate,
    LoadSeed,
    DownloadSeed,
    Exit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub color: Rgb<u8>,
    pub action: ButtonAction,
}

impl Button {
    fn new(rect: Rect, label: &'static str, action: ButtonAction) -> Self {
        let color = if action == ButtonAction::Exit { EXIT_BUTTON_COLOR } else { BUTTON_COLOR };
        Self { rect, label, color, action }
    }
}

/// Start menu: three stacked 150x40 buttons centred horizontally.
pub fn start_menu_buttons(window_width: usize) -> Vec<Button> {
    let x = window_width as f32 / 2.0 - 75.0;
    vec![
        Button::new(Rect::new(x, 300.0, 150.0, 40.0), "Start", ButtonAction::Start),
        Button::new(Rect::new(x, 360.0, 150.0, 40.0), "Enter Seed", ButtonAction::EnterSeed),
        Button::new(Rect::new(x, 420.0, 150.0, 40.0), "Exit", ButtonAction::Exit),
    ]
}

/// Main view: a column of controls top-left, "Download Seed" top-right.
pub fn main_buttons(window_width: usize) -> Vec<Button> {
    vec![
        Button::new(Rect::new(10.0, 10.0, 100.0, 30.0), "Regenerate", ButtonAction::Regenerate),
        Button::new(Rect::new(10.0, 50.0, 100.0, 30.0), "Load Seed", ButtonAction::LoadSeed),
        Button::new(
            Rect::new(window_width as f32 - 130.0, 10.0, 120.0, 30.0),
            "Download Seed",
            ButtonAction::DownloadSeed,
        ),
        Button::new(Rect::new(10.0, 90.0, 100.0, 30.0), "Exit", ButtonAction::Exit),
    ]
}

/// Buttons for a screen. A terminated session has none.
pub fn buttons_for(screen: Screen, window_width: usize) -> Vec<Button> {
    match screen {
        Screen::StartMenu => start_menu_buttons(window_width),
        Screen::Main => main_buttons(window_width),
        Screen::Terminated => Vec::new(),
    }
}

/// First button under the cursor, if any.
pub fn hit_test(buttons: &[Button], x: f32, y: f32) -> Option<ButtonAction> {
    buttons.iter().find(|b| b.rect.contains(x, y)).map(|b| b.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ScreenPoint;

    fn session(seed: u64) -> Session {
        let params = HeightmapParams { width: 10, height: 8, max_elevation: 30 };
        Session::new(params, seed, Camera::new(ScreenPoint::new(400.0, 150.0))).unwrap()
    }

    #[test]
    fn test_starts_on_menu_with_terrain() {
        let s = session(42);
        assert_eq!(s.screen(), Screen::StartMenu);
        assert_eq!(s.seed(), 42);
        assert_eq!(s.heightmap().width, 10);
        assert_eq!(s.heightmap().height, 8);
    }

    #[test]
    fn test_enter_seed_then_start() {
        let mut s = session(1);
        assert_eq!(s.handle(UiEvent::EnterSeed(42)).unwrap(), None);
        assert_eq!(s.screen(), Screen::StartMenu);
        assert_eq!(s.start_seed(), 42);

        s.handle(UiEvent::Start).unwrap();
        assert_eq!(s.screen(), Screen::Main);
        assert_eq!(s.seed(), 42);
        assert_eq!(*s.heightmap(), s.params().generate(42).unwrap());
    }

    #[test]
    fn test_main_view_regenerates_in_place() {
        let mut s = session(5);
        s.handle(UiEvent::Start).unwrap();

        s.handle(UiEvent::Regenerate(42)).unwrap();
        let first = s.heightmap().clone();
        s.handle(UiEvent::LoadSeed(7)).unwrap();
        assert_eq!(s.seed(), 7);
        s.handle(UiEvent::LoadSeed(42)).unwrap();

        assert_eq!(s.screen(), Screen::Main);
        assert_eq!(*s.heightmap(), first);
        assert_eq!(s.heightmap().width, 10);
        assert_eq!(s.heightmap().height, 8);
    }

    #[test]
    fn test_download_seed_returns_effect() {
        let mut s = session(5);
        assert_eq!(s.handle(UiEvent::DownloadSeed).unwrap(), None);

        s.handle(UiEvent::Start).unwrap();
        s.handle(UiEvent::Regenerate(99)).unwrap();
        assert_eq!(s.handle(UiEvent::DownloadSeed).unwrap(), Some(Effect::SaveSeed(99)));
        assert_eq!(s.screen(), Screen::Main);
    }

    #[test]
    fn test_events_for_other_screen_are_ignored() {
        let mut s = session(5);
        s.handle(UiEvent::Regenerate(8)).unwrap();
        assert_eq!(s.screen(), Screen::StartMenu);
        assert_eq!(s.seed(), 5);

        s.handle(UiEvent::Start).unwrap();
        s.handle(UiEvent::EnterSeed(9)).unwrap();
        s.handle(UiEvent::Start).unwrap();
        assert_eq!(s.start_seed(), 5);
        assert_eq!(s.seed(), 5);
    }

    #[test]
    fn test_exit_from_either_screen() {
        let mut menu = session(1);
        menu.handle(UiEvent::Exit).unwrap();
        assert_eq!(menu.screen(), Screen::Terminated);
        assert!(!menu.is_running());

        let mut main = session(1);
        main.handle(UiEvent::Start).unwrap();
        main.handle(UiEvent::Close).unwrap();
        assert_eq!(main.screen(), Screen::Terminated);

        main.handle(UiEvent::Start).unwrap();
        assert_eq!(main.handle(UiEvent::DownloadSeed).unwrap(), None);
        assert_eq!(main.screen(), Screen::Terminated);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = HeightmapParams { width: 0, height: 8, max_elevation: 30 };
        assert!(Session::new(params, 1, Camera::new(ScreenPoint::default())).is_err());
    }

    #[test]
    fn test_hit_test() {
        let menu = start_menu_buttons(800);
        assert_eq!(hit_test(&menu, 400.0, 320.0), Some(ButtonAction::Start));
        assert_eq!(hit_test(&menu, 330.0, 380.0), Some(ButtonAction::EnterSeed));
        assert_eq!(hit_test(&menu, 470.0, 459.0), Some(ButtonAction::Exit));
        assert_eq!(hit_test(&menu, 400.0, 350.0), None);

        let main = main_buttons(800);
        assert_eq!(hit_test(&main, 15.0, 15.0), Some(ButtonAction::Regenerate));
        assert_eq!(hit_test(&main, 15.0, 60.0), Some(ButtonAction::LoadSeed));
        assert_eq!(hit_test(&main, 700.0, 20.0), Some(ButtonAction::DownloadSeed));
        assert_eq!(hit_test(&main, 50.0, 100.0), Some(ButtonAction::Exit));
        assert_eq!(hit_test(&main, 400.0, 300.0), None);

        assert!(buttons_for(Screen::Terminated, 800).is_empty());
        assert_eq!(main[3].color, EXIT_BUTTON_COLOR);
    }
}
