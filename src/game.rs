//! Frame loop owner
//!
//! [`Game`] holds the state, the screen machine, timing stats and the
//! offscreen viewport. Each frame runs one update then one draw.

use std::time::Instant;

use crate::consts::*;
use crate::renderer::{DrawCommand, DrawList, FrameBuffer, Letterbox, colors, draw_world};
use crate::screen::{Screen, ScreenEvent, Transition};
use crate::settings::Settings;
use crate::sim::level::LevelError;
use crate::sim::state::GameState;
use crate::sim::tick::{TickInput, tick};
use crate::stats::DebugStats;

/// Game instance holding all state
pub struct Game {
    settings: Settings,
    state: GameState,
    screen: Screen,
    stats: DebugStats,
    draw_list: DrawList,
    viewport: FrameBuffer,
    running: bool,
}

impl Game {
    pub fn new(settings: Settings) -> Result<Self, LevelError> {
        let state = GameState::from_settings(&settings)?;
        log::info!("New {} world, seed {:#x}", settings.world.as_str(), settings.seed);
        Ok(Self {
            settings,
            state,
            screen: Screen::default(),
            stats: DebugStats::new(),
            draw_list: DrawList::new(),
            viewport: FrameBuffer::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            running: true,
        })
    }

    pub fn handle_event(&mut self, event: ScreenEvent) {
        match self.screen.next(event) {
            Some(Transition::To(screen)) => {
                log::info!("Screen {:?} -> {:?}", self.screen, screen);
                self.screen = screen;
            }
            Some(Transition::Exit) => {
                log::info!("Exit requested");
                self.running = false;
            }
            None => log::debug!("Ignoring {event:?} on {:?}", self.screen),
        }
    }

    /// Run the simulation for one frame (game screen only)
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        if !self.screen.is_playing() {
            return;
        }
        let start = Instant::now();
        tick(&mut self.state, input, dt);
        self.stats.record_update(start.elapsed());
    }

    /// Render the current screen into the viewport
    pub fn draw(&mut self) {
        let start = Instant::now();
        if self.screen.is_playing() {
            let report = draw_world(&mut self.state, &mut self.draw_list);
            self.stats.record_level_draw(report.level_draw);
        } else {
            self.draw_list.clear();
            self.draw_list.push(DrawCommand::Clear(colors::CLEAR));
        }
        self.viewport.execute(&self.draw_list);
        if self.screen.is_playing() {
            self.stats.record_draw(start.elapsed());
        }
    }

    /// One update then one draw; returns whether the loop should continue
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> bool {
        if input.quit {
            self.handle_event(ScreenEvent::Quit);
        }
        if !self.running {
            return false;
        }
        self.update(input, dt);
        self.draw();
        self.running
    }

    /// Composite the viewport into a window-sized buffer
    pub fn present(&self, window: &mut FrameBuffer) -> Letterbox {
        self.viewport.present_letterboxed(window)
    }

    /// Timing overlay, when enabled in the settings
    pub fn overlay_text(&self) -> Option<String> {
        self.settings.show_stats.then(|| self.stats.overlay_text())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn stats(&self) -> &DebugStats {
        &self.stats
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn viewport(&self) -> &FrameBuffer {
        &self.viewport
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WorldKind;
    use crate::sim::tick::Key;

    const DT: f32 = 1.0 / 60.0;

    fn game(world: WorldKind) -> Game {
        Game::new(Settings {
            world,
            seed: 12345,
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_menu_does_no_work() {
        let mut game = game(WorldKind::Infinite);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        assert!(game.frame(&input, DT));
        assert_eq!(game.state().time_ticks, 0);
        assert_eq!(game.stats().frames, 0);
        assert_eq!(game.viewport().pixel(0, 0), Some(colors::CLEAR));
    }

    #[test]
    fn test_playing_updates_and_draws() {
        let mut game = game(WorldKind::Fixed);
        game.handle_event(ScreenEvent::Start);
        assert_eq!(game.screen(), Screen::Game);

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            assert!(game.frame(&input, DT));
        }
        assert_eq!(game.state().time_ticks, 10);
        assert_eq!(game.stats().frames, 10);
        assert!(game.draw_list().fan_count() > 0);
        // Player marker at the viewport centre
        let c = crate::SCREEN_CENTRE;
        assert_eq!(
            game.viewport().pixel(c.x as u32, c.y as u32),
            Some(colors::PLAYER)
        );
        assert!(game.overlay_text().is_some_and(|t| t.starts_with("level draw: ")));
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let mut game = game(WorldKind::FreeForm);
        game.handle_event(ScreenEvent::Start);
        game.handle_event(ScreenEvent::Back);
        assert_eq!(game.screen(), Screen::Menu);
        game.handle_event(ScreenEvent::Quit);
        assert!(!game.is_running());
        assert!(!game.frame(&TickInput::default(), DT));
    }

    #[test]
    fn test_escape_ends_the_loop() {
        let mut game = game(WorldKind::Fixed);
        game.handle_event(ScreenEvent::Start);
        assert!(game.frame(&TickInput::default(), DT));

        let escape = TickInput::from_keys(&[Key::Escape]);
        assert!(!game.frame(&escape, DT));
        assert!(!game.is_running());
        // The quitting frame does no simulation work
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_escape_on_menu_also_quits() {
        let mut game = game(WorldKind::Infinite);
        assert!(!game.frame(&TickInput::from_keys(&[Key::Escape]), DT));
    }

    #[test]
    fn test_present_letterboxes() {
        let mut game = game(WorldKind::Infinite);
        game.draw();
        let mut window = FrameBuffer::new(1280, 720);
        let fit = game.present(&mut window);
        assert!((fit.scale - 1.5).abs() < 1e-6);
        assert_eq!(window.pixel(0, 0), Some(colors::WINDOW_BARS));
        assert_eq!(window.pixel(640, 360), Some(colors::CLEAR));
    }

    #[test]
    fn test_overlay_respects_setting() {
        let game = Game::new(Settings {
            show_stats: false,
            ..Settings::default()
        })
        .unwrap();
        assert!(game.overlay_text().is_none());
    }
}
