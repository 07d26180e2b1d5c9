//! Lantern Blocks entry point
//!
//! Runs the game headless: a scripted walk drives the frame loop for the
//! configured number of frames, compositing into a window-sized buffer.
//! `RUST_LOG` controls verbosity; the first argument may name the world.

use lantern_blocks::renderer::FrameBuffer;
use lantern_blocks::screen::ScreenEvent;
use lantern_blocks::sim::{Key, TickInput};
use lantern_blocks::{Game, Settings, WorldKind};

const DT: f32 = 1.0 / 60.0;
/// Frames each scripted key chord is held for
const SCRIPT_HOLD: u32 = 90;
/// Overlay logging interval in frames
const OVERLAY_INTERVAL: u32 = 120;

const SCRIPT: [&[Key]; 6] = [
    &[Key::D],
    &[Key::S, Key::D],
    &[Key::Down],
    &[Key::A, Key::W],
    &[Key::Left],
    &[],
];

fn scripted_input(frame: u32) -> TickInput {
    let chord = SCRIPT[(frame / SCRIPT_HOLD) as usize % SCRIPT.len()];
    TickInput::from_keys(chord)
}

fn main() {
    env_logger::init();
    log::info!("Lantern Blocks (native) starting...");

    let mut settings = Settings::load();
    if let Some(name) = std::env::args().nth(1) {
        match WorldKind::from_name(&name) {
            Some(world) => settings.world = world,
            None => log::warn!("Unknown world '{name}', using {}", settings.world.as_str()),
        }
    }

    let mut window = FrameBuffer::new(settings.window_width, settings.window_height);
    let frames = settings.frames;
    let show_stats = settings.show_stats;

    let mut game = match Game::new(settings) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to build level: {e}");
            return;
        }
    };

    game.handle_event(ScreenEvent::Start);
    for frame in 0..frames {
        if !game.frame(&scripted_input(frame), DT) {
            break;
        }
        if show_stats && frame % OVERLAY_INTERVAL == 0 {
            if let Some(text) = game.overlay_text() {
                log::info!("frame {frame}\n{text}");
            }
        }
    }
    // Close the way a player would
    let escape = TickInput::from_keys(&[Key::Escape]);
    if game.frame(&escape, DT) {
        log::warn!("Escape did not stop the game");
    }

    let fit = game.present(&mut window);
    let state = game.state();
    log::info!(
        "Finished after {} ticks at {:?}; viewport scaled {:.2}x at {:?}",
        state.time_ticks,
        state.player.pos,
        fit.scale,
        fit.offset
    );
}
