//! Orb Balance entry point
//!
//! Headless native driver: replays a key script against the simulation at a
//! fixed frame time and logs the HUD once per simulated second.
//!
//! Usage: `orb-balance [config.json] [keys]`

use orb_balance::sim::{GameEvent, SimulationState};
use orb_balance::{SimCalendar, SimConfig};

/// Simulated frame time (~60 fps)
const FRAME_MS: f32 = 16.0;
/// Frames between scripted key presses
const FRAMES_PER_KEY: u32 = 30;
/// Give up after ten simulated minutes
const MAX_FRAMES: u32 = 10 * 60 * 60;

struct Game {
    state: SimulationState,
    calendar: SimCalendar,
    script: Vec<char>,
    frame: u32,
    last_hud_second: u64,
}

impl Game {
    fn new(config: SimConfig, script: &str) -> Self {
        let calendar = SimCalendar::starting_now(config.time_scale);
        Self {
            state: SimulationState::new(config),
            calendar,
            script: script.chars().collect(),
            frame: 0,
            last_hud_second: 0,
        }
    }

    /// Feed the next scripted key, if one is due
    fn handle_input(&mut self) {
        if self.frame % FRAMES_PER_KEY != 0 {
            return;
        }
        let index = (self.frame / FRAMES_PER_KEY) as usize;
        if let Some(&key) = self.script.get(index) {
            if !self.state.press_key(key) {
                log::warn!("Key {:?} is not bound to any category", key);
            }
        }
    }

    fn update(&mut self) {
        // First frame reports zero elapsed time
        let elapsed = if self.frame == 0 { 0.0 } else { FRAME_MS };
        self.handle_input();
        self.state.frame(elapsed);
        self.frame += 1;

        for event in self.state.drain_events() {
            match event {
                GameEvent::OrbSpawned { id, category, rotation } => {
                    log::debug!("Orb {} ({}) spawned at {:.3} rad", id, category, rotation)
                }
                GameEvent::OrbEvicted { id, category } => {
                    log::debug!("Orb {} ({}) released", id, category)
                }
                GameEvent::GameOver(over) => {
                    log::info!(
                        "{} reached on {}",
                        over.message,
                        self.calendar.label_at(self.state.elapsed_ms())
                    );
                }
            }
        }
    }

    fn render_hud(&mut self) {
        let second = (self.state.elapsed_ms() / 1000.0) as u64;
        if second == self.last_hud_second {
            return;
        }
        self.last_hud_second = second;

        let snapshot = self.state.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap_or_default();
        log::info!(
            "{} {}",
            self.calendar.label_at(self.state.elapsed_ms()),
            json
        );
        for orb in self.state.orbs() {
            let pos = orb.position(&self.state.config().orbit);
            log::trace!(
                "  {} #{} at ({:.1}, {:.1}) scale {:.2}",
                orb.category,
                orb.id,
                pos.x,
                pos.y,
                orb.scale()
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Orb Balance (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    let script = args.next().unwrap_or_else(|| "QQQQ".to_string());

    let mut game = Game::new(config, &script);
    while game.frame < MAX_FRAMES && !game.state.is_game_over() {
        game.update();
        game.render_hud();
    }

    let snapshot = game.state.snapshot();
    match snapshot.game_over {
        Some(message) => log::info!("Game over: {}", message),
        None => log::info!("No ending reached after {} frames", game.frame),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless driver is native-only
}
