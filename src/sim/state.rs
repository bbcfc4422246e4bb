//! Simulation state driven once per frame
//!
//! Owns the selection buffer and the model outputs. The presentation layer
//! calls `select_category` on key presses and `advance_orbits` + `tick` every
//! frame, then reads outputs and drains events.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::model::{self, GameOver};
use super::orb::Orb;
use super::selection::OrbSelection;
use crate::config::SimConfig;
use crate::consts::CATEGORY_COUNT;

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    Running,
    /// Absorbing: outputs are frozen
    GameOver,
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new orb entered the orbit
    OrbSpawned { id: u32, category: Category, rotation: f32 },
    /// An orb left the orbit; release its visual
    OrbEvicted { id: u32, category: Category },
    GameOver(GameOver),
}

/// Serializable view for HUD/debug output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub counts: [f32; CATEGORY_COUNT],
    pub outputs: [f32; CATEGORY_COUNT],
    pub game_over: Option<String>,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    config: SimConfig,
    selection: OrbSelection,
    outputs: [f32; CATEGORY_COUNT],
    phase: SimPhase,
    game_over: Option<GameOver>,
    /// Total simulated time, frozen at game over
    elapsed_ms: f64,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl SimulationState {
    pub fn new(config: SimConfig) -> Self {
        let selection = OrbSelection::new(&config.orbit);
        let outputs = model::initial_outputs(selection.counts());
        let events = selection
            .orbs()
            .iter()
            .map(|orb| GameEvent::OrbSpawned {
                id: orb.id,
                category: orb.category,
                rotation: orb.rotation(),
            })
            .collect();
        log::info!("Simulation started, outputs {:?}", outputs);
        Self {
            config,
            selection,
            outputs,
            phase: SimPhase::Running,
            game_over: None,
            elapsed_ms: 0.0,
            events,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Select by external id. Returns false (and changes nothing) for unknown ids.
    pub fn select_category(&mut self, id: &str) -> bool {
        match Category::from_id(id) {
            Some(category) => {
                self.select(category);
                true
            }
            None => {
                log::warn!("Ignoring unknown category id {:?}", id);
                false
            }
        }
    }

    /// Select by bound key. Returns false for unbound keys.
    pub fn press_key(&mut self, key: char) -> bool {
        match self.config.category_for_key(key) {
            Some(category) => {
                self.select(category);
                true
            }
            None => false,
        }
    }

    /// Push a category into the selection buffer.
    ///
    /// Still accepted after game over, but it no longer affects the outputs.
    pub fn select(&mut self, category: Category) {
        let evicted = self.selection.select(category, &self.config.orbit);
        let newest = self.selection.newest();
        self.events.push(GameEvent::OrbEvicted {
            id: evicted.id,
            category: evicted.category,
        });
        self.events.push(GameEvent::OrbSpawned {
            id: newest.id,
            category: newest.category,
            rotation: newest.rotation(),
        });

        if log::log_enabled!(log::Level::Debug) {
            let counts = self.selection.counts();
            log::debug!(
                "Selected {} => {}",
                category,
                serde_json::to_string(&counts).unwrap_or_default()
            );
        }
    }

    /// Rotate the orbs. Purely cosmetic; keeps running after game over.
    pub fn advance_orbits(&mut self, elapsed_ms: f32) {
        self.selection.advance(elapsed_ms, &self.config.orbit);
    }

    /// Advance the model by one frame. No-op once the game is over.
    pub fn tick(&mut self, elapsed_ms: f32) {
        if self.phase == SimPhase::GameOver {
            return;
        }

        self.elapsed_ms += f64::from(elapsed_ms.max(0.0));
        self.outputs = model::step(
            &self.config.model,
            self.outputs,
            self.selection.counts(),
            elapsed_ms,
        );
        log::trace!("Outputs {:?}", self.outputs);

        if let Some(over) = model::check_game_over(&self.config.model, self.outputs) {
            log::info!(
                "Game over: {} ({} {:?}) after {:.0} ms",
                over.message,
                over.category,
                over.threshold,
                self.elapsed_ms
            );
            self.phase = SimPhase::GameOver;
            self.events.push(GameEvent::GameOver(over.clone()));
            self.game_over = Some(over);
        }
    }

    /// Orbit then model, in the order a frame needs them
    pub fn frame(&mut self, elapsed_ms: f32) {
        self.advance_orbits(elapsed_ms);
        self.tick(elapsed_ms);
    }

    pub fn counts(&self) -> [f32; CATEGORY_COUNT] {
        self.selection.counts()
    }

    pub fn outputs(&self) -> [f32; CATEGORY_COUNT] {
        self.outputs
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SimPhase::GameOver
    }

    pub fn game_over(&self) -> Option<&GameOver> {
        self.game_over.as_ref()
    }

    /// Game over message, or an empty string while running
    pub fn game_over_message(&self) -> &str {
        self.game_over.as_ref().map(|g| g.message.as_str()).unwrap_or("")
    }

    pub fn orbs(&self) -> &[Orb] {
        self.selection.orbs()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            counts: self.counts(),
            outputs: self.outputs,
            game_over: self.game_over.as_ref().map(|g| g.message.clone()),
            elapsed_ms: self.elapsed_ms,
        }
    }
}
