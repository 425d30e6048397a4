//! Root game state
//!
//! All simulation state is owned here and passed explicitly into the tick.
//! Nothing is global, so test instances run side by side without
//! interference.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::obstacles::ObstacleField;
use super::score::ScoreBoard;
use super::skier::Skier;
use crate::tuning::Tuning;

/// Fixed window geometry supplied at startup. Resizing is not handled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio; the shell scales the backing canvas by this.
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }
}

/// Tick outcomes the shell reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The skier left the ground; the shell starts the jump-frame timer.
    JumpStarted,
    Crashed,
    /// A fresh all-time high score was recorded and persisted.
    NewAllTimeHigh,
}

/// Complete game state for one run.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub skier: Skier,
    pub obstacles: ObstacleField,
    pub score: ScoreBoard,
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh run with a populated slope. `all_time_high_score` comes from the
    /// score store; pass 0 when nothing is stored.
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning, all_time_high_score: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut obstacles = ObstacleField::new();
        obstacles.populate_initial(&mut rng, &viewport, tuning.placement_buffer);

        log::info!("Slope initialized with seed {}", seed);

        Self {
            seed,
            skier: Skier::new(tuning.start_speed),
            obstacles,
            score: ScoreBoard::new(all_time_high_score),
            viewport,
            tuning,
            paused: false,
            time_ticks: 0,
            rng,
        }
    }

    /// Back to initial values: a fresh skier facing right on a repopulated
    /// slope, session scores zeroed. Only the all-time high score carries
    /// over.
    pub fn reset(&mut self, seed: u64) {
        *self = GameState::new(
            seed,
            self.viewport,
            self.tuning,
            self.score.all_time_high_score,
        );
    }
}
