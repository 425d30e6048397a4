//! Gameplay tuning
//!
//! Knobs that vary between builds without changing the simulation's shape.
//! Structural constants (frame counts, sampling bounds) live in
//! [`crate::consts`] instead.

use serde::{Deserialize, Serialize};

/// Balance values consumed by the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    /// Downhill ticks required per point while grounded.
    pub ticks_per_point: u32,

    /// Height of the "feet only" collision band at the bottom of each sprite.
    pub collision_margin: f32,

    /// Minimum clearance between obstacle centers. Also the margin kept
    /// around the viewport when placing and culling.
    pub placement_buffer: f32,

    /// A movement spawn check rolls `1..=spawn_roll_max`; only the top value
    /// places an obstacle.
    pub spawn_roll_max: u32,

    /// Skier speed in map units per tick.
    pub start_speed: f32,

    /// Wall-clock interval between airborne sprite frames, in milliseconds.
    pub jump_frame_interval_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ticks_per_point: 3,
            collision_margin: 5.0,
            placement_buffer: 50.0,
            spawn_roll_max: 8,
            start_speed: 8.0,
            jump_frame_interval_ms: 250,
        }
    }
}
