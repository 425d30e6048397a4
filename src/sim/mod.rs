//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame
//! - Seeded RNG only
//! - Stable obstacle iteration order
//! - No rendering or platform dependencies
//!
//! The jump-frame clock is the one piece of wall-clock time in the game; the
//! shell owns the timer and calls [`advance_jump`] between ticks, so both
//! clocks mutate state strictly one after the other.

pub mod collision;
pub mod jump;
pub mod obstacles;
pub mod score;
pub mod skier;
pub mod sprite;
pub mod state;
pub mod tick;

pub use jump::Jump;
pub use obstacles::{Obstacle, ObstacleField, ObstacleKind, PlacementError, Region};
pub use score::{ScoreBoard, ScoreChange};
pub use skier::{Direction, Skier, SteerCommand};
pub use sprite::{
    Frame, SpriteId, SpriteInstance, SpriteSheet, SpriteSize, compose_frame, skier_sprite,
};
pub use state::{GameEvent, GameState, Viewport};
pub use tick::{TickInput, advance_jump, tick};
