//! Skier direction state machine and movement integration

use glam::Vec2;

use super::jump::Jump;
use crate::consts::DIAGONAL_DIVISOR;

/// Facing/motion state, ordered so steering moves one step along the
/// Left..Right scale. `Up` is a transient heading used for spawn checks
/// while climbing; the skier never rests in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Crashed,
    Left,
    DownLeft,
    Down,
    DownRight,
    Right,
    Up,
}

impl Direction {
    /// One step toward Left, clamped at the extreme.
    fn veer_left(self) -> Self {
        match self {
            Direction::DownLeft => Direction::Left,
            Direction::Down => Direction::DownLeft,
            Direction::DownRight => Direction::Down,
            Direction::Right => Direction::DownRight,
            other => other,
        }
    }

    /// One step toward Right, clamped at the extreme.
    fn veer_right(self) -> Self {
        match self {
            Direction::Left => Direction::DownLeft,
            Direction::DownLeft => Direction::Down,
            Direction::Down => Direction::DownRight,
            Direction::DownRight => Direction::Right,
            other => other,
        }
    }

    /// Headings with a downhill component.
    pub fn is_downhill(self) -> bool {
        matches!(
            self,
            Direction::DownLeft | Direction::Down | Direction::DownRight
        )
    }
}

/// Decoded directional input, delivered once per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerCommand {
    Left,
    Right,
    Up,
    Down,
}

/// The player. Created once per run, mutated every tick.
#[derive(Debug, Clone)]
pub struct Skier {
    pub direction: Direction,
    /// Absolute position on the infinite slope; the canvas keeps the skier
    /// centered and scrolls the map underneath it.
    pub map_pos: Vec2,
    /// Map units per tick.
    pub speed: f32,
    pub jump: Jump,
}

impl Skier {
    pub fn new(speed: f32) -> Self {
        Self {
            direction: Direction::Right,
            map_pos: Vec2::ZERO,
            speed,
            jump: Jump::default(),
        }
    }

    /// Apply one steering command. Returns the heading for an obstacle-spawn
    /// check when the command moved the skier instead of turning it.
    pub fn steer(&mut self, command: SteerCommand) -> Option<Direction> {
        match command {
            SteerCommand::Left => {
                if self.direction == Direction::Left {
                    // Already fully left: sidestep instead of turning.
                    self.map_pos.x -= self.speed;
                    return Some(Direction::Left);
                }
                if self.direction == Direction::Crashed {
                    self.direction = Direction::DownLeft;
                } else {
                    self.direction = self.direction.veer_left();
                }
                None
            }
            SteerCommand::Right => {
                if self.direction == Direction::Right {
                    self.map_pos.x += self.speed;
                    return Some(Direction::Right);
                }
                if self.direction == Direction::Crashed {
                    self.direction = Direction::DownRight;
                } else {
                    self.direction = self.direction.veer_right();
                }
                None
            }
            SteerCommand::Up => {
                // Climbing only works from a full sideways stance.
                if matches!(self.direction, Direction::Left | Direction::Right) {
                    self.map_pos.y -= self.speed;
                    return Some(Direction::Up);
                }
                None
            }
            SteerCommand::Down => {
                self.direction = Direction::Down;
                None
            }
        }
    }

    /// Per-tick movement for the current heading. Returns the heading when
    /// the skier moved; only downhill headings move automatically.
    pub fn advance(&mut self) -> Option<Direction> {
        let diagonal = self.speed / DIAGONAL_DIVISOR;
        match self.direction {
            Direction::DownLeft => {
                // The left diagonal moves in whole units; the right keeps
                // its fraction.
                self.map_pos.x -= diagonal.round();
                self.map_pos.y += diagonal.round();
                Some(Direction::DownLeft)
            }
            Direction::Down => {
                self.map_pos.y += self.speed;
                Some(Direction::Down)
            }
            Direction::DownRight => {
                self.map_pos.x += diagonal;
                self.map_pos.y += diagonal;
                Some(Direction::DownRight)
            }
            _ => None,
        }
    }
}
