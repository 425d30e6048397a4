//! Obstacle field: procedural placement, movement spawns, viewport culling
//!
//! Obstacles live in the same absolute map space as the skier. Placement
//! rejection-samples open positions against a clearance buffer; removal only
//! happens when an obstacle's rendered rectangle leaves the viewport.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::skier::Direction;
use super::sprite::SpriteSheet;
use super::state::Viewport;
use crate::consts::{
    INITIAL_DENSITY_HIGH, INITIAL_DENSITY_LOW, INITIAL_ROW_CLEARANCE, MAX_PLACEMENT_ATTEMPTS,
};

/// Everything that can be planted on the slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Tree,
    TreeCluster,
    Rock1,
    Rock2,
    JumpRamp,
}

impl ObstacleKind {
    /// Active set used for random placement.
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Tree,
        ObstacleKind::TreeCluster,
        ObstacleKind::Rock1,
        ObstacleKind::Rock2,
        ObstacleKind::JumpRamp,
    ];

    /// Ramps launch the skier instead of crashing it.
    pub fn is_ramp(self) -> bool {
        self == ObstacleKind::JumpRamp
    }
}

/// One placed obstacle. Immutable until culled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub kind: ObstacleKind,
}

/// Axis-aligned placement region in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Region {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Sampling needs positive area on both axes to terminate.
    fn is_degenerate(&self) -> bool {
        !(self.min_x < self.max_x) || !(self.min_y < self.max_y)
    }
}

/// Why a placement attempt produced no obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Inverted or zero-area region; sampling it would never finish.
    InvalidRegion,
    /// No clear spot found within the attempt bound.
    NoOpenPosition,
}

/// The set of live obstacles, in placement order.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Seed the slope below the skier's starting row. The count scales with
    /// how wide the viewport is relative to its height.
    pub fn populate_initial(&mut self, rng: &mut Pcg32, viewport: &Viewport, buffer: f32) {
        let count = (viewport.width / viewport.height).ceil() as u32
            * rng.random_range(INITIAL_DENSITY_LOW..=INITIAL_DENSITY_HIGH);

        let region = Region::new(
            -buffer,
            viewport.width + buffer,
            viewport.height / 2.0 + INITIAL_ROW_CLEARANCE,
            viewport.height + buffer,
        );
        for _ in 0..count {
            if let Err(err) = self.place_random(rng, region, buffer) {
                log::warn!("Skipped an initial obstacle: {:?}", err);
            }
        }

        // First-frame draw order follows y.
        self.obstacles.sort_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        log::info!("Placed {} initial obstacles", self.obstacles.len());
    }

    /// Place one obstacle of random kind at a clear spot inside `region`.
    pub fn place_random(
        &mut self,
        rng: &mut Pcg32,
        region: Region,
        buffer: f32,
    ) -> Result<(), PlacementError> {
        if region.is_degenerate() {
            return Err(PlacementError::InvalidRegion);
        }

        let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
        let pos = self.open_position(rng, region, buffer)?;
        self.obstacles.push(Obstacle { pos, kind });
        Ok(())
    }

    /// Rejection-sample a point clear of every existing obstacle. A point is
    /// blocked only when it sits within `buffer` of a center on both axes at
    /// once. Attempt-bounded: a crowded strip must produce an error, not an
    /// endless loop.
    fn open_position(
        &self,
        rng: &mut Pcg32,
        region: Region,
        buffer: f32,
    ) -> Result<Vec2, PlacementError> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = rng.random_range(region.min_x..region.max_x);
            let y = rng.random_range(region.min_y..region.max_y);

            let blocked = self
                .obstacles
                .iter()
                .any(|o| (x - o.pos.x).abs() < buffer && (y - o.pos.y).abs() < buffer);
            if !blocked {
                return Ok(Vec2::new(x, y));
            }
        }
        Err(PlacementError::NoOpenPosition)
    }

    /// Roll for a new obstacle after a movement step. Only the top roll value
    /// spawns; the spawn strip sits just past the viewport edge the skier is
    /// moving toward, and the diagonals feed two strips at once.
    pub fn spawn_for_movement(
        &mut self,
        rng: &mut Pcg32,
        heading: Direction,
        skier_pos: Vec2,
        viewport: &Viewport,
        buffer: f32,
        roll_max: u32,
    ) {
        if rng.random_range(1..=roll_max) != roll_max {
            return;
        }

        let left = skier_pos.x;
        let right = skier_pos.x + viewport.width;
        let top = skier_pos.y;
        let bottom = skier_pos.y + viewport.height;

        let left_strip = Region::new(left - buffer, left, top, bottom);
        let right_strip = Region::new(right, right + buffer, top, bottom);
        let top_strip = Region::new(left, right, top - buffer, top);
        let bottom_strip = Region::new(left, right, bottom, bottom + buffer);

        match heading {
            Direction::Left => self.place_logged(rng, left_strip, buffer, heading),
            Direction::DownLeft => {
                self.place_logged(rng, left_strip, buffer, heading);
                self.place_logged(rng, bottom_strip, buffer, heading);
            }
            Direction::Down => self.place_logged(rng, bottom_strip, buffer, heading),
            Direction::DownRight => {
                self.place_logged(rng, right_strip, buffer, heading);
                self.place_logged(rng, bottom_strip, buffer, heading);
            }
            Direction::Right => self.place_logged(rng, right_strip, buffer, heading),
            Direction::Up => self.place_logged(rng, top_strip, buffer, heading),
            Direction::Crashed => {}
        }
    }

    fn place_logged(&mut self, rng: &mut Pcg32, region: Region, buffer: f32, heading: Direction) {
        if let Err(err) = self.place_random(rng, region, buffer) {
            log::warn!("Skipped a spawn toward {:?}: {:?}", heading, err);
        }
    }

    /// Drop every obstacle whose rendered rectangle left the viewport, with a
    /// generous margin. This is the only removal path. Obstacles without
    /// known sprite dimensions stay: they are not visible yet, so they cannot
    /// have scrolled off screen.
    pub fn cull(&mut self, skier_pos: Vec2, viewport: &Viewport, sprites: &SpriteSheet, buffer: f32) {
        self.obstacles.retain(|obstacle| {
            let Some(size) = sprites.size(obstacle.kind.sprite()) else {
                return true;
            };
            let screen = obstacle.pos - skier_pos - size.half_extent();
            screen.x >= buffer * -2.0
                && screen.x <= viewport.width + buffer
                && screen.y >= buffer * -2.0
                && screen.y <= viewport.height + buffer
        });
    }
}
