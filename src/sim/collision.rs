//! Skier/obstacle collision testing
//!
//! Rectangle overlap restricted to the bottom band of each sprite, so only
//! "feet" contact counts. All rectangles are in map coordinates; the skier's
//! is offset by half the viewport, mirroring the centered on-screen sprite.

use super::obstacles::{Obstacle, ObstacleField};
use super::skier::Skier;
use super::sprite::{SpriteSheet, SpriteSize, skier_sprite};
use super::state::Viewport;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    /// Two rectangles overlap iff none of the four separating conditions
    /// hold.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.left > self.right
            || other.right < self.left
            || other.top > self.bottom
            || other.bottom < self.top)
    }
}

/// Bottom collision band of the skier's current sprite.
pub fn skier_rect(skier: &Skier, size: SpriteSize, viewport: &Viewport, margin: f32) -> Rect {
    Rect {
        left: skier.map_pos.x + viewport.width / 2.0,
        right: skier.map_pos.x + size.width + viewport.width / 2.0,
        top: skier.map_pos.y + size.height - margin + viewport.height / 2.0,
        bottom: skier.map_pos.y + size.height + viewport.height / 2.0,
    }
}

/// Bottom collision band of an obstacle sprite.
pub fn obstacle_rect(obstacle: &Obstacle, size: SpriteSize, margin: f32) -> Rect {
    Rect {
        left: obstacle.pos.x,
        right: obstacle.pos.x + size.width,
        top: obstacle.pos.y + size.height - margin,
        bottom: obstacle.pos.y + size.height,
    }
}

/// First obstacle overlapping the skier, in field order. Entities whose
/// sprite dimensions are not known yet are not collidable.
pub fn first_hit<'a>(
    skier: &Skier,
    field: &'a ObstacleField,
    sprites: &SpriteSheet,
    viewport: &Viewport,
    margin: f32,
) -> Option<&'a Obstacle> {
    let skier_size = sprites.size(skier_sprite(skier))?;
    let feet = skier_rect(skier, skier_size, viewport, margin);

    field.obstacles.iter().find(|obstacle| {
        sprites
            .size(obstacle.kind.sprite())
            .map(|size| feet.overlaps(&obstacle_rect(obstacle, size, margin)))
            .unwrap_or(false)
    })
}
