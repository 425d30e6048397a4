//! Sprite identifiers, dimensions, and per-frame scene composition
//!
//! The asset layer owns pixels; the simulation only needs each sprite's
//! drawn size. A missing size means the asset has not loaded yet, and the
//! entity it belongs to is treated as not yet visible.

use std::collections::HashMap;

use glam::Vec2;

use super::obstacles::ObstacleKind;
use super::skier::{Direction, Skier};
use super::state::GameState;

/// Closed set of drawable sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    SkierCrash,
    SkierLeft,
    SkierLeftDown,
    SkierDown,
    SkierRightDown,
    SkierRight,
    SkierJump1,
    SkierJump2,
    SkierJump3,
    SkierJump4,
    SkierJump5,
    Tree,
    TreeCluster,
    Rock1,
    Rock2,
    JumpRamp,
}

impl SpriteId {
    pub const ALL: [SpriteId; 16] = [
        SpriteId::SkierCrash,
        SpriteId::SkierLeft,
        SpriteId::SkierLeftDown,
        SpriteId::SkierDown,
        SpriteId::SkierRightDown,
        SpriteId::SkierRight,
        SpriteId::SkierJump1,
        SpriteId::SkierJump2,
        SpriteId::SkierJump3,
        SpriteId::SkierJump4,
        SpriteId::SkierJump5,
        SpriteId::Tree,
        SpriteId::TreeCluster,
        SpriteId::Rock1,
        SpriteId::Rock2,
        SpriteId::JumpRamp,
    ];

    /// Asset path relative to the web root.
    pub fn asset_path(self) -> &'static str {
        match self {
            SpriteId::SkierCrash => "img/skier_crash.png",
            SpriteId::SkierLeft => "img/skier_left.png",
            SpriteId::SkierLeftDown => "img/skier_left_down.png",
            SpriteId::SkierDown => "img/skier_down.png",
            SpriteId::SkierRightDown => "img/skier_right_down.png",
            SpriteId::SkierRight => "img/skier_right.png",
            SpriteId::SkierJump1 => "img/skier_jump_1.png",
            SpriteId::SkierJump2 => "img/skier_jump_2.png",
            SpriteId::SkierJump3 => "img/skier_jump_3.png",
            SpriteId::SkierJump4 => "img/skier_jump_4.png",
            SpriteId::SkierJump5 => "img/skier_jump_5.png",
            SpriteId::Tree => "img/tree_1.png",
            SpriteId::TreeCluster => "img/tree_cluster.png",
            SpriteId::Rock1 => "img/rock_1.png",
            SpriteId::Rock2 => "img/rock_2.png",
            SpriteId::JumpRamp => "img/jump_ramp.png",
        }
    }
}

impl ObstacleKind {
    pub fn sprite(self) -> SpriteId {
        match self {
            ObstacleKind::Tree => SpriteId::Tree,
            ObstacleKind::TreeCluster => SpriteId::TreeCluster,
            ObstacleKind::Rock1 => SpriteId::Rock1,
            ObstacleKind::Rock2 => SpriteId::Rock2,
            ObstacleKind::JumpRamp => SpriteId::JumpRamp,
        }
    }
}

/// Drawn size of a sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl SpriteSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_extent(self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Sprite dimensions, filled in by the asset layer as images finish loading.
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    sizes: HashMap<SpriteId, SpriteSize>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet with every sprite at the same size. Tests and the headless demo
    /// use this.
    pub fn uniform(size: SpriteSize) -> Self {
        let mut sheet = Self::new();
        for id in SpriteId::ALL {
            sheet.set_size(id, size);
        }
        sheet
    }

    pub fn set_size(&mut self, id: SpriteId, size: SpriteSize) {
        self.sizes.insert(id, size);
    }

    pub fn size(&self, id: SpriteId) -> Option<SpriteSize> {
        self.sizes.get(&id).copied()
    }
}

/// Sprite for the skier's current state; jump frames win over facing.
pub fn skier_sprite(skier: &Skier) -> SpriteId {
    if let Some(frame) = skier.jump.frame() {
        return match frame {
            1 => SpriteId::SkierJump1,
            2 => SpriteId::SkierJump2,
            3 => SpriteId::SkierJump3,
            4 => SpriteId::SkierJump4,
            _ => SpriteId::SkierJump5,
        };
    }
    match skier.direction {
        Direction::Crashed => SpriteId::SkierCrash,
        Direction::Left => SpriteId::SkierLeft,
        Direction::DownLeft => SpriteId::SkierLeftDown,
        Direction::Down => SpriteId::SkierDown,
        Direction::DownRight => SpriteId::SkierRightDown,
        Direction::Right | Direction::Up => SpriteId::SkierRight,
    }
}

/// One sprite to draw at a screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInstance {
    pub id: SpriteId,
    pub pos: Vec2,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Absent until the skier's sprite dimensions are known.
    pub skier: Option<SpriteInstance>,
    pub obstacles: Vec<SpriteInstance>,
}

/// Compose the draw list for the current state. The skier stays centered;
/// obstacles scroll relative to it.
pub fn compose_frame(state: &GameState, sprites: &SpriteSheet) -> Frame {
    let viewport = &state.viewport;

    let skier_id = skier_sprite(&state.skier);
    let skier = sprites.size(skier_id).map(|size| SpriteInstance {
        id: skier_id,
        pos: Vec2::new(
            (viewport.width - size.width) / 2.0,
            (viewport.height - size.height) / 2.0,
        ),
    });

    let obstacles = state
        .obstacles
        .obstacles
        .iter()
        .filter_map(|obstacle| {
            let id = obstacle.kind.sprite();
            let size = sprites.size(id)?;
            Some(SpriteInstance {
                id,
                pos: obstacle.pos - state.skier.map_pos - size.half_extent(),
            })
        })
        .collect();

    Frame { skier, obstacles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Jump;

    #[test]
    fn skier_sprite_follows_direction() {
        let mut skier = Skier::new(8.0);
        assert_eq!(skier_sprite(&skier), SpriteId::SkierRight);

        skier.direction = Direction::Crashed;
        assert_eq!(skier_sprite(&skier), SpriteId::SkierCrash);

        skier.direction = Direction::DownLeft;
        assert_eq!(skier_sprite(&skier), SpriteId::SkierLeftDown);
    }

    #[test]
    fn jump_frames_override_facing() {
        let mut skier = Skier::new(8.0);
        skier.direction = Direction::Down;
        skier.jump = Jump::default();
        skier.jump.begin();
        assert_eq!(skier_sprite(&skier), SpriteId::SkierJump1);

        for expected in [
            SpriteId::SkierJump2,
            SpriteId::SkierJump3,
            SpriteId::SkierJump4,
            SpriteId::SkierJump5,
        ] {
            skier.jump.advance();
            assert_eq!(skier_sprite(&skier), expected);
        }
    }

    #[test]
    fn every_sprite_has_an_asset_path() {
        for id in SpriteId::ALL {
            assert!(id.asset_path().starts_with("img/"));
        }
    }
}
