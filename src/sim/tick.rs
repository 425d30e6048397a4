//! Per-frame simulation step
//!
//! One tick per rendered frame: apply the decoded steer command, integrate
//! movement with its spawn checks and scoring, test collisions, cull
//! off-screen obstacles. The jump-frame clock runs on wall-clock time; the
//! shell's timer calls [`advance_jump`] between ticks.

use super::collision;
use super::skier::{Direction, SteerCommand};
use super::sprite::SpriteSheet;
use super::state::{GameEvent, GameState};
use crate::highscores::ScoreStore;

/// Inputs consumed by a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Directional key decoded by the shell, at most one per tick.
    pub command: Option<SteerCommand>,
    /// Toggle pause.
    pub pause: bool,
}

/// Advance the game by one tick. Returns the events the shell reacts to.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    sprites: &SpriteSheet,
    store: &mut dyn ScoreStore,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        state.paused = !state.paused;
    }
    if state.paused {
        return events;
    }

    state.time_ticks += 1;

    // Steering first: the command arrived since the previous frame. Sidesteps
    // and climbs roll a spawn check but never score.
    if let Some(command) = input.command {
        if let Some(heading) = state.skier.steer(command) {
            let skier_pos = state.skier.map_pos;
            state.obstacles.spawn_for_movement(
                &mut state.rng,
                heading,
                skier_pos,
                &state.viewport,
                state.tuning.placement_buffer,
                state.tuning.spawn_roll_max,
            );
        }
    }

    // Automatic downhill movement, with its spawn check and scoring.
    if let Some(heading) = state.skier.advance() {
        let skier_pos = state.skier.map_pos;
        state.obstacles.spawn_for_movement(
            &mut state.rng,
            heading,
            skier_pos,
            &state.viewport,
            state.tuning.placement_buffer,
            state.tuning.spawn_roll_max,
        );

        let change = state
            .score
            .record_movement(state.skier.jump.airborne(), state.tuning.ticks_per_point);
        if change.new_all_time {
            store.store(state.score.all_time_high_score);
            events.push(GameEvent::NewAllTimeHigh);
        }
    }

    // Feet-band collision: a ramp launches a downhill skier, anything else
    // crashes a grounded one.
    if let Some(hit) = collision::first_hit(
        &state.skier,
        &state.obstacles,
        sprites,
        &state.viewport,
        state.tuning.collision_margin,
    ) {
        if hit.kind.is_ramp() && state.skier.direction.is_downhill() {
            if !state.skier.jump.airborne() {
                state.skier.jump.begin();
                events.push(GameEvent::JumpStarted);
            }
        } else if !state.skier.jump.airborne() {
            state.skier.direction = Direction::Crashed;
            state.score.crash();
            events.push(GameEvent::Crashed);
        }
    }

    // Lazy eviction: obstacles leave the field when they leave the screen.
    state.obstacles.cull(
        state.skier.map_pos,
        &state.viewport,
        sprites,
        state.tuning.placement_buffer,
    );

    events
}

/// One fire of the jump-frame timer. Returns true when the jump is over (or
/// none was active) so the shell cancels the timer. Pausing freezes the
/// airborne sequence along with the ticks.
pub fn advance_jump(state: &mut GameState) -> bool {
    if state.paused {
        return false;
    }
    state.skier.jump.advance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::sim::obstacles::{Obstacle, ObstacleKind};
    use crate::sim::sprite::{SpriteSheet, SpriteSize};
    use crate::sim::state::Viewport;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn sheet() -> SpriteSheet {
        SpriteSheet::uniform(SpriteSize::new(32.0, 32.0))
    }

    /// State with an empty slope so tests place obstacles by hand.
    fn bare_state(seed: u64) -> GameState {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut state = GameState::new(seed, viewport, Tuning::default(), 0);
        state.obstacles.obstacles.clear();
        state
    }

    fn down_input() -> TickInput {
        TickInput {
            command: Some(SteerCommand::Down),
            ..Default::default()
        }
    }

    #[test]
    fn one_down_tick_moves_by_speed() {
        let mut state = bare_state(3);
        let mut store = MemoryScoreStore::new();

        tick(&mut state, &down_input(), &sheet(), &mut store);
        assert_eq!(state.skier.map_pos, Vec2::new(0.0, 8.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn three_downhill_ticks_earn_a_point() {
        let mut state = bare_state(4);
        let mut store = MemoryScoreStore::new();
        let mut input = down_input();

        for _ in 0..3 {
            tick(&mut state, &input, &sheet(), &mut store);
            input.command = None;
        }
        assert_eq!(state.score.points, 1);
        assert_eq!(state.score.movement_credit(), 0);
        // The new all-time value was pushed through the store.
        assert_eq!(store.stored(), Some(1));
    }

    #[test]
    fn sidestep_checks_for_spawns_but_never_scores() {
        let mut state = bare_state(5);
        let mut store = MemoryScoreStore::new();
        // Facing right from the start; each press is a sidestep.
        let input = TickInput {
            command: Some(SteerCommand::Right),
            ..Default::default()
        };

        for _ in 0..12 {
            tick(&mut state, &input, &sheet(), &mut store);
        }
        assert_eq!(state.score.points, 0);
        assert_eq!(state.skier.map_pos.x, 12.0 * 8.0);
        assert_eq!(state.skier.map_pos.y, 0.0);
    }

    #[test]
    fn hitting_a_tree_crashes_and_zeroes_points() {
        let mut state = bare_state(6);
        let mut store = MemoryScoreStore::new();
        state.skier.direction = Direction::Down;
        // Where the skier's feet band lands after one 8-unit step.
        state.obstacles.obstacles.push(Obstacle {
            pos: Vec2::new(400.0, 308.0),
            kind: ObstacleKind::Tree,
        });

        let events = tick(&mut state, &TickInput::default(), &sheet(), &mut store);
        assert!(events.contains(&GameEvent::Crashed));
        assert_eq!(state.skier.direction, Direction::Crashed);
        assert_eq!(state.score.points, 0);
    }

    #[test]
    fn ramp_hit_while_downhill_starts_a_jump() {
        let mut state = bare_state(7);
        let mut store = MemoryScoreStore::new();
        state.skier.direction = Direction::Down;
        state.obstacles.obstacles.push(Obstacle {
            pos: Vec2::new(400.0, 308.0),
            kind: ObstacleKind::JumpRamp,
        });

        let events = tick(&mut state, &TickInput::default(), &sheet(), &mut store);
        assert!(events.contains(&GameEvent::JumpStarted));
        assert!(state.skier.jump.airborne());
        assert_eq!(state.skier.jump.frame(), Some(1));
        assert_eq!(state.skier.direction, Direction::Down);

        // Five timer fires walk the frames and land.
        for expected in [Some(2), Some(3), Some(4), Some(5)] {
            assert!(!advance_jump(&mut state));
            assert_eq!(state.skier.jump.frame(), expected);
        }
        assert!(advance_jump(&mut state));
        assert!(!state.skier.jump.airborne());
    }

    #[test]
    fn ramp_hit_sideways_crashes_instead() {
        let mut state = bare_state(8);
        let mut store = MemoryScoreStore::new();
        // Resting fully right on top of a ramp.
        state.obstacles.obstacles.push(Obstacle {
            pos: Vec2::new(400.0, 300.0),
            kind: ObstacleKind::JumpRamp,
        });

        let events = tick(&mut state, &TickInput::default(), &sheet(), &mut store);
        assert!(events.contains(&GameEvent::Crashed));
        assert_eq!(state.skier.direction, Direction::Crashed);
    }

    #[test]
    fn airborne_skier_ignores_ordinary_obstacles() {
        let mut state = bare_state(9);
        let mut store = MemoryScoreStore::new();
        state.skier.direction = Direction::Down;
        state.skier.jump.begin();
        state.obstacles.obstacles.push(Obstacle {
            pos: Vec2::new(400.0, 308.0),
            kind: ObstacleKind::Tree,
        });

        let events = tick(&mut state, &TickInput::default(), &sheet(), &mut store);
        assert!(!events.contains(&GameEvent::Crashed));
        assert_eq!(state.skier.direction, Direction::Down);
        // The airborne movement still scored.
        assert_eq!(state.score.points, 1);
    }

    #[test]
    fn pause_suspends_ticks_and_jump_frames() {
        let mut state = bare_state(10);
        let mut store = MemoryScoreStore::new();
        state.skier.direction = Direction::Down;
        state.skier.jump.begin();

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, &sheet(), &mut store);
        assert!(state.paused);

        let before = state.skier.map_pos;
        tick(&mut state, &TickInput::default(), &sheet(), &mut store);
        assert_eq!(state.skier.map_pos, before);
        assert_eq!(state.time_ticks, 0);

        // The jump clock is frozen too.
        assert!(!advance_jump(&mut state));
        assert_eq!(state.skier.jump.frame(), Some(1));

        // The unpausing tick itself resumes movement.
        tick(&mut state, &pause, &sheet(), &mut store);
        assert_eq!(state.skier.map_pos.y, before.y + 8.0);
        tick(&mut state, &TickInput::default(), &sheet(), &mut store);
        assert_eq!(state.skier.map_pos.y, before.y + 16.0);
    }

    #[test]
    fn all_time_high_survives_crash_and_reset() {
        let mut state = bare_state(11);
        let mut store = MemoryScoreStore::new();
        let mut input = down_input();

        // Earn 5 points.
        for _ in 0..15 {
            tick(&mut state, &input, &sheet(), &mut store);
            input.command = None;
        }
        assert_eq!(state.score.points, 5);
        assert_eq!(store.stored(), Some(5));

        state.skier.direction = Direction::Crashed;
        state.score.crash();
        assert_eq!(state.score.points, 0);

        state.reset(12);
        assert_eq!(state.score.points, 0);
        assert_eq!(state.skier.direction, Direction::Right);
        assert_eq!(state.score.all_time_high_score, 5);
        assert_eq!(store.stored(), Some(5));
    }

    #[test]
    fn culled_obstacles_never_come_back() {
        let mut state = bare_state(13);
        let mut store = MemoryScoreStore::new();
        // Behind the skier, far above the viewport once ticks move it down.
        let stale = Obstacle {
            pos: Vec2::new(200.0, -900.0),
            kind: ObstacleKind::Rock2,
        };
        state.obstacles.obstacles.push(stale);

        let mut input = down_input();
        for _ in 0..20 {
            tick(&mut state, &input, &sheet(), &mut store);
            input.command = None;
        }
        assert!(!state.obstacles.obstacles.contains(&stale));
    }

    #[test]
    fn determinism_given_a_seed() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut a = GameState::new(99, viewport, Tuning::default(), 0);
        let mut b = GameState::new(99, viewport, Tuning::default(), 0);
        let mut store_a = MemoryScoreStore::new();
        let mut store_b = MemoryScoreStore::new();

        let mut input = down_input();
        for _ in 0..120 {
            tick(&mut a, &input, &sheet(), &mut store_a);
            tick(&mut b, &input, &sheet(), &mut store_b);
            input.command = None;
        }

        assert_eq!(a.skier.map_pos, b.skier.map_pos);
        assert_eq!(a.score.points, b.score.points);
        assert_eq!(a.obstacles.obstacles, b.obstacles.obstacles);
    }
}
