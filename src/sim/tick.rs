//! Fixed timestep simulation tick
//!
//! Advances the whole game deterministically: one call per timestep,
//! all state in `GameState`, all side effects surfaced as `GameEvent`s.

use glam::Vec2;

use super::collision::{
    remove_lost_balls, resolve_brick_collision, resolve_paddle_collision, resolve_wall_collision,
};
use super::state::{Ball, GameEvent, GameState, Scene};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer x in playfield coordinates - the paddle recenters on it
    pub pointer_x: Option<f32>,
    /// Start a round from the title screen (click/tap/space)
    pub start: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // The paddle tracks the pointer in every scene, like the ball-less
    // title screen of the original
    if let Some(x) = input.pointer_x {
        state.paddle.follow(x);
    }

    match state.scene {
        Scene::Title => {
            if input.start {
                state.start_round();
            }
        }

        Scene::InGame => {
            // Move first, then resolve: bricks, walls, paddle per ball
            {
                let GameState {
                    spawner,
                    bricks,
                    paddle,
                    events,
                    ..
                } = state;

                for ball in spawner.balls_mut() {
                    ball.advance(dt);

                    if resolve_brick_collision(ball, bricks) {
                        events.push(GameEvent::BrickDestroyed);
                    }
                    if resolve_wall_collision(ball) {
                        events.push(GameEvent::WallBounce);
                    }
                    if resolve_paddle_collision(ball, paddle) {
                        events.push(GameEvent::PaddleBounce);
                    }
                }
            }

            let lost = remove_lost_balls(&mut state.spawner);
            for _ in 0..lost {
                state.push_event(GameEvent::BallLost);
            }

            if state.bricks.live_count() == 0 {
                // Round won - wait out the celebration before the title
                state.rounds_cleared += 1;
                state.spawner.clear();
                state.scene = Scene::Cleared;
                state.clear_wait_ticks = CLEAR_WAIT_TICKS;
                state.push_event(GameEvent::RoundCleared);
                return;
            }

            // Bonus balls: crossing a brick-count threshold grants one,
            // which appears after the "get ready" countdown
            state.spawner.note_brick_count(state.bricks.live_count());
            if state.spawner.tick_countdown() {
                let jitter = state.rng_state.launch_jitter();
                let launch_pos = Vec2::new(
                    state.paddle.center().x,
                    PADDLE_CENTER_Y - PADDLE_HEIGHT - BALL_RADIUS * 2.0,
                );
                if state.spawner.spawn(Ball::launched_from(launch_pos, jitter)) {
                    state.push_event(GameEvent::BallSpawned);
                }
            }

            // Round lost once every ball is gone and none is pending
            if state.spawner.is_empty() && !state.spawner.spawn_pending() {
                state.push_event(GameEvent::RoundLost);
                state.return_to_title();
            }
        }

        Scene::Cleared => {
            state.clear_wait_ticks = state.clear_wait_ticks.saturating_sub(1);
            if state.clear_wait_ticks == 0 {
                state.return_to_title();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Brick, BrickGrid};

    fn ticks_of(state: &mut GameState, input: &TickInput, n: u32) {
        for _ in 0..n {
            tick(state, input, SIM_DT);
        }
    }

    #[test]
    fn test_title_to_ingame_on_start() {
        let mut state = GameState::new(12345);
        assert_eq!(state.scene, Scene::Title);

        // Ticking without start input stays on the title
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.scene, Scene::Title);
        assert!(state.spawner.is_empty());

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.scene, Scene::InGame);
        assert_eq!(state.spawner.len(), 1);
        assert_eq!(state.bricks.live_count(), BRICK_COUNT as u32);
        assert!(state.drain_events().contains(&GameEvent::GameStarted));
    }

    #[test]
    fn test_losing_every_ball_returns_to_title() {
        let mut state = GameState::new(12345);
        state.start_round();
        state.drain_events();

        // Drop the only ball below the playfield
        state.spawner.balls_mut()[0].pos = Vec2::new(400.0, PLAYFIELD_HEIGHT + 50.0);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.scene, Scene::Title);
        assert!(state.spawner.is_empty());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::BallLost));
        assert!(events.contains(&GameEvent::RoundLost));
    }

    #[test]
    fn test_clear_waits_before_title() {
        let mut state = GameState::new(12345);
        state.start_round();
        state.drain_events();

        // One live brick left, ball just below it moving up
        state.bricks = BrickGrid::with_bricks(vec![Brick {
            rect: Rect::new(0.0, 60.0, 40.0, 20.0),
            alive: true,
        }]);
        let ball = &mut state.spawner.balls_mut()[0];
        ball.pos = Vec2::new(20.0, 88.0);
        ball.vel = Vec2::new(0.0, -BALL_SPEED);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.bricks.live_count(), 0);
        assert_eq!(state.scene, Scene::Cleared);
        assert!(state.drain_events().contains(&GameEvent::RoundCleared));
        assert_eq!(state.rounds_cleared, 1);

        // The wait must elapse fully before the title returns
        ticks_of(&mut state, &TickInput::default(), CLEAR_WAIT_TICKS - 1);
        assert_eq!(state.scene, Scene::Cleared);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.scene, Scene::Title);
    }

    #[test]
    fn test_bonus_ball_spawns_after_countdown() {
        let mut state = GameState::new(777);
        state.start_round();
        state.drain_events();

        // A single far-corner brick keeps the round alive while putting
        // the live count under every spawn threshold
        state.bricks = BrickGrid::with_bricks(vec![Brick {
            rect: Rect::new(760.0, 60.0, 40.0, 20.0),
            alive: true,
        }]);

        // The initial ball bounces between (400, 400) and the ceiling,
        // never reaching the corner brick or the bottom
        ticks_of(&mut state, &TickInput::default(), SPAWN_DELAY_TICKS - 1);
        assert_eq!(state.spawner.len(), 1);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.spawner.len(), 2);
        assert!(state.drain_events().contains(&GameEvent::BallSpawned));
    }

    #[test]
    fn test_pending_spawn_defers_round_loss() {
        let mut state = GameState::new(777);
        state.start_round();
        state.drain_events();

        state.bricks = BrickGrid::with_bricks(vec![Brick {
            rect: Rect::new(760.0, 60.0, 40.0, 20.0),
            alive: true,
        }]);

        // One tick arms the spawn thresholds, then the ball is lost
        tick(&mut state, &TickInput::default(), SIM_DT);
        state.spawner.balls_mut()[0].pos = Vec2::new(400.0, PLAYFIELD_HEIGHT + 50.0);
        tick(&mut state, &TickInput::default(), SIM_DT);

        // No live ball, but a granted one is counting down - still in game
        assert!(state.spawner.is_empty());
        assert_eq!(state.scene, Scene::InGame);

        // The granted ball arrives and play continues
        ticks_of(&mut state, &TickInput::default(), SPAWN_DELAY_TICKS);
        assert_eq!(state.scene, Scene::InGame);
        assert_eq!(state.spawner.len(), 1);
    }

    #[test]
    fn test_pointer_moves_paddle_in_every_scene() {
        let mut state = GameState::new(1);
        let input = TickInput {
            pointer_x: Some(123.0),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.paddle.center().x, 123.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and input trace stay identical
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                pointer_x: Some(250.0),
                ..Default::default()
            },
            TickInput {
                pointer_x: Some(420.0),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for input in &inputs {
            for _ in 0..50 {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.scene, state2.scene);
        assert_eq!(state1.spawner.balls(), state2.spawner.balls());
        assert_eq!(state1.paddle, state2.paddle);
        assert_eq!(state1.bricks.live_count(), state2.bricks.live_count());
    }
}
