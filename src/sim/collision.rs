//! Collision detection and response
//!
//! The core of the game: resolving a ball's circle against the brick
//! grid, the paddle, and the playfield walls. Reflections are axis
//! inversions renormalized to the fixed ball speed.

use super::state::{Ball, BallSpawner, BrickGrid, Paddle};
use crate::consts::{PADDLE_DEFLECT_FACTOR, PLAYFIELD_WIDTH};
use glam::Vec2;

/// Resolve the ball against the brick grid
///
/// Scans live bricks in storage order and resolves the FIRST one whose
/// bounds overlap the ball's circle:
/// - contact with the brick's top or bottom edge inverts the vertical
///   velocity component; any other contact inverts the horizontal one.
///   Ties (corner hits) always reflect vertically - the horizontal-edge
///   test runs first, unconditionally.
/// - the brick is destroyed and the live counter decremented.
///
/// At most one brick is resolved per ball per call. Simultaneous
/// multi-brick overlap in one tick is deliberately not resolved; the
/// remaining bricks are seen on later ticks.
///
/// Returns true if a brick was hit.
pub fn resolve_brick_collision(ball: &mut Ball, grid: &mut BrickGrid) -> bool {
    let mut hit = None;

    for (index, brick) in grid.live_bricks() {
        if !brick.rect.overlaps_circle(ball.pos, ball.radius) {
            continue;
        }

        if brick.rect.circle_hits_horizontal_edge(ball.pos, ball.radius) {
            ball.reflect_y();
        } else {
            ball.reflect_x();
        }
        hit = Some(index);
        break;
    }

    match hit {
        Some(index) => {
            grid.destroy(index);
            true
        }
        None => false,
    }
}

/// Deflect the ball off the paddle
///
/// Only applies while the ball is moving downward, toward the paddle.
/// The rebound direction comes from the horizontal offset between ball
/// center and paddle center, scaled by a fixed factor and combined with
/// the sign-flipped vertical component, then renormalized: a center hit
/// rebounds near-vertically, an edge hit at a steep angle.
///
/// Returns true if the ball was deflected.
pub fn resolve_paddle_collision(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.vel.y <= 0.0 {
        return false;
    }
    if !paddle.rect.overlaps_circle(ball.pos, ball.radius) {
        return false;
    }

    let offset = ball.pos.x - paddle.center().x;
    ball.set_direction(Vec2::new(offset * PADDLE_DEFLECT_FACTOR, -ball.vel.y));
    true
}

/// Reflect the ball off the ceiling and side walls
///
/// Only the top, left, and right boundaries exist; the bottom is open
/// and falling past it is the ball's failure condition, handled by the
/// caller. Each check requires the ball to be moving toward the
/// boundary so a ball already heading back in is left alone.
///
/// Returns true if any reflection happened.
pub fn resolve_wall_collision(ball: &mut Ball) -> bool {
    let mut bounced = false;

    // Ceiling
    if ball.pos.y < 0.0 && ball.vel.y < 0.0 {
        ball.reflect_y();
        bounced = true;
    }

    // Side walls
    if (ball.pos.x < 0.0 && ball.vel.x < 0.0)
        || (ball.pos.x > PLAYFIELD_WIDTH && ball.vel.x > 0.0)
    {
        ball.reflect_x();
        bounced = true;
    }

    bounced
}

/// Remove every ball that fell below the playfield
///
/// Returns how many were lost.
pub fn remove_lost_balls(spawner: &mut BallSpawner) -> usize {
    let before = spawner.len();
    spawner.balls_mut().retain(|ball| !ball.below_playfield());
    before - spawner.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::Brick;
    use proptest::prelude::*;

    /// Grid whose only brick sits at the given rect
    fn grid_with_single_brick(rect: Rect) -> (BrickGrid, usize) {
        let grid = BrickGrid::with_bricks(vec![Brick { rect, alive: true }]);
        (grid, 0)
    }

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        Ball {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }

    #[test]
    fn test_top_edge_hit_reflects_vertically() {
        // Brick at (100, 100)-(140, 120); ball just above its top edge,
        // clear of both side edges, moving down-right
        let (mut grid, _) = grid_with_single_brick(Rect::new(100.0, 100.0, 40.0, 20.0));
        let mut ball = ball_at(Vec2::new(120.0, 92.0), Vec2::new(200.0, 436.0));

        assert!(resolve_brick_collision(&mut ball, &mut grid));
        assert!(ball.vel.y < 0.0, "vertical sign inverted");
        assert!(ball.vel.x > 0.0, "horizontal sign unchanged");
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_side_edge_hit_reflects_horizontally() {
        // Ball just left of the brick's left edge, vertically inside the
        // brick so it cannot reach the top or bottom edge
        let (mut grid, _) = grid_with_single_brick(Rect::new(100.0, 100.0, 40.0, 20.0));
        let mut ball = ball_at(Vec2::new(92.0, 110.0), Vec2::new(480.0, 0.0));

        assert!(resolve_brick_collision(&mut ball, &mut grid));
        assert!(ball.vel.x < 0.0, "horizontal sign inverted");
        assert_eq!(ball.vel.y, 0.0, "vertical sign unchanged");
    }

    #[test]
    fn test_corner_hit_reflects_vertically() {
        // Overlapping the top-left corner touches both edge families;
        // the horizontal-edge test wins unconditionally
        let (mut grid, _) = grid_with_single_brick(Rect::new(100.0, 100.0, 40.0, 20.0));
        let mut ball = ball_at(Vec2::new(95.0, 95.0), Vec2::new(300.0, 375.0));

        assert!(resolve_brick_collision(&mut ball, &mut grid));
        assert!(ball.vel.y < 0.0);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_only_first_brick_resolved_per_tick() {
        // Two adjacent live bricks, ball overlapping both side edges at
        // their shared boundary - only the first in storage order dies
        let mut grid = BrickGrid::with_bricks(vec![
            Brick {
                rect: Rect::new(100.0, 100.0, 40.0, 20.0),
                alive: true,
            },
            Brick {
                rect: Rect::new(140.0, 100.0, 40.0, 20.0),
                alive: true,
            },
        ]);
        let mut ball = ball_at(Vec2::new(140.0, 130.0), Vec2::new(0.0, -480.0));

        assert!(resolve_brick_collision(&mut ball, &mut grid));
        assert_eq!(grid.live_count(), 1);
        assert!(!grid.bricks()[0].alive);
        assert!(grid.bricks()[1].alive);
    }

    #[test]
    fn test_dead_bricks_are_ignored() {
        let (mut grid, index) = grid_with_single_brick(Rect::new(100.0, 100.0, 40.0, 20.0));
        grid.destroy(index);
        let mut ball = ball_at(Vec2::new(120.0, 92.0), Vec2::new(0.0, 480.0));

        assert!(!resolve_brick_collision(&mut ball, &mut grid));
        assert_eq!(ball.vel, Vec2::new(0.0, 480.0));
    }

    #[test]
    fn test_ceiling_reflection() {
        let mut ball = ball_at(Vec2::new(400.0, -1.0), Vec2::new(0.0, -480.0));
        assert!(resolve_wall_collision(&mut ball));
        assert_eq!(ball.vel, Vec2::new(0.0, 480.0));
    }

    #[test]
    fn test_side_wall_reflections() {
        let mut ball = ball_at(Vec2::new(-2.0, 300.0), Vec2::new(-480.0, 0.0));
        assert!(resolve_wall_collision(&mut ball));
        assert!(ball.vel.x > 0.0);

        let mut ball = ball_at(Vec2::new(PLAYFIELD_WIDTH + 2.0, 300.0), Vec2::new(480.0, 0.0));
        assert!(resolve_wall_collision(&mut ball));
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_wall_ignores_ball_moving_away() {
        // Past the wall but already heading back in - no double flip
        let mut ball = ball_at(Vec2::new(-2.0, 300.0), Vec2::new(480.0, 0.0));
        assert!(!resolve_wall_collision(&mut ball));
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_paddle_center_hit_rebounds_vertically() {
        let mut paddle = Paddle::default();
        paddle.follow(500.0);
        let mut ball = ball_at(Vec2::new(500.0, 492.0), Vec2::new(0.0, 480.0));

        assert!(resolve_paddle_collision(&mut ball, &paddle));
        assert!(ball.vel.y < 0.0);
        assert!(ball.vel.x.abs() < 0.001, "center hit is near-vertical");
        assert!((ball.vel.length() - BALL_SPEED).abs() < 0.01);
    }

    #[test]
    fn test_paddle_edge_hit_rebounds_steeply() {
        let mut paddle = Paddle::default();
        paddle.follow(500.0);
        // Struck at the paddle's left edge (offset -30)
        let mut ball = ball_at(Vec2::new(470.0, 492.0), Vec2::new(0.0, 480.0));

        assert!(resolve_paddle_collision(&mut ball, &paddle));
        assert!(ball.vel.x < 0.0, "leftward rebound");
        assert!(ball.vel.y < 0.0);
        // offset * factor = -300 horizontal vs 480 vertical: steep angle
        assert!(ball.vel.x.abs() > 100.0);
        assert!((ball.vel.length() - BALL_SPEED).abs() < 0.01);
    }

    #[test]
    fn test_paddle_ignores_upward_ball() {
        let mut paddle = Paddle::default();
        paddle.follow(500.0);
        let mut ball = ball_at(Vec2::new(500.0, 492.0), Vec2::new(0.0, -480.0));

        assert!(!resolve_paddle_collision(&mut ball, &paddle));
        assert_eq!(ball.vel, Vec2::new(0.0, -480.0));
    }

    #[test]
    fn test_remove_lost_balls() {
        let mut spawner = BallSpawner::new();
        spawner.spawn(ball_at(Vec2::new(400.0, 300.0), Vec2::new(0.0, 480.0)));
        spawner.spawn(ball_at(
            Vec2::new(400.0, PLAYFIELD_HEIGHT + BALL_RADIUS + 1.0),
            Vec2::new(0.0, 480.0),
        ));

        assert_eq!(remove_lost_balls(&mut spawner), 1);
        assert_eq!(spawner.len(), 1);
    }

    proptest! {
        /// Renormalization invariant: after any reflection the speed is
        /// exactly the configured constant
        #[test]
        fn prop_reflection_renormalizes_speed(
            vx in -600.0f32..600.0,
            vy in -600.0f32..600.0,
            flip_x in any::<bool>(),
        ) {
            prop_assume!(vx.abs() > 1.0 || vy.abs() > 1.0);
            let mut ball = ball_at(Vec2::new(400.0, 300.0), Vec2::new(vx, vy));
            if flip_x {
                ball.reflect_x();
            } else {
                ball.reflect_y();
            }
            prop_assert!((ball.vel.length() - BALL_SPEED).abs() < 0.01);
        }

        /// Paddle deflection renormalizes regardless of where the ball strikes
        #[test]
        fn prop_paddle_deflection_renormalizes_speed(
            offset in -30.0f32..30.0,
            vy in 1.0f32..600.0,
        ) {
            let mut paddle = Paddle::default();
            paddle.follow(500.0);
            let mut ball = ball_at(Vec2::new(500.0 + offset, 492.0), Vec2::new(0.0, vy));
            prop_assume!(resolve_paddle_collision(&mut ball, &paddle));
            prop_assert!((ball.vel.length() - BALL_SPEED).abs() < 0.01);
            prop_assert!(ball.vel.y < 0.0);
        }
    }
}
