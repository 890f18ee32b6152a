//! Game state and core simulation types
//!
//! All state lives in one `GameState` passed through `tick` - no globals.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Current scene of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    /// Title screen, waiting for start input
    Title,
    /// Active gameplay
    InGame,
    /// Grid cleared - short wait before returning to title
    Cleared,
}

/// Things that happened during a tick, drained by the platform layer
/// for audio and HUD. The sim never touches audio directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Round started from the title screen
    GameStarted,
    /// A brick was destroyed
    BrickDestroyed,
    /// Ball reflected off the ceiling or a side wall
    WallBounce,
    /// Ball deflected off the paddle
    PaddleBounce,
    /// A bonus ball appeared
    BallSpawned,
    /// A ball fell past the bottom of the playfield
    BallLost,
    /// Every live ball was lost - round over
    RoundLost,
    /// Last brick destroyed - round won
    RoundCleared,
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball at the round-start position, heading straight up at full speed
    pub fn at_start() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::new(0.0, -BALL_SPEED),
            radius: BALL_RADIUS,
        }
    }

    /// Ball launched from a point with a small angular offset from vertical
    pub fn launched_from(pos: Vec2, jitter: f32) -> Self {
        let dir = Vec2::new(jitter.sin(), -jitter.cos());
        Self {
            pos,
            vel: dir * BALL_SPEED,
            radius: BALL_RADIUS,
        }
    }

    /// Advance position by one timestep
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Point the ball along `dir`, renormalized to the fixed speed
    ///
    /// A zero direction falls back to straight up rather than stalling.
    pub fn set_direction(&mut self, dir: Vec2) {
        let dir = dir.normalize_or_zero();
        if dir == Vec2::ZERO {
            self.vel = Vec2::new(0.0, -BALL_SPEED);
        } else {
            self.vel = dir * BALL_SPEED;
        }
    }

    /// Invert the horizontal velocity component
    pub fn reflect_x(&mut self) {
        self.set_direction(Vec2::new(-self.vel.x, self.vel.y));
    }

    /// Invert the vertical velocity component
    pub fn reflect_y(&mut self) {
        self.set_direction(Vec2::new(self.vel.x, -self.vel.y));
    }

    /// True once the ball has fallen entirely below the playfield
    pub fn below_playfield(&self) -> bool {
        self.pos.y - self.radius > PLAYFIELD_HEIGHT
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::from_center(
                Vec2::new(PLAYFIELD_WIDTH / 2.0, PADDLE_CENTER_Y),
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
        }
    }
}

impl Paddle {
    /// Recenter on the pointer, clamped so the paddle stays on screen
    pub fn follow(&mut self, pointer_x: f32) {
        let half = PADDLE_WIDTH / 2.0;
        let cx = pointer_x.clamp(half, PLAYFIELD_WIDTH - half);
        self.rect.x = cx - half;
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// A single brick. Destruction is a first-class flag, not a geometry hack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub alive: bool,
}

/// The fixed brick grid, row-major storage order
///
/// Slots are never removed; a destroyed brick stays in place with
/// `alive == false` so "first intersecting brick in storage order"
/// is stable for the whole round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    bricks: Vec<Brick>,
    live_count: u32,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickGrid {
    /// Build the full grid with every brick alive
    pub fn new() -> Self {
        let mut bricks = Vec::with_capacity(BRICK_COUNT);
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLUMNS {
                bricks.push(Brick {
                    rect: Rect::new(
                        col as f32 * BRICK_WIDTH,
                        BRICK_GRID_TOP + row as f32 * BRICK_HEIGHT,
                        BRICK_WIDTH,
                        BRICK_HEIGHT,
                    ),
                    alive: true,
                });
            }
        }
        Self {
            bricks,
            live_count: BRICK_COUNT as u32,
        }
    }

    /// Restore every brick for a fresh round
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of bricks still alive
    #[inline]
    pub fn live_count(&self) -> u32 {
        self.live_count
    }

    #[inline]
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    /// Iterate (index, brick) over live bricks in storage order
    pub fn live_bricks(&self) -> impl Iterator<Item = (usize, &Brick)> {
        self.bricks.iter().enumerate().filter(|(_, b)| b.alive)
    }

    /// Build a grid from explicit bricks (tests only)
    #[cfg(test)]
    pub(crate) fn with_bricks(bricks: Vec<Brick>) -> Self {
        let live_count = bricks.iter().filter(|b| b.alive).count() as u32;
        Self { bricks, live_count }
    }

    /// Mark a brick destroyed and decrement the live counter
    ///
    /// No-op if the index is out of range or the brick is already dead.
    pub fn destroy(&mut self, index: usize) {
        if let Some(brick) = self.bricks.get_mut(index) {
            if brick.alive {
                brick.alive = false;
                self.live_count -= 1;
            }
        }
    }
}

/// Owns every live ball plus the bonus-ball bookkeeping
///
/// A plain owning `Vec` of value-type balls - capacity is enforced by
/// `spawn`, which silently refuses once `SPAWNER_CAPACITY` is reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BallSpawner {
    balls: Vec<Ball>,
    /// Balls granted by crossed thresholds but not yet spawned
    granted: u32,
    /// Ticks until the next granted ball appears (0 = nothing pending)
    countdown: u32,
    /// How many entries of `SPAWN_THRESHOLDS` have been crossed
    thresholds_crossed: usize,
}

impl BallSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    #[inline]
    pub fn balls_mut(&mut self) -> &mut Vec<Ball> {
        &mut self.balls
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    /// True while a granted ball is waiting out its countdown
    #[inline]
    pub fn spawn_pending(&self) -> bool {
        self.granted > 0
    }

    /// Ticks left on the current countdown (for the HUD)
    #[inline]
    pub fn countdown_ticks(&self) -> u32 {
        self.countdown
    }

    /// Add a ball if capacity remains. Returns false (and does nothing)
    /// at capacity - not an error.
    pub fn spawn(&mut self, ball: Ball) -> bool {
        if self.balls.len() >= SPAWNER_CAPACITY {
            return false;
        }
        self.balls.push(ball);
        true
    }

    /// Release every ball and reset the bonus bookkeeping
    pub fn clear(&mut self) {
        self.balls.clear();
        self.granted = 0;
        self.countdown = 0;
        self.thresholds_crossed = 0;
    }

    /// Grant pending balls for every newly crossed brick-count threshold
    pub fn note_brick_count(&mut self, live: u32) {
        while self.thresholds_crossed < SPAWN_THRESHOLDS.len()
            && live <= SPAWN_THRESHOLDS[self.thresholds_crossed]
        {
            self.thresholds_crossed += 1;
            self.granted += 1;
            if self.countdown == 0 {
                self.countdown = SPAWN_DELAY_TICKS;
            }
        }
    }

    /// Count down toward the next pending spawn. Returns true when a
    /// granted ball is due this tick.
    pub fn tick_countdown(&mut self) -> bool {
        if self.granted == 0 {
            return false;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.granted -= 1;
            if self.granted > 0 {
                self.countdown = SPAWN_DELAY_TICKS;
            }
            return true;
        }
        false
    }
}

/// Seeded RNG for bonus-ball launch jitter
///
/// Reseeds a fresh `Pcg32` per draw from (seed, draw counter) so the
/// state stays a pair of plain integers - trivially serializable and
/// clone-stable for determinism tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Small angular offset from vertical for a bonus-ball launch (radians)
    pub fn launch_jitter(&mut self) -> f32 {
        self.draws += 1;
        let mut rng =
            Pcg32::seed_from_u64(self.seed.wrapping_add(self.draws.wrapping_mul(0x9E3779B97F4A7C15)));
        rng.random_range(-0.35..=0.35)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current scene
    pub scene: Scene,
    /// Ticks remaining in the post-clear wait
    pub clear_wait_ticks: u32,
    /// Rounds won this run (for the HUD)
    pub rounds_cleared: u32,
    /// Player paddle
    pub paddle: Paddle,
    /// Brick grid
    pub bricks: BrickGrid,
    /// Ball registry
    pub spawner: BallSpawner,
    /// Events since the last drain (not part of the persisted state)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state at the title screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            time_ticks: 0,
            scene: Scene::Title,
            clear_wait_ticks: 0,
            rounds_cleared: 0,
            paddle: Paddle::default(),
            bricks: BrickGrid::new(),
            spawner: BallSpawner::new(),
            events: Vec::new(),
        }
    }

    /// Record an event for the platform layer to drain
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fresh grid, one ball, into gameplay
    pub fn start_round(&mut self) {
        self.bricks.reset();
        self.spawner.clear();
        self.spawner.spawn(Ball::at_start());
        self.scene = Scene::InGame;
        self.clear_wait_ticks = 0;
        self.push_event(GameEvent::GameStarted);
    }

    /// Back to the title screen, releasing every ball
    pub fn return_to_title(&mut self) {
        self.spawner.clear();
        self.scene = Scene::Title;
        self.clear_wait_ticks = 0;
    }
}
