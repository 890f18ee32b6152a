//! Brickfall - a breakout-style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scenes)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio sound effects
//! - `settings`: User preferences

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (origin top-left, +y down)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Every directional change renormalizes the velocity to this speed
    pub const BALL_SPEED: f32 = 480.0;
    /// Initial ball position at round start
    pub const BALL_START_X: f32 = 400.0;
    pub const BALL_START_Y: f32 = 400.0;

    /// Brick grid: 20 columns x 5 rows of 40x20 bricks, top edge at y=60
    pub const BRICK_WIDTH: f32 = 40.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_COLUMNS: usize = 20;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COUNT: usize = BRICK_COLUMNS * BRICK_ROWS;
    pub const BRICK_GRID_TOP: f32 = 60.0;

    /// Paddle defaults - 60x10 rect, vertical center fixed at y=500
    pub const PADDLE_WIDTH: f32 = 60.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_CENTER_Y: f32 = 500.0;
    /// Horizontal offset from paddle center is scaled by this before
    /// renormalization, so edge hits rebound at steep angles
    pub const PADDLE_DEFLECT_FACTOR: f32 = 10.0;

    /// Ball spawner
    pub const SPAWNER_CAPACITY: usize = 5;
    /// Live-brick counts that each grant one pending bonus ball
    pub const SPAWN_THRESHOLDS: [u32; 4] = [75, 50, 25, 10];
    /// "Get ready" countdown before a granted ball actually appears (1.0 s)
    pub const SPAWN_DELAY_TICKS: u32 = 120;

    /// Wait after clearing the grid before returning to title (3.0 s)
    pub const CLEAR_WAIT_TICKS: u32 = 3 * 120;
}
