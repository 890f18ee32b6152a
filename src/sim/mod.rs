//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (brick storage order, ball insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{
    remove_lost_balls, resolve_brick_collision, resolve_paddle_collision, resolve_wall_collision,
};
pub use rect::Rect;
pub use state::{Ball, BallSpawner, Brick, BrickGrid, GameEvent, GameState, Paddle, Scene};
pub use tick::{TickInput, tick};
