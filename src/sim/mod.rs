//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod traffic;

pub use collision::{Rect, check_collisions, check_goal};
pub use state::{
    Direction, GameEvent, GamePhase, GameState, Heading, LANES, Lane, Obstacle, Player,
};
pub use tick::{TickInput, tick};
pub use traffic::{advance_obstacles, spawn_obstacles, speed_up};
