//! Road Hopper - A lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (traffic, collisions, game state)
//! - `game`: Frame-driven loop driver and the renderer/display seams
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native input mapping
//! - `settings`: Player preferences

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{DisplaySink, Game, Hud, LoopControl, Renderer};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, obstacle speeds are in px/tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame we account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (pixels, origin top-left, y down)
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_STEP: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 280.0;
    pub const PLAYER_START_Y: f32 = 360.0;

    /// Reaching y <= GOAL_LINE counts as a crossing
    pub const GOAL_LINE: f32 = 40.0;
    pub const CROSSING_POINTS: u32 = 100;
    /// Added to every obstacle's speed on each crossing
    pub const SPEED_BUMP: f32 = 0.1;
    pub const STARTING_LIVES: u32 = 3;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_HEIGHT: f32 = 30.0;
    /// Horizontal gap between consecutive spawns in one lane
    pub const SPAWN_SPACING: f32 = 150.0;
    /// Obstacles per lane, inclusive range
    pub const MIN_OBSTACLES_PER_LANE: usize = 2;
    pub const MAX_OBSTACLES_PER_LANE: usize = 4;
    /// Off-screen margin used for rightward spawn and recycle
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// A leftward obstacle is recycled once x drops below this
    pub const LEFT_RECYCLE_X: f32 = -160.0;
    /// Random extra offset applied when recycling, [0, RECYCLE_JITTER)
    pub const RECYCLE_JITTER: f32 = 200.0;

    /// Minimum swipe distance along the dominant axis (exclusive)
    pub const SWIPE_THRESHOLD: f32 = 30.0;
}
