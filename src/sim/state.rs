//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`], owned by a single
//! driver and passed by reference into the traffic, collision and goal steps.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::traffic::spawn_obstacles;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ticks advance and input is accepted
    Running,
    /// Out of lives; only a restart leaves this phase
    GameOver,
}

/// Which way a lane's traffic travels along x
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Right,
    Left,
}

impl Heading {
    /// +1 for rightward, -1 for leftward
    pub fn sign(self) -> f32 {
        match self {
            Heading::Right => 1.0,
            Heading::Left => -1.0,
        }
    }
}

/// A single step request from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit displacement in field coordinates (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }
}

/// Template for the traffic of one horizontal strip of road
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    /// Top edge of obstacles spawned in this lane
    pub y: f32,
    pub base_speed: f32,
    pub heading: Heading,
    /// 0xRRGGBB
    pub color: u32,
}

/// The road, bottom lane first
pub const LANES: [Lane; 6] = [
    Lane { y: 280.0, base_speed: 2.0, heading: Heading::Right, color: 0xFF6B6B },
    Lane { y: 240.0, base_speed: 3.0, heading: Heading::Left, color: 0x4ECDC4 },
    Lane { y: 200.0, base_speed: 2.5, heading: Heading::Right, color: 0x45B7D1 },
    Lane { y: 160.0, base_speed: 3.5, heading: Heading::Left, color: 0xFFA07A },
    Lane { y: 120.0, base_speed: 2.0, heading: Heading::Right, color: 0x98D8C8 },
    Lane { y: 80.0, base_speed: 4.0, heading: Heading::Left, color: 0xF7DC6F },
];

/// The player sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Distance covered by one move
    pub step: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::start(),
            size: Vec2::splat(PLAYER_SIZE),
            step: PLAYER_STEP,
        }
    }
}

impl Player {
    /// Where the player (re)appears
    pub fn start() -> Vec2 {
        Vec2::new(PLAYER_START_X, PLAYER_START_Y)
    }

    pub fn reset(&mut self) {
        self.pos = Self::start();
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Move one step, clamped to the playfield
    pub fn step_toward(&mut self, dir: Direction) {
        let max = Vec2::new(FIELD_WIDTH - self.size.x, FIELD_HEIGHT - self.size.y);
        self.pos = (self.pos + dir.unit() * self.step).clamp(Vec2::ZERO, max);
    }
}

/// A moving obstacle. Recycled off-screen instead of being destroyed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub speed: f32,
    pub heading: Heading,
    pub color: u32,
    /// Index into [`GameState::lanes`]
    pub lane: usize,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player was hit by an obstacle of `lane`
    LifeLost { lane: usize, lives_left: u32 },
    /// Player reached the goal line
    Crossed { score: u32 },
    /// Last life lost
    GameOver { final_score: u32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    /// Simulation tick counter since the last (re)start
    pub time_ticks: u64,
    /// Successful crossings since the last (re)start
    pub crossings: u32,
    /// Score snapshot taken at game over
    pub final_score: Option<u32>,
    pub player: Player,
    pub lanes: Vec<Lane>,
    pub obstacles: Vec<Obstacle>,
}

impl GameState {
    /// Create a new running game with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let lanes = LANES.to_vec();
        let obstacles = spawn_obstacles(&lanes, &mut rng);

        Self {
            seed,
            rng,
            score: 0,
            lives: STARTING_LIVES,
            phase: GamePhase::Running,
            time_ticks: 0,
            crossings: 0,
            final_score: None,
            player: Player::default(),
            lanes,
            obstacles,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Obstacles together with the RNG that recycles them
    pub(crate) fn traffic_mut(&mut self) -> (&mut [Obstacle], &mut Pcg32) {
        (self.obstacles.as_mut_slice(), &mut self.rng)
    }

    /// Apply one step of player input. Ignored unless running.
    pub fn move_player(&mut self, dir: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        self.player.step_toward(dir);
        true
    }

    /// Full reset: score, lives, player and freshly spawned traffic.
    ///
    /// The RNG stream continues, so each restart gets a new layout.
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
        self.crossings = 0;
        self.final_score = None;
        self.player.reset();
        self.obstacles = spawn_obstacles(&self.lanes, &mut self.rng);
    }

    /// Stop the run and snapshot the score
    pub(crate) fn end_run(&mut self) -> GameEvent {
        self.phase = GamePhase::GameOver;
        self.final_score = Some(self.score);
        GameEvent::GameOver {
            final_score: self.score,
        }
    }
}
