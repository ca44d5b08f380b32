//! Frame-driven loop driver
//!
//! The host calls [`Game::frame`] once per display refresh and only schedules
//! another frame while it returns [`LoopControl::Continue`]. Simulation runs
//! in fixed ticks from an accumulator; drawing and the HUD go through the
//! [`Renderer`] and [`DisplaySink`] traits so the core never sees the DOM.

use crate::consts::*;
use crate::platform::Command;
use crate::sim::{GameEvent, GameState, Lane, Obstacle, Player, TickInput, tick};

/// Borrowed view of everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub lanes: &'a [Lane],
    pub obstacles: &'a [Obstacle],
    pub player: &'a Player,
}

impl<'a> Frame<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            lanes: &state.lanes,
            obstacles: &state.obstacles,
            player: &state.player,
        }
    }
}

/// Values published to the on-screen display after every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub game_over: bool,
    /// Score snapshot, only set once the run has ended
    pub final_score: Option<u32>,
    pub fps: u32,
    pub autopilot: bool,
}

/// Draws a frame. Owns no game state.
pub trait Renderer {
    fn draw_frame(&mut self, frame: &Frame<'_>);
}

/// Receives score/lives/game-over for display
pub trait DisplaySink {
    fn publish(&mut self, hud: &Hud);
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Halt,
}

/// Owns the game state and drives it frame by frame
pub struct Game {
    pub state: GameState,
    input: TickInput,
    accumulator: f32,
    /// Host timestamp of the previous frame (ms), 0 before the first one
    last_time: f64,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
    /// True while a frame chain is scheduled on the host
    looping: bool,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: 0.0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
            looping: true,
        }
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.input.autopilot != enabled {
            self.input.autopilot = enabled;
            log::info!("Autopilot: {}", enabled);
        }
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Apply a command between frames.
    ///
    /// Returns true when the host has to start a new frame chain (a restart
    /// after the previous chain halted).
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Move(dir) => {
                self.state.move_player(dir);
                false
            }
            Command::Restart => self.restart(),
            Command::ToggleAutopilot => {
                self.set_autopilot(!self.input.autopilot);
                false
            }
        }
    }

    /// Reset the run. Returns true if the frame chain needs restarting.
    pub fn restart(&mut self) -> bool {
        self.state.restart();
        self.accumulator = 0.0;
        self.last_time = 0.0;
        log::info!("Game restarted");

        let resume = !self.looping;
        self.looping = true;
        resume
    }

    /// Run one host frame: simulate, draw, publish
    pub fn frame(
        &mut self,
        time: f64,
        renderer: &mut dyn Renderer,
        display: &mut dyn DisplaySink,
    ) -> LoopControl {
        // Calculate delta time
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time;

        self.update(dt, time);
        renderer.draw_frame(&Frame::of(&self.state));
        display.publish(&self.hud());

        if self.state.is_running() {
            LoopControl::Continue
        } else {
            self.looping = false;
            LoopControl::Halt
        }
    }

    /// Run simulation ticks for `dt` seconds of host time
    fn update(&mut self, dt: f32, time: f64) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && self.state.is_running() {
            for event in tick(&mut self.state, &self.input) {
                if let GameEvent::GameOver { final_score } = event {
                    log::info!("Game over - final score {}", final_score);
                }
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if !self.state.is_running() {
            self.accumulator = 0.0;
        }

        // Track frame times for FPS
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Calculate FPS from oldest to newest frame
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (60000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.state.score,
            lives: self.state.lives,
            game_over: !self.state.is_running(),
            final_score: self.state.final_score,
            fps: self.fps,
            autopilot: self.input.autopilot,
        }
    }
}
