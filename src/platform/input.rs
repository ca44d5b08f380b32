//! Raw host input to game commands
//!
//! Keyboard keys and touch swipes both collapse into discrete [`Command`]s.
//! Nothing here touches the DOM, so the same mapping is used natively.

use glam::Vec2;

use crate::sim::Direction;

/// A zero-argument trigger from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Restart,
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value to a command.
///
/// Matching is case-insensitive. WASD can be switched off for players who
/// use those keys for something else.
pub fn command_for_key(key: &str, wasd: bool) -> Option<Command> {
    let key = key.to_lowercase();
    let dir = match key.as_str() {
        "arrowup" => Some(Direction::Up),
        "arrowdown" => Some(Direction::Down),
        "arrowleft" => Some(Direction::Left),
        "arrowright" => Some(Direction::Right),
        "w" if wasd => Some(Direction::Up),
        "s" if wasd => Some(Direction::Down),
        "a" if wasd => Some(Direction::Left),
        "d" if wasd => Some(Direction::Right),
        _ => None,
    };
    if let Some(dir) = dir {
        return Some(Command::Move(dir));
    }

    match key.as_str() {
        "enter" => Some(Command::Restart),
        "i" => Some(Command::ToggleAutopilot),
        _ => None,
    }
}

/// Classify a finished swipe.
///
/// The axis with the larger travel wins (ties go to vertical), and the travel
/// along it must exceed `threshold` for the swipe to count as one move.
pub fn swipe_direction(delta: Vec2, threshold: f32) -> Option<Direction> {
    if delta.x.abs() > delta.y.abs() {
        if delta.x > threshold {
            Some(Direction::Right)
        } else if delta.x < -threshold {
            Some(Direction::Left)
        } else {
            None
        }
    } else if delta.y > threshold {
        Some(Direction::Down)
    } else if delta.y < -threshold {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Remembers where a touch started so its end can be turned into a swipe
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, pos: Vec2) {
        self.start = Some(pos);
    }

    /// Finish the current touch. A touch end without a start is ignored.
    pub fn end(&mut self, pos: Vec2, threshold: f32) -> Option<Direction> {
        let start = self.start.take()?;
        swipe_direction(pos - start, threshold)
    }
}
