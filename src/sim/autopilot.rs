//! Demo-mode player
//!
//! Looks a short way into the future of every obstacle and hops forward
//! whenever the next row stays clear. Stateless, so it keeps the simulation
//! deterministic.

use glam::Vec2;

use super::collision::Rect;
use super::state::{Direction, GameState};

/// The autopilot gets one move every this many ticks
pub const AUTOPILOT_INTERVAL_TICKS: u64 = 8;
/// How many ticks of obstacle motion a candidate cell must survive
pub const LOOKAHEAD_TICKS: u32 = 24;

/// Fallbacks when staying put is unsafe, in order of preference
const ESCAPES: [Direction; 3] = [Direction::Left, Direction::Right, Direction::Down];

/// Pick the next move, or `None` to wait in place
pub fn choose_move(state: &GameState) -> Option<Direction> {
    let here = state.player.rect();

    let up = cell_after(state, Direction::Up);
    if up.min != here.min && is_safe(state, &up) {
        return Some(Direction::Up);
    }

    if is_safe(state, &here) {
        return None;
    }

    ESCAPES.into_iter().find(|&dir| {
        let cell = cell_after(state, dir);
        cell.min != here.min && is_safe(state, &cell)
    })
}

fn cell_after(state: &GameState, dir: Direction) -> Rect {
    let mut player = state.player;
    player.step_toward(dir);
    player.rect()
}

/// True if no obstacle touches `cell` during the lookahead window
fn is_safe(state: &GameState, cell: &Rect) -> bool {
    state.obstacles.iter().all(|obstacle| {
        let velocity = obstacle.speed * obstacle.heading.sign();
        (0..=LOOKAHEAD_TICKS).all(|k| {
            let shifted = obstacle.rect().translated(Vec2::new(velocity * k as f32, 0.0));
            !cell.overlaps(&shifted)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Heading, Obstacle, Player};
    use crate::sim::tick::{TickInput, tick};

    fn parked(x: f32, y: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: 0.0,
            heading: Heading::Left,
            color: 0,
            lane: 0,
        }
    }

    #[test]
    fn test_empty_road_goes_up() {
        let mut state = GameState::new(1);
        state.obstacles.clear();
        assert_eq!(choose_move(&state), Some(Direction::Up));
    }

    #[test]
    fn test_waits_when_row_above_is_blocked() {
        let mut state = GameState::new(1);
        // Row above the start cell (y 320..360) is occupied
        state.obstacles = vec![parked(270.0, 325.0)];
        assert_eq!(choose_move(&state), None);
    }

    #[test]
    fn test_dodges_incoming_traffic() {
        let mut state = GameState::new(1);
        let start = Player::start();
        state.obstacles = vec![
            parked(270.0, 325.0),
            // Heading left; reaches the start cell but stops short of the
            // cell to its left within the lookahead window
            Obstacle {
                pos: Vec2::new(start.x + 150.0, start.y + 5.0),
                speed: 6.0,
                ..parked(0.0, 0.0)
            },
        ];
        assert_eq!(choose_move(&state), Some(Direction::Left));
    }

    #[test]
    fn test_autopilot_scores_on_empty_road() {
        let mut state = GameState::new(2);
        state.obstacles.clear();
        let input = TickInput { autopilot: true };

        for _ in 0..(AUTOPILOT_INTERVAL_TICKS * 10) {
            tick(&mut state, &input);
        }
        assert!(state.score >= 100);
    }
}
