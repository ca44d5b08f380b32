//! Fixed timestep simulation tick
//!
//! One tick: autopilot move (if enabled), traffic, collisions, goal.

use super::autopilot::{self, AUTOPILOT_INTERVAL_TICKS};
use super::collision::{check_collisions, check_goal};
use super::state::{GameEvent, GameState};
use super::traffic::advance_obstacles;

/// Per-tick input that isn't a discrete player move
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Idle/demo mode - the autopilot plays the game
    pub autopilot: bool,
}

/// Advance the game state by one tick. Does nothing once the run is over.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    if input.autopilot && state.time_ticks % AUTOPILOT_INTERVAL_TICKS == 0 {
        if let Some(dir) = autopilot::choose_move(state) {
            state.move_player(dir);
        }
    }

    state.time_ticks += 1;

    let (obstacles, rng) = state.traffic_mut();
    advance_obstacles(obstacles, rng);

    // Collisions resolve before the goal so a hit on the final step
    // still costs a life
    check_collisions(state, &mut events);
    check_goal(state, &mut events);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Direction, GamePhase, Heading, Obstacle, Player};
    use glam::Vec2;

    #[test]
    fn test_tick_advances_traffic() {
        let mut state = GameState::new(12345);
        let before: Vec<f32> = state.obstacles.iter().map(|o| o.pos.x).collect();

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 1);
        for (o, x) in state.obstacles.iter().zip(before) {
            assert_eq!(o.pos.x, x + o.speed * o.heading.sign());
        }
    }

    #[test]
    fn test_tick_is_noop_after_game_over() {
        let mut state = GameState::new(12345);
        state.end_run();
        let before = state.obstacles.clone();

        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.obstacles, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let input = TickInput::default();

        for i in 0..2000 {
            if i % 50 == 0 {
                state1.move_player(Direction::Left);
                state2.move_player(Direction::Left);
            }
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.score, state2.score);
    }

    #[test]
    fn test_crossing_through_an_empty_road() {
        let mut state = GameState::new(4);
        state.obstacles.clear();

        // 360 -> 40 takes eight steps; the eighth lands on the goal line
        for _ in 0..8 {
            state.move_player(Direction::Up);
        }
        let events = tick(&mut state, &TickInput::default());

        assert_eq!(events, vec![GameEvent::Crossed { score: 100 }]);
        assert_eq!(state.player.pos, Player::start());
    }

    #[test]
    fn test_hit_on_goal_row_resolves_before_goal() {
        let mut state = GameState::new(4);
        state.lives = 2;
        // Stationary obstacle on the goal row that the reset will not touch
        state.obstacles = vec![Obstacle {
            pos: Vec2::new(280.0, 30.0),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: 0.0,
            heading: Heading::Right,
            color: 0,
            lane: 5,
        }];
        state.player.pos = Vec2::new(280.0, 40.0);

        let events = tick(&mut state, &TickInput::default());
        // The hit resets the player first, so the goal check sees the start cell
        assert_eq!(events, vec![GameEvent::LifeLost { lane: 5, lives_left: 1 }]);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_life_depletion_stops_the_run() {
        let mut state = GameState::new(8);
        state.obstacles = vec![Obstacle {
            pos: Player::start(),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: 0.0,
            heading: Heading::Right,
            color: 0,
            lane: 0,
        }];

        let input = TickInput::default();
        let mut hits = 0;
        for _ in 0..10 {
            hits += tick(&mut state, &input)
                .iter()
                .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
                .count();
        }

        assert_eq!(hits, 3);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.move_player(Direction::Up));
    }

    #[test]
    fn test_restart_rebuilds_everything() {
        let mut state = GameState::new(21);
        state.score = 700;
        state.lives = 0;
        state.end_run();
        state.player.pos = Vec2::new(0.0, 0.0);
        for o in state.obstacles.iter_mut() {
            o.speed += 5.0;
        }

        state.restart();

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.is_running());
        assert_eq!(state.final_score, None);
        assert_eq!(state.player.pos, Player::start());
        for lane_idx in 0..state.lanes.len() {
            let in_lane: Vec<_> = state.obstacles.iter().filter(|o| o.lane == lane_idx).collect();
            assert!((2..=4).contains(&in_lane.len()));
            for o in in_lane {
                assert_eq!(o.speed, state.lanes[lane_idx].base_speed);
            }
        }
    }
}
