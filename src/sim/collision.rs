//! Collision and goal detection
//!
//! Everything is an axis-aligned rectangle, so a hit is a plain AABB overlap.
//! Obstacle counts are tiny (a few dozen), so every obstacle is tested every
//! tick without any spatial partitioning.

use glam::Vec2;

use super::state::{GameEvent, GameState};
use super::traffic::speed_up;
use crate::consts::*;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// True if the rectangles share positive area. Touching edges don't count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect::new(self.min + delta, self.size)
    }
}

/// Test the player against every obstacle.
///
/// Each overlap costs a life, even when several obstacles hit in the same
/// tick. A hit that leaves lives resets the player before the remaining
/// obstacles are tested; the last life ends the run.
pub fn check_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for idx in 0..state.obstacles.len() {
        let obstacle = state.obstacles[idx];
        if !state.player.rect().overlaps(&obstacle.rect()) {
            continue;
        }

        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost {
            lane: obstacle.lane,
            lives_left: state.lives,
        });
        log::debug!("Hit by lane {} obstacle, {} lives left", obstacle.lane, state.lives);

        if state.lives == 0 {
            if state.is_running() {
                events.push(state.end_run());
            }
        } else {
            state.player.reset();
        }
    }
}

/// Award a crossing if the player reached the goal line
pub fn check_goal(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.player.pos.y > GOAL_LINE {
        return;
    }

    state.score += CROSSING_POINTS;
    state.crossings += 1;
    state.player.reset();
    speed_up(&mut state.obstacles, SPEED_BUMP);

    events.push(GameEvent::Crossed { score: state.score });
    log::debug!("Crossing #{} - score {}", state.crossings, state.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Heading, Obstacle, Player};
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    /// Obstacle parked on top of the player's start cell
    fn blocker_at(pos: Vec2) -> Obstacle {
        Obstacle {
            pos,
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed: 0.0,
            heading: Heading::Right,
            color: 0xFF0000,
            lane: 0,
        }
    }

    #[test]
    fn test_overlap_basic() {
        let a = rect(0.0, 0.0, 40.0, 40.0);
        assert!(a.overlaps(&rect(20.0, 20.0, 60.0, 30.0)));
        assert!(!a.overlaps(&rect(100.0, 0.0, 60.0, 30.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(100.0, 100.0, 40.0, 40.0);
        assert!(!a.overlaps(&rect(140.0, 100.0, 60.0, 30.0)));
        assert!(!a.overlaps(&rect(40.0, 100.0, 60.0, 30.0)));
        assert!(!a.overlaps(&rect(100.0, 140.0, 60.0, 30.0)));
        assert!(!a.overlaps(&rect(100.0, 70.0, 60.0, 30.0)));
    }

    #[test]
    fn test_player_in_goal_band_never_hits_top_lane() {
        // Top lane spans y 80..110; a player at y 40 ends exactly at 80
        let player = rect(280.0, 40.0, 40.0, 40.0);
        assert!(!player.overlaps(&rect(270.0, 80.0, 60.0, 30.0)));
    }

    proptest! {
        #[test]
        fn prop_overlap_matches_intersection_area(
            ax in -200.0f32..800.0, ay in -200.0f32..600.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -200.0f32..800.0, by in -200.0f32..600.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            let ix = (a.max().x.min(b.max().x) - ax.max(bx)).max(0.0);
            let iy = (a.max().y.min(b.max().y) - ay.max(by)).max(0.0);
            prop_assert_eq!(a.overlaps(&b), ix > 0.0 && iy > 0.0);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }

    #[test]
    fn test_collision_costs_life_and_resets() {
        let mut state = GameState::new(1);
        state.obstacles = vec![blocker_at(Vec2::new(200.0, 160.0))];
        state.player.pos = Vec2::new(220.0, 160.0);

        let mut events = Vec::new();
        check_collisions(&mut state, &mut events);

        assert_eq!(state.lives, 2);
        assert_eq!(state.player.pos, Player::start());
        assert_eq!(events, vec![GameEvent::LifeLost { lane: 0, lives_left: 2 }]);
    }

    #[test]
    fn test_three_hits_end_the_run() {
        let mut state = GameState::new(1);
        state.obstacles = vec![blocker_at(Player::start())];

        let mut events = Vec::new();
        for expected in [2, 1] {
            check_collisions(&mut state, &mut events);
            assert_eq!(state.lives, expected);
            assert_eq!(state.phase, GamePhase::Running);
        }
        check_collisions(&mut state, &mut events);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.final_score, Some(0));
        assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 0 }));
    }

    #[test]
    fn test_double_overlap_costs_two_lives() {
        let mut state = GameState::new(1);
        let start = Player::start();
        // Both sit on the start cell, so the reset after the first hit
        // leaves the player inside the second one too
        state.obstacles = vec![blocker_at(start), blocker_at(start - Vec2::new(30.0, 0.0))];

        let mut events = Vec::new();
        check_collisions(&mut state, &mut events);
        assert_eq!(state.lives, 1);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_lives_saturate_at_zero() {
        let mut state = GameState::new(1);
        state.lives = 1;
        let start = Player::start();
        state.obstacles = vec![blocker_at(start), blocker_at(start)];

        let mut events = Vec::new();
        check_collisions(&mut state, &mut events);
        assert_eq!(state.lives, 0);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_goal_scores_and_speeds_up() {
        let mut state = GameState::new(9);
        let before: Vec<f32> = state.obstacles.iter().map(|o| o.speed).collect();
        state.player.pos.y = GOAL_LINE;

        let mut events = Vec::new();
        check_goal(&mut state, &mut events);

        assert_eq!(state.score, 100);
        assert_eq!(state.crossings, 1);
        assert_eq!(state.player.pos, Player::start());
        for (obstacle, old) in state.obstacles.iter().zip(before) {
            assert!((obstacle.speed - (old + 0.1)).abs() < 1e-6);
        }
        assert_eq!(events, vec![GameEvent::Crossed { score: 100 }]);
    }

    #[test]
    fn test_goal_not_reached_below_line() {
        let mut state = GameState::new(9);
        state.player.pos.y = GOAL_LINE + 40.0;
        let mut events = Vec::new();
        check_goal(&mut state, &mut events);
        assert_eq!(state.score, 0);
        assert!(events.is_empty());
    }
}
