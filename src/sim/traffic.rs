//! Obstacle spawning and per-tick motion
//!
//! Obstacles are never freed: once one leaves the far edge it is moved back
//! behind the near edge with a little random jitter.

use glam::Vec2;
use rand::Rng;

use super::state::{Heading, Lane, Obstacle};
use crate::consts::*;

/// Populate every lane with 2-4 obstacles, staggered off-screen
pub fn spawn_obstacles<R: Rng>(lanes: &[Lane], rng: &mut R) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity(lanes.len() * MAX_OBSTACLES_PER_LANE);

    for (lane_idx, lane) in lanes.iter().enumerate() {
        let count = rng.random_range(MIN_OBSTACLES_PER_LANE..=MAX_OBSTACLES_PER_LANE);
        for j in 0..count {
            let offset = j as f32 * SPAWN_SPACING;
            let x = match lane.heading {
                Heading::Right => -OFFSCREEN_MARGIN - offset,
                Heading::Left => FIELD_WIDTH + offset,
            };
            obstacles.push(Obstacle {
                pos: Vec2::new(x, lane.y),
                size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
                speed: lane.base_speed,
                heading: lane.heading,
                color: lane.color,
                lane: lane_idx,
            });
        }
    }

    obstacles
}

/// Advance every obstacle by one tick, recycling the ones that left the field
pub fn advance_obstacles<R: Rng>(obstacles: &mut [Obstacle], rng: &mut R) {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.x += obstacle.speed * obstacle.heading.sign();

        match obstacle.heading {
            Heading::Right if obstacle.pos.x > FIELD_WIDTH + OFFSCREEN_MARGIN => {
                obstacle.pos.x = -OFFSCREEN_MARGIN - rng.random_range(0.0..RECYCLE_JITTER);
            }
            Heading::Left if obstacle.pos.x < LEFT_RECYCLE_X => {
                obstacle.pos.x = FIELD_WIDTH + rng.random_range(0.0..RECYCLE_JITTER);
            }
            _ => {}
        }
    }
}

/// Make every obstacle permanently faster
pub fn speed_up(obstacles: &mut [Obstacle], amount: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.speed += amount;
    }
}
