//! Scene building: field geometry to triangles
//!
//! Everything is drawn as axis-aligned rectangles in field pixels; the
//! pipeline maps them to clip space.

use super::vertex::{Vertex, colors, rgba};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, GOAL_LINE};
use crate::game::Frame;
use crate::sim::{Obstacle, Player};

/// Bottom edge of the road (start of the safe verge)
const ROAD_BOTTOM: f32 = 320.0;
/// Distance between consecutive lane markings
const LANE_PITCH: f32 = 40.0;
const LANE_LINE_Y0: f32 = 85.0;
const DASH_Y0: f32 = 100.0;
const DASH_LENGTH: f32 = 20.0;
const MARKING_THICKNESS: f32 = 2.0;

/// Push two triangles covering the rectangle
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    let (x2, y2) = (x + w, y + h);
    out.extend_from_slice(&[
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]);
}

/// Grass verges, asphalt and lane markings
pub fn scenery(out: &mut Vec<Vertex>, lane_count: usize) {
    let grass = rgba(colors::GRASS);
    rect(out, 0.0, 0.0, FIELD_WIDTH, GOAL_LINE, grass);
    rect(out, 0.0, ROAD_BOTTOM, FIELD_WIDTH, FIELD_HEIGHT - ROAD_BOTTOM, grass);
    rect(out, 0.0, GOAL_LINE, FIELD_WIDTH, ROAD_BOTTOM - GOAL_LINE, rgba(colors::ROAD));

    let line = rgba(colors::LANE_LINE);
    for i in 0..lane_count {
        let y = LANE_LINE_Y0 + i as f32 * LANE_PITCH;
        rect(out, 0.0, y, FIELD_WIDTH, MARKING_THICKNESS, line);
    }

    let dash = rgba(colors::CENTER_DASH);
    for i in 0..lane_count {
        let y = DASH_Y0 + i as f32 * LANE_PITCH;
        let mut x = 0.0;
        while x < FIELD_WIDTH {
            rect(out, x, y, DASH_LENGTH, MARKING_THICKNESS, dash);
            x += LANE_PITCH;
        }
    }
}

/// Car body in the lane color, windshield and two wheels
pub fn obstacle(out: &mut Vec<Vertex>, o: &Obstacle) {
    let (x, y) = (o.pos.x, o.pos.y);
    let (w, h) = (o.size.x, o.size.y);
    rect(out, x, y, w, h, rgba(o.color));
    rect(out, x + 10.0, y + 5.0, w - 20.0, h - 15.0, rgba(colors::WINDSHIELD));
    let wheel = rgba(colors::WHEEL);
    rect(out, x + 5.0, y + 25.0, 10.0, 8.0, wheel);
    rect(out, x + w - 15.0, y + 25.0, 10.0, 8.0, wheel);
}

/// Body, two eyes and a mouth
pub fn player(out: &mut Vec<Vertex>, p: &Player) {
    let (x, y) = (p.pos.x, p.pos.y);
    rect(out, x, y, p.size.x, p.size.y, rgba(colors::PLAYER));
    let eye = rgba(colors::PLAYER_EYE);
    rect(out, x + 8.0, y + 5.0, 8.0, 8.0, eye);
    rect(out, x + 24.0, y + 5.0, 8.0, 8.0, eye);
    rect(out, x + 15.0, y + 25.0, 10.0, 3.0, rgba(colors::PLAYER_MOUTH));
}

/// Build the whole frame back to front into `out` (cleared first)
pub fn build_scene(frame: &Frame<'_>, out: &mut Vec<Vertex>) {
    out.clear();
    scenery(out, frame.lanes.len());
    for o in frame.obstacles {
        obstacle(out, o);
    }
    player(out, frame.player);
}
