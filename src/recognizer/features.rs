//! Geometric predicates over a single hand skeleton.
//!
//! All comparisons are in image space: smaller `y` is higher on screen,
//! negative `z` is closer to the camera.

use super::landmarks::*;

/// Max x-gap between neighbouring fingertips for "together".
pub const TOGETHER_MAX_GAP: f32 = 0.05;
/// Min x-gap between neighbouring fingertips for "spread".
pub const SPREAD_MIN_GAP: f32 = 0.05;
/// Max thumb-index tip distance for the circle sign.
pub const CIRCLE_MAX_DISTANCE: f32 = 0.1;
/// Depth below which a joint counts as pushed towards the camera.
pub const FORWARD_DEPTH: f32 = -0.1;

/// Neighbouring fingertip pairs, index to pinky.
const FINGERTIP_PAIRS: [(usize, usize); 3] = [
    (INDEX_TIP, MIDDLE_TIP),
    (MIDDLE_TIP, RING_TIP),
    (RING_TIP, PINKY_TIP),
];

/// Tip above the reference joint.
pub fn finger_extended(set: &LandmarkSet, tip: usize, joint: usize) -> bool {
    set[tip].y < set[joint].y
}

/// Tip below the reference joint.
pub fn finger_curled(set: &LandmarkSet, tip: usize, joint: usize) -> bool {
    set[tip].y > set[joint].y
}

/// Thumb joints rising monotonically from MCP to tip.
pub fn thumb_up(set: &LandmarkSet) -> bool {
    set[THUMB_TIP].y < set[THUMB_IP].y && set[THUMB_IP].y < set[THUMB_MCP].y
}

/// Segment from `reference` to `tip` runs more along x than along y.
pub fn is_horizontal(set: &LandmarkSet, tip: usize, reference: usize) -> bool {
    let dx = (set[tip].x - set[reference].x).abs();
    let dy = (set[tip].y - set[reference].y).abs();
    dx > dy
}

pub fn distance_3d(a: &Landmark, b: &Landmark) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

pub fn x_gap(set: &LandmarkSet, a: usize, b: usize) -> f32 {
    (set[a].x - set[b].x).abs()
}

pub fn spread(set: &LandmarkSet, a: usize, b: usize, min_gap: f32) -> bool {
    x_gap(set, a, b) > min_gap
}

pub fn close(set: &LandmarkSet, a: usize, b: usize, max_gap: f32) -> bool {
    x_gap(set, a, b) < max_gap
}

/// Every predicate the gesture rules read, computed once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFeatures {
    /// Tips above their PIP joints.
    pub index_up: bool,
    pub middle_up: bool,
    pub ring_up: bool,
    pub pinky_up: bool,
    /// Tips below their PIP joints.
    pub middle_down: bool,
    pub ring_down: bool,
    pub pinky_down: bool,
    /// Tips below their DIP joints.
    pub index_folded: bool,
    pub middle_folded: bool,
    pub ring_folded: bool,
    pub pinky_folded: bool,
    pub thumb_up: bool,
    /// Thumb tip left of the thumb IP joint.
    pub thumb_out: bool,
    pub thumb_forward: bool,
    pub index_horizontal: bool,
    /// Index tip above the index MCP joint.
    pub index_above_knuckle: bool,
    pub thumb_index_distance: f32,
    pub fingertips_together: bool,
    pub fingertips_spread: bool,
    pub palm_forward: bool,
}

impl HandFeatures {
    pub fn extract(set: &LandmarkSet) -> Self {
        Self {
            index_up: finger_extended(set, INDEX_TIP, INDEX_PIP),
            middle_up: finger_extended(set, MIDDLE_TIP, MIDDLE_PIP),
            ring_up: finger_extended(set, RING_TIP, RING_PIP),
            pinky_up: finger_extended(set, PINKY_TIP, PINKY_PIP),
            middle_down: finger_curled(set, MIDDLE_TIP, MIDDLE_PIP),
            ring_down: finger_curled(set, RING_TIP, RING_PIP),
            pinky_down: finger_curled(set, PINKY_TIP, PINKY_PIP),
            index_folded: finger_curled(set, INDEX_TIP, INDEX_DIP),
            middle_folded: finger_curled(set, MIDDLE_TIP, MIDDLE_DIP),
            ring_folded: finger_curled(set, RING_TIP, RING_DIP),
            pinky_folded: finger_curled(set, PINKY_TIP, PINKY_DIP),
            thumb_up: thumb_up(set),
            thumb_out: set[THUMB_TIP].x < set[THUMB_IP].x,
            thumb_forward: set[THUMB_TIP].z < FORWARD_DEPTH,
            index_horizontal: is_horizontal(set, INDEX_TIP, INDEX_PIP),
            index_above_knuckle: finger_extended(set, INDEX_TIP, INDEX_MCP),
            thumb_index_distance: distance_3d(&set[THUMB_TIP], &set[INDEX_TIP]),
            fingertips_together: FINGERTIP_PAIRS
                .iter()
                .all(|&(a, b)| close(set, a, b, TOGETHER_MAX_GAP)),
            fingertips_spread: FINGERTIP_PAIRS
                .iter()
                .all(|&(a, b)| spread(set, a, b, SPREAD_MIN_GAP)),
            palm_forward: set[WRIST].z < FORWARD_DEPTH,
        }
    }

    /// Middle, ring and pinky below their PIP joints.
    pub fn lower_three_down(&self) -> bool {
        self.middle_down && self.ring_down && self.pinky_down
    }

    /// Middle, ring and pinky above their PIP joints.
    pub fn lower_three_up(&self) -> bool {
        self.middle_up && self.ring_up && self.pinky_up
    }

    pub fn four_fingers_up(&self) -> bool {
        self.index_up && self.lower_three_up()
    }

    pub fn four_fingers_folded(&self) -> bool {
        self.index_folded && self.middle_folded && self.ring_folded && self.pinky_folded
    }
}
