use serde::{Deserialize, Serialize};

use crate::core::error::GestureError;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Points per hand skeleton.
pub const LANDMARK_COUNT: usize = 21;

/// One tracked point in normalized image coordinates.
///
/// `x`/`y` are roughly in `[0, 1]` with `y` growing downwards; `z` is relative
/// depth, negative values are closer to the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A validated 21-point hand skeleton for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn from_points(points: &[Landmark]) -> Result<Self, GestureError> {
        if points.len() != LANDMARK_COUNT {
            return Err(GestureError::MalformedLandmarks {
                found: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GestureError::NonFiniteLandmark { index });
        }

        let mut set = [Landmark::default(); LANDMARK_COUNT];
        set.copy_from_slice(points);
        Ok(Self { points: set })
    }

    /// Build from a flat `[x0, y0, z0, x1, ...]` buffer.
    pub fn from_flat(flat: &[f32]) -> Result<Self, GestureError> {
        if flat.len() % 3 != 0 {
            return Err(GestureError::MalformedLandmarks {
                found: flat.len() / 3,
            });
        }
        let points: Vec<Landmark> = flat
            .chunks_exact(3)
            .map(|c| Landmark::new(c[0], c[1], c[2]))
            .collect();
        Self::from_points(&points)
    }

    pub fn get(&self, joint: usize) -> Landmark {
        self.points[joint]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

impl std::ops::Index<usize> for LandmarkSet {
    type Output = Landmark;

    fn index(&self, joint: usize) -> &Landmark {
        &self.points[joint]
    }
}
