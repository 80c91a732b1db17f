use std::collections::VecDeque;

use super::landmarks::Landmark;

/// One sampled frame from the hand tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    pub timestamp_ms: u64,
    /// `None` when no hand was detected.
    pub hand: Option<Vec<Landmark>>,
}

impl LandmarkFrame {
    pub fn with_hand(timestamp_ms: u64, hand: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms,
            hand: Some(hand),
        }
    }

    pub fn empty(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            hand: None,
        }
    }
}

/// Pull-style frame producer. `None` means the source is exhausted.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<LandmarkFrame>;
}

/// Replays a fixed list of frames.
pub struct ScriptedFrameSource {
    frames: VecDeque<LandmarkFrame>,
}

impl ScriptedFrameSource {
    pub fn new(frames: Vec<LandmarkFrame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ScriptedFrameSource {
    fn next_frame(&mut self) -> Option<LandmarkFrame> {
        self.frames.pop_front()
    }
}
