use log::{debug, info};

use crate::recognizer::classifier::GestureClassifier;
use crate::recognizer::label::GestureLabel;
use crate::recognizer::source::{FrameSource, LandmarkFrame};
use crate::recognizer::state_machine::{ConfirmationConfig, StateMachine};
use crate::recognizer::transcript::TranscriptSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    /// This frame's raw classification.
    pub classification: Option<GestureLabel>,
    /// Set when this frame completed a streak.
    pub confirmed: Option<GestureLabel>,
}

/// Extract → classify → confirm, one frame at a time.
pub struct GesturePipeline {
    classifier: GestureClassifier,
    state_machine: StateMachine,
}

impl GesturePipeline {
    pub fn new() -> Self {
        Self::with_config(ConfirmationConfig::default())
    }

    pub fn with_config(config: ConfirmationConfig) -> Self {
        Self {
            classifier: GestureClassifier::new(),
            state_machine: StateMachine::with_config(config),
        }
    }

    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> FrameOutcome {
        let classification = frame
            .hand
            .as_deref()
            .and_then(|points| self.classifier.classify_points(points));

        let confirmed = self.handle_detected_gesture(classification, frame.timestamp_ms);
        FrameOutcome {
            classification,
            confirmed,
        }
    }

    /// Shared entry point for tracker frames and manual triggers.
    pub fn handle_detected_gesture(
        &mut self,
        detected: Option<GestureLabel>,
        timestamp_ms: u64,
    ) -> Option<GestureLabel> {
        let confirmed = self.state_machine.process(detected, timestamp_ms);
        if let Some(label) = confirmed {
            info!("✋ Gesture confirmed: {} ({})", label.tag(), label.display());
        }
        confirmed
    }

    /// Drain `source`, forwarding confirmations to `sink`. Returns the number
    /// of confirmed gestures.
    pub fn run(&mut self, source: &mut dyn FrameSource, sink: &mut dyn TranscriptSink) -> usize {
        let mut confirmed = 0;
        while let Some(frame) = source.next_frame() {
            if let Some(label) = self.process_frame(&frame).confirmed {
                sink.on_gesture_confirmed(label);
                confirmed += 1;
            }
        }
        debug!(
            "Source exhausted after {} frames, {} confirmed",
            self.state_machine.frame_count(),
            confirmed
        );
        confirmed
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn state_machine(&self) -> &StateMachine {
        &self.state_machine
    }

    pub fn frame_count(&self) -> u64 {
        self.state_machine.frame_count()
    }

    pub fn reset(&mut self) {
        self.state_machine.reset();
    }
}

impl Default for GesturePipeline {
    fn default() -> Self {
        Self::new()
    }
}
