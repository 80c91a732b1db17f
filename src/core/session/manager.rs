//! 识别会话管理器

use std::sync::{Mutex, MutexGuard};

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::models::landmarks::{GestureConfirmedInfo, LandmarkFrameData};
use crate::core::error::GestureError;
use crate::core::session::config::RecognizerConfig;
use crate::recognizer::classifier::GestureClassifier;
use crate::recognizer::label::GestureLabel;
use crate::recognizer::pipeline::{FrameOutcome, GesturePipeline};
use crate::recognizer::transcript::{Transcript, TranscriptSink};

/// 会话统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub processed_frames: u64,
    pub hand_frames: u64,
    pub classified_frames: u64,
    pub manual_triggers: u64,
    pub confirmed_gestures: u64,
}

struct SessionInner {
    pipeline: GesturePipeline,
    transcript: Transcript,
    stats: SessionStats,
}

impl SessionInner {
    fn record(
        &mut self,
        has_hand: bool,
        outcome: FrameOutcome,
        timestamp_ms: u64,
    ) -> Option<GestureConfirmedInfo> {
        self.stats.processed_frames += 1;
        if has_hand {
            self.stats.hand_frames += 1;
        }
        if outcome.classification.is_some() {
            self.stats.classified_frames += 1;
        }
        self.emit(outcome.confirmed?, timestamp_ms)
    }

    fn emit(&mut self, label: GestureLabel, timestamp_ms: u64) -> Option<GestureConfirmedInfo> {
        self.transcript.on_gesture_confirmed(label);
        self.stats.confirmed_gestures += 1;
        Some(GestureConfirmedInfo {
            tag: label.tag().to_string(),
            display: label.display().to_string(),
            timestamp_ms,
            frame_number: self.stats.processed_frames + self.stats.manual_triggers,
            transcript: self.transcript.text(),
        })
    }
}

/// 一个独立的识别会话：确认状态机 + 文本
pub struct RecognizerSession {
    inner: Mutex<SessionInner>,
    config: RecognizerConfig,
}

impl RecognizerSession {
    pub fn new() -> Self {
        Self::with_config(RecognizerConfig::default())
    }

    pub fn with_config(config: RecognizerConfig) -> Self {
        debug!("Session config: {:?}", config);
        Self {
            inner: Mutex::new(SessionInner {
                pipeline: GesturePipeline::with_config(config.confirmation.clone()),
                transcript: Transcript::new(),
                stats: SessionStats::default(),
            }),
            config,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionInner>, GestureError> {
        self.inner
            .lock()
            .map_err(|e| GestureError::LockPoisoned(e.to_string()))
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn process_frame(
        &self,
        frame: &LandmarkFrameData,
    ) -> Result<Option<GestureConfirmedInfo>, GestureError> {
        let mut inner = self.lock()?;
        let outcome = inner.pipeline.process_frame(&frame.to_frame());
        Ok(inner.record(frame.has_hand(), outcome, frame.timestamp_ms))
    }

    /// 手动触发（演示模式），与摄像头帧走同一确认路径
    pub fn trigger_gesture(
        &self,
        tag: &str,
        timestamp_ms: u64,
    ) -> Result<Option<GestureConfirmedInfo>, GestureError> {
        let label = GestureLabel::from_tag(tag)?;
        let mut inner = self.lock()?;
        inner.stats.manual_triggers += 1;
        match inner.pipeline.handle_detected_gesture(Some(label), timestamp_ms) {
            Some(confirmed) => Ok(inner.emit(confirmed, timestamp_ms)),
            None => Ok(None),
        }
    }

    /// 批量处理 - 并行分类，按输入顺序确认
    pub fn process_batch(
        &self,
        frames: Vec<LandmarkFrameData>,
    ) -> Result<Vec<GestureConfirmedInfo>, GestureError> {
        let classifier = GestureClassifier::new();
        let classified: Vec<(u64, bool, Option<GestureLabel>)> = frames
            .par_iter()
            .map(|f| {
                let label = f
                    .first_hand()
                    .and_then(|points| classifier.classify_points(&points));
                (f.timestamp_ms, f.has_hand(), label)
            })
            .collect();

        let mut inner = self.lock()?;
        let mut confirmed = Vec::new();
        for (timestamp_ms, has_hand, classification) in classified {
            let outcome = FrameOutcome {
                classification,
                confirmed: inner
                    .pipeline
                    .handle_detected_gesture(classification, timestamp_ms),
            };
            confirmed.extend(inner.record(has_hand, outcome, timestamp_ms));
        }

        info!(
            "📦 Batch of {} frames, {} gestures confirmed",
            frames.len(),
            confirmed.len()
        );
        Ok(confirmed)
    }

    pub fn transcript_text(&self) -> Result<String, GestureError> {
        Ok(self.lock()?.transcript.text())
    }

    pub fn transcript_labels(&self) -> Result<Vec<GestureLabel>, GestureError> {
        Ok(self.lock()?.transcript.labels().to_vec())
    }

    /// 清空文本，同时丢弃未确认的连续计数
    pub fn clear_transcript(&self) -> Result<(), GestureError> {
        let mut inner = self.lock()?;
        inner.transcript.clear();
        inner.pipeline.reset();
        info!("🧹 Transcript cleared");
        Ok(())
    }

    pub fn stats(&self) -> Result<SessionStats, GestureError> {
        Ok(self.lock()?.stats)
    }

    pub fn reset(&self) -> Result<(), GestureError> {
        let mut inner = self.lock()?;
        inner.pipeline.reset();
        inner.transcript.clear();
        inner.stats = SessionStats::default();
        Ok(())
    }
}

impl Default for RecognizerSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::landmarks::LandmarkPoint;
    use crate::recognizer::classifier::poses;
    use crate::recognizer::landmarks::LandmarkSet;

    fn frame_data(i: u64, pose: Option<LandmarkSet>) -> LandmarkFrameData {
        match pose {
            Some(set) => LandmarkFrameData::single_hand(
                i * 33,
                set.points()
                    .iter()
                    .map(|p| LandmarkPoint { x: p.x, y: p.y, z: p.z })
                    .collect(),
            ),
            None => LandmarkFrameData::no_hand(i * 33),
        }
    }

    fn session_frames(poses: &[Option<LandmarkSet>]) -> Vec<LandmarkFrameData> {
        poses
            .iter()
            .enumerate()
            .map(|(i, p)| frame_data(i as u64, *p))
            .collect()
    }

    #[test]
    fn test_session_creation() {
        let session = RecognizerSession::new();
        let stats = session.stats().unwrap();
        assert_eq!(stats, SessionStats::default());
        assert_eq!(session.transcript_text().unwrap(), "");
    }

    #[test]
    fn test_process_frame_confirms_and_appends() {
        let session = RecognizerSession::new();
        let mut confirmed = Vec::new();
        for f in session_frames(&[Some(poses::hello()); 5]) {
            confirmed.extend(session.process_frame(&f).unwrap());
        }

        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].tag, "hello");
        assert_eq!(confirmed[0].frame_number, 5);
        assert_eq!(confirmed[0].transcript, GestureLabel::Hello.display());

        let stats = session.stats().unwrap();
        assert_eq!(stats.processed_frames, 5);
        assert_eq!(stats.hand_frames, 5);
        assert_eq!(stats.classified_frames, 5);
        assert_eq!(stats.confirmed_gestures, 1);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let mut input = vec![Some(poses::hello()); 4];
        input.push(None);
        input.extend([Some(poses::yes()); 6]);
        input.extend([Some(poses::good()); 5]);
        let frames = session_frames(&input);

        let sequential = RecognizerSession::new();
        let mut expected = Vec::new();
        for f in &frames {
            expected.extend(sequential.process_frame(f).unwrap());
        }

        let batched = RecognizerSession::new();
        let actual = batched.process_batch(frames).unwrap();

        assert_eq!(actual, expected);
        assert_eq!(actual.len(), 2);
        assert_eq!(
            batched.transcript_text().unwrap(),
            format!("{} {}", GestureLabel::Yes.display(), GestureLabel::Good.display())
        );
        assert_eq!(batched.stats().unwrap(), sequential.stats().unwrap());
    }

    #[test]
    fn test_manual_triggers() {
        let session = RecognizerSession::new();
        for i in 0..4 {
            assert_eq!(session.trigger_gesture("stop", i * 100).unwrap(), None);
        }
        let info = session.trigger_gesture("STOP", 400).unwrap().expect("fifth click confirms");
        assert_eq!(info.display, GestureLabel::Stop.display());
        assert_eq!(session.stats().unwrap().manual_triggers, 5);
        assert_eq!(session.stats().unwrap().processed_frames, 0);

        assert!(matches!(
            session.trigger_gesture("wave", 500),
            Err(GestureError::UnknownGesture(_))
        ));
    }

    #[test]
    fn test_frame_number_counts_session_inputs() {
        let session = RecognizerSession::new();
        let mut first = None;
        for i in 0..5 {
            first = session.trigger_gesture("yes", i * 33).unwrap();
        }
        let first = first.expect("fifth trigger confirms");
        let stats = session.stats().unwrap();
        assert_eq!(first.frame_number, 5);
        assert_eq!(first.frame_number, stats.processed_frames + stats.manual_triggers);

        // clearing the transcript does not rewind the numbering
        session.clear_transcript().unwrap();
        for f in session_frames(&[Some(poses::good()); 5]) {
            if let Some(info) = session.process_frame(&f).unwrap() {
                assert_eq!(info.frame_number, 10);
            }
        }
        assert_eq!(session.stats().unwrap().confirmed_gestures, 2);
    }

    #[test]
    fn test_clear_transcript_discards_streak() {
        let session = RecognizerSession::new();
        for i in 0..5 {
            session.trigger_gesture("yes", i * 33).unwrap();
        }
        for i in 5..9 {
            session.trigger_gesture("no", i * 33).unwrap();
        }
        assert_eq!(session.transcript_labels().unwrap(), vec![GestureLabel::Yes]);

        session.clear_transcript().unwrap();
        assert_eq!(session.transcript_text().unwrap(), "");

        // the four pending "no" frames are gone
        assert_eq!(session.trigger_gesture("no", 400).unwrap(), None);
    }

    #[test]
    fn test_sessions_are_independent() {
        let a = RecognizerSession::new();
        let b = RecognizerSession::new();
        for i in 0..5 {
            a.trigger_gesture("thanks", i * 33).unwrap();
        }
        assert_eq!(a.transcript_labels().unwrap(), vec![GestureLabel::Thanks]);
        assert!(b.transcript_labels().unwrap().is_empty());
    }

    #[test]
    fn test_reset() {
        let session = RecognizerSession::with_config(RecognizerConfig::for_fast_signing());
        session
            .process_batch(session_frames(&[Some(poses::please()); 3]))
            .unwrap();
        assert_eq!(session.stats().unwrap().confirmed_gestures, 1);

        session.reset().unwrap();
        assert_eq!(session.stats().unwrap(), SessionStats::default());
        assert_eq!(session.transcript_text().unwrap(), "");
    }
}
