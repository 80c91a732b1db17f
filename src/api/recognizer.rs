//! 手势识别器

use crate::api::models::landmarks::{
    parse_frame_json_lines, GestureConfirmedInfo, GestureInfo, LandmarkFrameData,
};
use crate::core::error::GestureError;
use crate::core::session::{RecognizerConfig, RecognizerSession, SessionStats};
use crate::recognizer::label::GestureLabel;
use flutter_rust_bridge::frb;
use log::{info, warn};

/// 手势识别器 - 关键点分类 + 连续帧确认 + 文本累积
///
/// ```dart
/// final recognizer = GestureRecognizer.create();
/// final confirmed = recognizer.onFrame(frame: frame);
/// if (confirmed != null) messageBox.text = confirmed.transcript;
/// ```
#[frb(opaque)]
pub struct GestureRecognizer {
    session: RecognizerSession,
}

impl GestureRecognizer {
    /// 使用默认参数创建（5 帧确认，1500ms 冷却）
    #[frb(sync)]
    pub fn create() -> Self {
        crate::init_logging();
        info!("🖐️ GestureRecognizer: created");
        Self {
            session: RecognizerSession::new(),
        }
    }

    /// 使用 JSON5 配置创建
    #[frb(sync)]
    pub fn create_with_config(config_json5: String) -> Result<Self, GestureError> {
        crate::init_logging();
        let config = RecognizerConfig::from_json5(&config_json5).map_err(|e| {
            warn!("❌ Invalid recognizer config: {}", e);
            e
        })?;
        info!("🖐️ GestureRecognizer: created with {:?}", config.confirmation);
        Ok(Self {
            session: RecognizerSession::with_config(config),
        })
    }

    /// 处理一帧，确认手势时返回事件
    #[frb(sync)]
    pub fn on_frame(
        &self,
        frame: LandmarkFrameData,
    ) -> Result<Option<GestureConfirmedInfo>, GestureError> {
        self.session.process_frame(&frame)
    }

    /// 手动触发手势（摄像头不可用时的演示模式）
    #[frb(sync)]
    pub fn trigger_gesture(
        &self,
        tag: String,
        timestamp_ms: u64,
    ) -> Result<Option<GestureConfirmedInfo>, GestureError> {
        self.session.trigger_gesture(&tag, timestamp_ms)
    }

    /// 批量处理帧
    #[frb]
    pub fn process_batch(
        &self,
        frames: Vec<LandmarkFrameData>,
    ) -> Result<Vec<GestureConfirmedInfo>, GestureError> {
        self.session.process_batch(frames)
    }

    /// 回放录制的会话（每行一个 JSON 帧）
    #[frb]
    pub fn replay_json_lines(&self, text: String) -> Result<Vec<GestureConfirmedInfo>, GestureError> {
        let frames = parse_frame_json_lines(&text)?;
        info!("⏯️ Replaying {} recorded frames", frames.len());
        self.session.process_batch(frames)
    }

    /// 当前文本
    #[frb(sync, getter)]
    pub fn transcript(&self) -> Result<String, GestureError> {
        self.session.transcript_text()
    }

    /// 清空文本
    #[frb(sync)]
    pub fn clear_transcript(&self) -> Result<(), GestureError> {
        self.session.clear_transcript()
    }

    /// 获取统计
    #[frb(sync, getter)]
    pub fn stats(&self) -> Result<SessionStats, GestureError> {
        self.session.stats()
    }

    /// 重置状态
    #[frb(sync)]
    pub fn reset(&self) -> Result<(), GestureError> {
        self.session.reset()
    }
}

impl Drop for GestureRecognizer {
    fn drop(&mut self) {
        info!("🗑️ GestureRecognizer: released");
    }
}

/// 支持的手势符号表（按识别优先级排序）
#[frb(sync)]
pub fn gesture_catalog() -> Vec<GestureInfo> {
    GestureLabel::ALL
        .iter()
        .map(|label| GestureInfo {
            tag: label.tag().to_string(),
            display: label.display().to_string(),
        })
        .collect()
}
