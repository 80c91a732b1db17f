//! 手势识别器 - 从手部关键点识别静态手语并累积成文本
//!
//! 核心策略：
//! 1. 几何特征 - 仅比较关键点坐标，无需模型
//! 2. 有序规则链 - 按固定顺序匹配，先命中者优先
//! 3. 状态机确认 - 连续帧计数 + 冷却窗口，过滤抖动
//! 4. 单一入口 - 摄像头帧和手动触发走同一条确认路径

pub mod classifier;
pub mod features;
pub mod label;
pub mod landmarks;
pub mod pipeline;
pub mod source;
pub mod state_machine;
pub mod transcript;

pub use classifier::GestureClassifier;
pub use features::HandFeatures;
pub use label::GestureLabel;
pub use landmarks::{Landmark, LandmarkSet, LANDMARK_COUNT};
pub use pipeline::{FrameOutcome, GesturePipeline};
pub use source::{FrameSource, LandmarkFrame, ScriptedFrameSource};
pub use state_machine::{ConfirmationConfig, ConfirmationState, CooldownPolicy, StateMachine};
pub use transcript::{Transcript, TranscriptSink};
