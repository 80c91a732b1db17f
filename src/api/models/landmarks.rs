use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::GestureError;
use crate::recognizer::landmarks::Landmark;
use crate::recognizer::source::LandmarkFrame;

/// 单个关键点（归一化坐标）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<LandmarkPoint> for Landmark {
    fn from(p: LandmarkPoint) -> Self {
        Landmark::new(p.x, p.y, p.z)
    }
}

/// 手部追踪器输出的一帧，与 MediaPipe `multiHandLandmarks` 对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkFrameData {
    pub timestamp_ms: u64,
    /// 检测到的手，仅使用第一只
    #[serde(default)]
    pub hands: Vec<Vec<LandmarkPoint>>,
}

impl LandmarkFrameData {
    pub fn no_hand(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            hands: Vec::new(),
        }
    }

    pub fn single_hand(timestamp_ms: u64, points: Vec<LandmarkPoint>) -> Self {
        Self {
            timestamp_ms,
            hands: vec![points],
        }
    }

    pub fn has_hand(&self) -> bool {
        !self.hands.is_empty()
    }

    pub fn first_hand(&self) -> Option<Vec<Landmark>> {
        self.hands
            .first()
            .map(|hand| hand.iter().copied().map(Landmark::from).collect())
    }

    pub fn to_frame(&self) -> LandmarkFrame {
        LandmarkFrame {
            timestamp_ms: self.timestamp_ms,
            hand: self.first_hand(),
        }
    }
}

/// 确认的手势事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfirmedInfo {
    pub tag: String,
    pub display: String,
    pub timestamp_ms: u64,
    pub frame_number: u64,
    /// 追加后的完整文本
    pub transcript: String,
}

/// 手势符号表条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureInfo {
    pub tag: String,
    pub display: String,
}

/// 解析录制的会话：每个非空行一个 JSON 帧
///
/// 追踪器偶尔输出残缺的关键点，这类手会变成空点集，分类时按无手势处理；
/// 只有整行不是 JSON 对象时才返回错误。
pub fn parse_frame_json_lines(text: &str) -> Result<Vec<LandmarkFrameData>, GestureError> {
    let mut frames = Vec::new();
    let mut last_timestamp_ms = 0;

    for (index, line) in text.lines().map(str::trim).enumerate() {
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)?;
        let object = value
            .as_object()
            .ok_or(GestureError::MalformedFrame { line: index + 1 })?;

        let timestamp_ms = object
            .get("timestamp_ms")
            .and_then(Value::as_u64)
            .unwrap_or(last_timestamp_ms);
        last_timestamp_ms = timestamp_ms;

        let hands = match object.get("hands") {
            Some(Value::Array(hands)) => hands.iter().map(lenient_hand).collect(),
            _ => Vec::new(),
        };
        frames.push(LandmarkFrameData {
            timestamp_ms,
            hands,
        });
    }

    Ok(frames)
}

/// A hand with any incomplete point becomes empty.
fn lenient_hand(hand: &Value) -> Vec<LandmarkPoint> {
    let points = match hand.as_array() {
        Some(points) => points,
        None => return Vec::new(),
    };
    points
        .iter()
        .map(|p| LandmarkPoint::deserialize(p).ok())
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}
