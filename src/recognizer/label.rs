use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::error::GestureError;

/// Recognized static hand signs, in classifier priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureLabel {
    /// Index finger raised, others folded.
    Hello,
    /// Thumbs up towards the camera.
    Yes,
    /// Index finger pointing sideways.
    No,
    /// Open palm with the thumb out.
    Thanks,
    /// Thumb and index forming a circle.
    Good,
    /// Fingers held together, palm forward.
    Please,
    /// Open palm with spread fingers.
    Stop,
}

static TAG_LOOKUP: Lazy<HashMap<&'static str, GestureLabel>> = Lazy::new(|| {
    GestureLabel::ALL
        .iter()
        .map(|label| (label.tag(), *label))
        .collect()
});

impl GestureLabel {
    pub const ALL: [GestureLabel; 7] = [
        GestureLabel::Hello,
        GestureLabel::Yes,
        GestureLabel::No,
        GestureLabel::Thanks,
        GestureLabel::Good,
        GestureLabel::Please,
        GestureLabel::Stop,
    ];

    /// 显示文本（库尔德语）
    pub fn display(&self) -> &'static str {
        match self {
            Self::Hello => "سڵاو",
            Self::Yes => "بەڵێ",
            Self::No => "نەخێر",
            Self::Thanks => "سوپاس",
            Self::Good => "باشە",
            Self::Please => "تکایە",
            Self::Stop => "وەستە",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Yes => "yes",
            Self::No => "no",
            Self::Thanks => "thanks",
            Self::Good => "good",
            Self::Please => "please",
            Self::Stop => "stop",
        }
    }

    pub fn from_tag(tag: &str) -> Result<Self, GestureError> {
        TAG_LOOKUP
            .get(tag.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| GestureError::UnknownGesture(tag.to_string()))
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}
