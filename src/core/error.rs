use thiserror::Error;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("Malformed landmark set: expected 21 points, found {found}")]
    MalformedLandmarks { found: usize },
    #[error("Landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },
    #[error("Line {line} is not a frame object")]
    MalformedFrame { line: usize },
    #[error("Unknown gesture tag: {0}")]
    UnknownGesture(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] json5::Error),
    #[error("Session lock poisoned: {0}")]
    LockPoisoned(String),
}
