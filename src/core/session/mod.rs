pub mod config;
pub mod manager;

pub use config::RecognizerConfig;
pub use manager::{RecognizerSession, SessionStats};
