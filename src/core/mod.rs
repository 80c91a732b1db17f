pub mod error;
pub mod session;

pub use error::GestureError;
