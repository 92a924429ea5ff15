//! Thumbstick Application
//!
//! Demo shell hosting the joystick in a window: windowing, pointer
//! translation, and a marker that follows the joystick output.

#[cfg(feature = "native")]
mod app;
mod config;
mod movement;

#[cfg(feature = "native")]
pub use app::App;
pub use config::{AppConfig, AppError};
pub use movement::Marker;
