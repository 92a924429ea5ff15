//! Application configuration.

use std::path::Path;

use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use thumbstick_core::config::{ConfigError, JoystickConfig};
use thumbstick_core::parse_color;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// CSS color behind the joystick.
    pub background_color: String,
    /// CSS color of the steered marker.
    pub marker_color: String,
    /// Marker radius in logical pixels.
    pub marker_radius: f64,
    /// Marker speed in logical pixels per second at full deflection.
    pub marker_speed: f64,
    pub joystick: JoystickConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Thumbstick".to_string(),
            width: 960,
            height: 540,
            background_color: "#fafafa".to_string(),
            marker_color: "#3b82f6".to_string(),
            marker_radius: 12.0,
            marker_speed: 240.0,
            joystick: JoystickConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load a config from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn background(&self) -> Color {
        color_or(&self.background_color, Color::from_rgba8(250, 250, 250, 255))
    }

    pub fn marker(&self) -> Color {
        color_or(&self.marker_color, Color::from_rgba8(59, 130, 246, 255))
    }
}

fn color_or(s: &str, fallback: Color) -> Color {
    parse_color(s).unwrap_or_else(|e| {
        log::warn!("{e}; using fallback");
        fallback
    })
}
