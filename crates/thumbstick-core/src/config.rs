//! Joystick configuration loaded from JSON.

use std::path::Path;

use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::direction::AngleMode;
use crate::style::JoystickStyle;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Placement and appearance of a joystick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickConfig {
    /// Center of the outer circle in surface coordinates.
    pub anchor: Point,
    /// Outer circle radius.
    pub radius: f64,
    /// CSS color for the gradient center.
    pub fill_color: Option<String>,
    /// CSS color for outlines and the gradient edge.
    pub stroke_color: Option<String>,
    /// Outline stroke width.
    pub outline_width: f64,
    /// Pointer angle formula.
    pub angle_mode: AngleMode,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            anchor: Point::new(120.0, 360.0),
            radius: 80.0,
            fill_color: None,
            stroke_color: None,
            outline_width: 1.0,
            angle_mode: AngleMode::Raw,
        }
    }
}

impl JoystickConfig {
    /// Parse a config from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve the style described by this config.
    pub fn style(&self) -> JoystickStyle {
        JoystickStyle::from_strs(self.fill_color.as_deref(), self.stroke_color.as_deref())
            .with_outline_width(self.outline_width)
    }
}
