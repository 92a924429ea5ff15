//! Joystick colors and outline width.

use peniko::color::{self, ParseError, Srgb};
use peniko::Color;
use thiserror::Error;

/// Default inner fill color (gradient center).
pub const DEFAULT_FILL: &str = "#00AA00";
/// Default stroke color (outlines and gradient edge).
pub const DEFAULT_STROKE: &str = "#003300";

/// A color string that is not valid CSS.
#[derive(Debug, Error)]
#[error("Invalid color {input:?}: {source}")]
pub struct ColorError {
    pub input: String,
    #[source]
    pub source: ParseError,
}

/// Parse any CSS color: hex, named, `rgb()`, `hsl()` and the other CSS
/// Color 4 forms.
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim();
    color::parse_color(s)
        .map(|dynamic| dynamic.to_alpha_color::<Srgb>())
        .map_err(|source| ColorError {
            input: s.to_string(),
            source,
        })
}

/// Parse `s`, falling back to `default` (which must parse) on failure.
fn parse_or_default(s: Option<&str>, default: &str) -> Color {
    let fallback = || parse_color(default).unwrap_or(Color::BLACK);
    match s {
        None => fallback(),
        Some(s) => parse_color(s).unwrap_or_else(|e| {
            log::warn!("{e}; using {default}");
            fallback()
        }),
    }
}

/// Visual style of a joystick.
#[derive(Debug, Clone, Copy)]
pub struct JoystickStyle {
    /// Gradient color at the center of the inner circle.
    pub fill: Color,
    /// Outline color, also the outer gradient stop.
    pub stroke: Color,
    /// Outline stroke width in surface units.
    pub outline_width: f64,
}

impl Default for JoystickStyle {
    fn default() -> Self {
        Self::from_strs(None, None)
    }
}

impl JoystickStyle {
    /// Build a style from optional CSS color strings of any form.
    ///
    /// Missing or unparseable strings use [`DEFAULT_FILL`] / [`DEFAULT_STROKE`].
    pub fn from_strs(fill: Option<&str>, stroke: Option<&str>) -> Self {
        Self {
            fill: parse_or_default(fill, DEFAULT_FILL),
            stroke: parse_or_default(stroke, DEFAULT_STROKE),
            outline_width: 1.0,
        }
    }

    /// Set the outline width.
    pub fn with_outline_width(mut self, width: f64) -> Self {
        self.outline_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::colors_match;

    #[test]
    fn test_parse_long_hex() {
        let color = parse_color("#00AA00").unwrap();
        assert!(colors_match(color, Color::from_rgba8(0, 170, 0, 255)));
    }

    #[test]
    fn test_parse_short_hex() {
        let color = parse_color("#fa0").unwrap();
        assert!(colors_match(color, Color::from_rgba8(255, 170, 0, 255)));
    }

    #[test]
    fn test_parse_with_alpha() {
        let color = parse_color(" #11223380 ").unwrap();
        assert!(colors_match(color, Color::from_rgba8(0x11, 0x22, 0x33, 0x80)));
    }

    #[test]
    fn test_parse_named_color() {
        let color = parse_color("red").unwrap();
        assert!(colors_match(color, Color::from_rgba8(255, 0, 0, 255)));
        let color = parse_color("rebeccapurple").unwrap();
        assert!(colors_match(color, Color::from_rgba8(102, 51, 153, 255)));
    }

    #[test]
    fn test_parse_functional_colors() {
        let color = parse_color("rgb(255, 0, 0)").unwrap();
        assert!(colors_match(color, Color::from_rgba8(255, 0, 0, 255)));
        let color = parse_color("hsl(240, 100%, 50%)").unwrap();
        assert!(colors_match(color, Color::from_rgba8(0, 0, 255, 255)));
    }

    #[test]
    fn test_parse_short_hex_with_alpha() {
        let color = parse_color("#f008").unwrap();
        assert!(colors_match(color, Color::from_rgba8(255, 0, 0, 0x88)));
    }

    #[test]
    fn test_parse_errors() {
        let err = parse_color(" #12345 ").unwrap_err();
        assert_eq!(err.input, "#12345");
        assert!(parse_color("#zzzzzz").is_err());
        assert!(parse_color("not a color").is_err());
        assert!(parse_color("rgb(1, 2").is_err());
        assert!(parse_color("").is_err());
    }

    #[test]
    fn test_named_colors_reach_style() {
        let style = JoystickStyle::from_strs(Some("red"), Some("rgb(0, 0, 255)"));
        assert!(colors_match(style.fill, Color::from_rgba8(255, 0, 0, 255)));
        assert!(colors_match(style.stroke, Color::from_rgba8(0, 0, 255, 255)));
    }

    #[test]
    fn test_default_style() {
        let style = JoystickStyle::default();
        assert!(colors_match(style.fill, Color::from_rgba8(0, 0xAA, 0, 255)));
        assert!(colors_match(style.stroke, Color::from_rgba8(0, 0x33, 0, 255)));
        assert!((style.outline_width - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_color_falls_back() {
        let style = JoystickStyle::from_strs(Some("not a color"), Some("#ffffff"));
        assert!(colors_match(style.fill, Color::from_rgba8(0, 0xAA, 0, 255)));
        assert!(colors_match(style.stroke, Color::WHITE));
    }
}
