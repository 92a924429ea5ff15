//! Thumbstick Core Library
//!
//! Platform-agnostic virtual joystick: geometry, pointer handling, direction
//! math and the drawing-surface contract the widget renders through.

pub mod config;
pub mod direction;
pub mod input;
pub mod style;
pub mod surface;
pub mod widget;

pub use config::{ConfigError, JoystickConfig};
pub use direction::{AngleMode, DirectionVector};
pub use input::{PointerEvent, PointerTarget, PointerTracker};
pub use style::{parse_color, ColorError, JoystickStyle};
pub use surface::{DrawCommand, DrawSurface, RadialGradient, RecordingSurface};
pub use widget::{JoystickEvent, JoystickWidget, WidgetState};
