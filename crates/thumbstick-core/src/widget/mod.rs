//! Virtual joystick widget.
//!
//! The widget owns its drawing surface and reacts to pointer events:
//! - press inside the inner circle starts a drag
//! - move while dragging repositions the inner circle and emits a direction
//! - release snaps the inner circle back to the anchor
//!
//! Direction output is returned from [`JoystickWidget::on_move`], kept as
//! [`JoystickWidget::direction`], and pushed to an optional observer.

mod joystick;
mod state;

pub use joystick::{JoystickWidget, GRADIENT_INNER_RADIUS, GRADIENT_OUTER_RADIUS, INNER_RADIUS_RATIO};
pub use state::{JoystickEvent, WidgetState};
